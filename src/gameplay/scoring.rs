//! Round clocks and final-score computation.

use bevy::prelude::*;

use crate::gameplay::session::{GameMode, RoundStats, RoundSummary, Session, TIMED_ROUND_SECS};
use crate::menus::Menu;
use crate::{GameSet, gameplay_running};

// === Messages ===

/// The current round is over; compute the final score and tear down.
#[derive(Message, Debug, Clone, Copy)]
pub struct RoundEnd;

// === Pure Functions ===

/// Final score for the timed box modes. Accuracy discounts the raw
/// points down to no less than half.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn box_final_score(points: u32, accuracy: f32) -> u32 {
    if points == 0 {
        return 0;
    }
    (points as f32 * accuracy_weight(accuracy)).ceil() as u32
}

/// Final score for the human-target mode: the elapsed seconds inflated
/// by poor accuracy. Lower is better.
#[must_use]
pub fn human_final_score(elapsed_secs: f32, accuracy: f32) -> f32 {
    elapsed_secs / accuracy_weight(accuracy)
}

/// Maps accuracy in [0, 1] onto [0.5, 1]: a miss costs half of what a
/// hit earns.
fn accuracy_weight(accuracy: f32) -> f32 {
    let accuracy = accuracy.clamp(0.0, 1.0);
    (1.0 - accuracy).mul_add(0.5, accuracy)
}

// === Systems ===

/// Drive the round clock: down toward expiry in the timed modes, up in
/// the human-target mode.
fn tick_round_clock(
    time: Res<Time<Virtual>>,
    mode: Res<State<GameMode>>,
    mut session: ResMut<Session>,
    mut round_end: MessageWriter<RoundEnd>,
) {
    let mode = *mode.get();
    match mode {
        GameMode::Idle => {}
        GameMode::TimedBox | GameMode::TimedMoving => {
            session.clock -= time.delta_secs();
            if session.clock <= 0.0 {
                session.clock = 0.0;
                round_end.write(RoundEnd);
            }
        }
        GameMode::HumanTarget => {
            session.clock += time.delta_secs();
        }
    }
}

/// Close out the round: stash the summary, reset the counters, drop
/// back to the idle range and open the results panel.
fn finish_round(
    mut round_end: MessageReader<RoundEnd>,
    mode: Res<State<GameMode>>,
    mut session: ResMut<Session>,
    mut stats: ResMut<RoundStats>,
    mut next_mode: ResMut<NextState<GameMode>>,
    mut next_menu: ResMut<NextState<Menu>>,
) {
    if round_end.is_empty() {
        return;
    }
    round_end.clear();

    let mode = *mode.get();
    if mode == GameMode::Idle {
        return;
    }

    let accuracy = stats.accuracy();
    #[allow(clippy::cast_precision_loss)]
    let score = match mode {
        GameMode::HumanTarget => human_final_score(session.clock, accuracy),
        _ => box_final_score(stats.points, accuracy) as f32,
    };

    session.summary = Some(RoundSummary {
        mode,
        shots_fired: stats.shots_fired,
        shots_hit: stats.shots_hit,
        targets_destroyed: stats.targets_destroyed,
        points: stats.points,
        score,
    });
    session.last_mode = mode;
    stats.reset();

    info!("round over: {mode:?}, final score {score:.2}");
    next_mode.set(GameMode::Idle);
    next_menu.set(Menu::Results);
}

/// Shared round entry used by the start plates.
pub fn start_round(
    mode: GameMode,
    session: &mut Session,
    stats: &mut RoundStats,
    next_mode: &mut NextState<GameMode>,
) {
    stats.reset();
    session.summary = None;
    session.clock = if mode.counts_down() {
        TIMED_ROUND_SECS
    } else {
        0.0
    };
    next_mode.set(mode);
    info!("round started: {mode:?}");
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.add_message::<RoundEnd>();

    app.add_systems(
        Update,
        (tick_round_clock, finish_round)
            .chain()
            .in_set(GameSet::Scoring)
            .run_if(gameplay_running),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn box_score_discounts_by_accuracy() {
        // 100 points at 50% accuracy keeps three quarters.
        assert_eq!(box_final_score(100, 0.5), 75);
    }

    #[test]
    fn box_score_full_accuracy_keeps_everything() {
        assert_eq!(box_final_score(120, 1.0), 120);
    }

    #[test]
    fn box_score_rounds_up() {
        // 10 * 0.55 = 5.5 -> 6.
        assert_eq!(box_final_score(10, 0.1), 6);
    }

    #[test]
    fn box_score_zero_points_is_zero() {
        assert_eq!(box_final_score(0, 1.0), 0);
        assert_eq!(box_final_score(0, 0.0), 0);
    }

    #[test]
    fn human_score_inflates_elapsed_time() {
        // 45 s at 80% accuracy: 45 / 0.9 = 50.
        let score = human_final_score(45.0, 0.8);
        assert!((score - 50.0).abs() < 1e-4);
    }

    #[test]
    fn human_score_perfect_accuracy_is_raw_time() {
        let score = human_final_score(37.5, 1.0);
        assert!((score - 37.5).abs() < 1e-4);
    }

    #[test]
    fn human_score_never_divides_by_less_than_half() {
        // Even absurd accuracy values at most double the time.
        let score = human_final_score(30.0, -5.0);
        assert!((score - 60.0).abs() < 1e-4);
    }
}
