//! Round session state: the active game mode, the round clock, per-round
//! statistics, and the seeded random source shared by all gameplay systems.

use std::str::FromStr;

use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use thiserror::Error;

use crate::GameState;
use crate::gameplay::weapons::WeaponId;

// === Constants ===

/// Round length (seconds) for the countdown modes.
pub const TIMED_ROUND_SECS: f32 = 30.0;

/// Number of pop-up silhouettes a human-target round runs through.
pub const POP_UP_ROUND_COUNT: u32 = 18;

// === States ===

/// The active game mode. Exactly one at a time; rounds always pass
/// through `Idle` between modes.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
#[states(scoped_entities)]
pub enum GameMode {
    /// Free fire at the empty range. Start plates are live.
    #[default]
    Idle,
    /// 30 s countdown, slow box targets, one per lane pair.
    TimedBox,
    /// 30 s countdown, faster boxes that escape after bouncing twice.
    TimedMoving,
    /// 18 pop-up silhouettes, clock counts up, lower score is better.
    HumanTarget,
}

impl GameMode {
    /// Stable tag used as the high-score file key.
    #[must_use]
    pub const fn as_tag(self) -> &'static str {
        match self {
            Self::Idle => "none",
            Self::TimedBox => "timed_box",
            Self::TimedMoving => "timed_moving",
            Self::HumanTarget => "human_target",
        }
    }

    /// Whether the round clock counts down toward expiry.
    #[must_use]
    pub const fn counts_down(self) -> bool {
        matches!(self, Self::TimedBox | Self::TimedMoving)
    }

    /// Whether box spawners run in this mode.
    #[must_use]
    pub const fn spawns_boxes(self) -> bool {
        matches!(self, Self::TimedBox | Self::TimedMoving)
    }
}

/// Error for unrecognized mode tags in the high-score file.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown game mode tag: {0:?}")]
pub struct ModeParseError(pub String);

impl FromStr for GameMode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::Idle),
            "timed_box" => Ok(Self::TimedBox),
            "timed_moving" => Ok(Self::TimedMoving),
            "human_target" => Ok(Self::HumanTarget),
            other => Err(ModeParseError(other.to_string())),
        }
    }
}

// === Resources ===

/// Per-session state that outlives individual rounds.
#[derive(Resource, Debug, Reflect)]
#[reflect(Resource)]
pub struct Session {
    /// Round clock in seconds. Counts down in the timed modes, up in the
    /// human-target mode. Meaningless while `Idle`.
    pub clock: f32,
    /// Currently wielded weapon.
    pub selected: WeaponId,
    /// Weapon bound to key 1.
    pub primary: WeaponId,
    /// Weapon bound to key 2.
    pub secondary: WeaponId,
    /// Mode of the most recently finished round.
    pub last_mode: GameMode,
    /// Finished-round summary waiting for the results panel.
    pub summary: Option<RoundSummary>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            clock: 0.0,
            selected: WeaponId::Rifle,
            primary: WeaponId::Rifle,
            secondary: WeaponId::Pistol,
            last_mode: GameMode::Idle,
            summary: None,
        }
    }
}

/// Outcome of a finished round, shown on the results panel and offered
/// for the high-score list.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct RoundSummary {
    pub mode: GameMode,
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub targets_destroyed: u32,
    /// Raw points before the accuracy discount.
    pub points: u32,
    /// Final score. Points for the timed modes, seconds for human-target.
    pub score: f32,
}

/// Counters for the round in progress. Reset when a round starts.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Resource)]
pub struct RoundStats {
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub targets_destroyed: u32,
    pub points: u32,
    /// Human-target mode only: silhouettes not yet resolved.
    pub pop_ups_left: u32,
}

impl RoundStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Hits never outnumber shots: a hit is only recorded from a fired
    /// shot's raycast. Debug builds assert the invariant.
    pub fn record_hit(&mut self) {
        self.shots_hit += 1;
        debug_assert!(self.shots_hit <= self.shots_fired);
    }

    /// Fraction of fired shots that hit a target. 0 when nothing was
    /// fired, never NaN.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn accuracy(&self) -> f32 {
        if self.shots_fired == 0 {
            0.0
        } else {
            self.shots_hit as f32 / self.shots_fired as f32
        }
    }
}

/// Seeded random source for all gameplay draws (lane choice, pop-up pick,
/// innocent roll, shot spread). Tests construct it from a fixed seed.
#[derive(Resource)]
pub struct RangeRng(pub ChaCha8Rng);

impl RangeRng {
    #[must_use]
    pub fn from_entropy() -> Self {
        Self(ChaCha8Rng::from_os_rng())
    }

    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for RangeRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl std::ops::Deref for RangeRng {
    type Target = ChaCha8Rng;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::DerefMut for RangeRng {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

// === Systems ===

fn reset_session(mut session: ResMut<Session>, mut stats: ResMut<RoundStats>) {
    session.clock = 0.0;
    session.last_mode = GameMode::Idle;
    session.summary = None;
    stats.reset();
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.init_state::<GameMode>();
    app.register_type::<Session>();
    app.register_type::<RoundStats>();
    app.init_resource::<Session>();
    app.init_resource::<RoundStats>();
    app.init_resource::<RangeRng>();

    app.add_systems(OnEnter(GameState::InRange), reset_session);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_mode_is_idle() {
        assert_eq!(GameMode::default(), GameMode::Idle);
    }

    #[test]
    fn mode_tags_round_trip() {
        for mode in [
            GameMode::Idle,
            GameMode::TimedBox,
            GameMode::TimedMoving,
            GameMode::HumanTarget,
        ] {
            assert_eq!(mode.as_tag().parse::<GameMode>(), Ok(mode));
        }
    }

    #[test]
    fn unknown_tag_is_an_error() {
        let err = "mode_7".parse::<GameMode>().unwrap_err();
        assert_eq!(err, ModeParseError("mode_7".to_string()));
    }

    #[test]
    fn only_timed_modes_count_down() {
        assert!(GameMode::TimedBox.counts_down());
        assert!(GameMode::TimedMoving.counts_down());
        assert!(!GameMode::HumanTarget.counts_down());
        assert!(!GameMode::Idle.counts_down());
    }

    #[test]
    fn accuracy_guard_on_zero_shots() {
        let stats = RoundStats::default();
        assert_eq!(stats.accuracy(), 0.0);
        assert!(!stats.accuracy().is_nan());
    }

    #[test]
    fn accuracy_is_hit_fraction() {
        let stats = RoundStats {
            shots_fired: 20,
            shots_hit: 15,
            ..default()
        };
        assert!((stats.accuracy() - 0.75).abs() < f32::EPSILON);
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        use rand::Rng;
        let mut a = RangeRng::seeded(7);
        let mut b = RangeRng::seeded(7);
        for _ in 0..32 {
            assert_eq!(
                a.random_range(-1000.0..1000.0_f32),
                b.random_range(-1000.0..1000.0_f32)
            );
        }
    }

    #[test]
    fn stats_reset_clears_everything() {
        let mut stats = RoundStats {
            shots_fired: 9,
            shots_hit: 4,
            targets_destroyed: 2,
            points: 120,
            pop_ups_left: 3,
        };
        stats.reset();
        assert_eq!(stats, RoundStats::default());
    }
}
