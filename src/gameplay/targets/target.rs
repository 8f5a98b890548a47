//! Damage application and the terminal branch that runs once when a
//! target's health reaches zero.

use avian2d::prelude::Collider;
use bevy::prelude::*;

use super::movement::Patrol;
use super::popup::{PopUp, PopUpDirector, PopUpRole};
use super::{ControllerState, Target, TargetController, TargetKind, TargetState};
use crate::gameplay::audio::{SoundCue, SoundKind};
use crate::gameplay::lifetime::Lifetime;
use crate::gameplay::scoring::RoundEnd;
use crate::gameplay::session::{GameMode, RoundStats, Session};
use crate::{GameSet, Z_EFFECT, gameplay_running};

// === Constants ===

/// Seconds the floating `+N` score text stays up.
const SCORE_TEXT_SECS: f32 = 1.5;

/// Seconds a spent prop lingers (hidden) before despawning.
const SPENT_PROP_SECS: f32 = 2.0;

/// Seconds the innocent-hit penalty indicator stays up.
const PENALTY_TEXT_SECS: f32 = 3.0;

/// Seconds added to the count-up clock for shooting an innocent.
pub const INNOCENT_PENALTY_SECS: f32 = 10.0;

/// Sideways slide applied to a resolved silhouette.
const RESOLVE_SLIDE: f32 = 1.5;

// === Messages ===

/// One confirmed bullet strike on a target.
#[derive(Message, Debug, Clone, Copy)]
pub struct TargetHit {
    pub target: Entity,
    /// Health removed.
    pub amount: f32,
    /// Muzzle-to-target distance, which prices the prop bounty.
    pub distance: f32,
}

// === Pure Functions ===

/// Points awarded for destroying a prop at the given distance.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn prop_bounty(distance: f32) -> u32 {
    distance.max(0.0).ceil() as u32
}

// === Systems ===

/// Apply queued hits. Health only ever decreases; the terminal branch
/// runs exactly once, on the tick health first reaches zero.
fn apply_target_hits(
    mut hits: MessageReader<TargetHit>,
    mut targets: Query<(&mut Target, &Transform, Option<&PopUp>)>,
    mut controllers: Query<&mut TargetController>,
    mut director: ResMut<PopUpDirector>,
    mode: Res<State<GameMode>>,
    mut session: ResMut<Session>,
    mut stats: ResMut<RoundStats>,
    mut sounds: MessageWriter<SoundCue>,
    mut round_end: MessageWriter<RoundEnd>,
    mut commands: Commands,
) {
    for hit in hits.read() {
        let Ok((mut target, transform, pop_up)) = targets.get_mut(hit.target) else {
            continue;
        };

        target.health -= hit.amount;
        if target.health > 0.0 || target.state == TargetState::Resolved {
            continue;
        }
        target.state = TargetState::Resolved;

        match target.kind {
            TargetKind::Prop { controller } => resolve_prop(
                hit,
                transform,
                controller,
                &mut controllers,
                *mode.get(),
                &mut stats,
                &mut commands,
            ),
            TargetKind::PopUp => {
                // A lowered silhouette cannot be on the firing line, so
                // a terminal hit always means the shown one.
                let role = pop_up.map_or(PopUpRole::Hostile, |p| p.role);
                resolve_pop_up(
                    hit.target,
                    transform,
                    role,
                    &mut director,
                    &mut session,
                    &mut stats,
                    &mut round_end,
                    &mut commands,
                );
            }
        }

        stats.targets_destroyed += 1;
        sounds.write(SoundCue(SoundKind::MetalImpact));
    }
}

fn resolve_prop(
    hit: &TargetHit,
    transform: &Transform,
    controller: Entity,
    controllers: &mut Query<&mut TargetController>,
    mode: GameMode,
    stats: &mut RoundStats,
    commands: &mut Commands,
) {
    let bounty = prop_bounty(hit.distance);
    stats.points += bounty;

    let mut pos = transform.translation;
    pos.z = Z_EFFECT;
    commands.spawn((
        Name::new("Score Text"),
        Text2d::new(format!("+{bounty}")),
        TextColor(Color::srgb(0.3, 0.9, 0.3)),
        Transform::from_translation(pos),
        Lifetime(SCORE_TEXT_SECS),
    ));

    // The prop lingers invisibly before despawn; strip the collider so
    // it soaks no further shots.
    commands
        .entity(hit.target)
        .remove::<(Collider, Patrol)>()
        .insert((Visibility::Hidden, Lifetime(SPENT_PROP_SECS)));

    debug!("prop destroyed, +{bounty} points");

    if mode != GameMode::Idle {
        if let Ok(mut controller) = controllers.get_mut(controller) {
            controller.state = ControllerState::Idle;
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn resolve_pop_up(
    entity: Entity,
    transform: &Transform,
    role: PopUpRole,
    director: &mut PopUpDirector,
    session: &mut Session,
    stats: &mut RoundStats,
    round_end: &mut MessageWriter<RoundEnd>,
    commands: &mut Commands,
) {
    director.can_show = true;
    commands
        .entity(entity)
        .entry::<Transform>()
        .and_modify(|mut t| t.translation.x += RESOLVE_SLIDE);
    // The silhouette stays in the scene for the next round; it just
    // stops being shown or shootable.
    commands.entity(entity).remove::<(PopUp, Collider)>();

    if role == PopUpRole::Innocent {
        session.clock += INNOCENT_PENALTY_SECS;
        let mut pos = transform.translation;
        pos.z = Z_EFFECT;
        commands.spawn((
            Name::new("Penalty Text"),
            Text2d::new(format!("+{INNOCENT_PENALTY_SECS:.0}s")),
            TextColor(Color::srgb(0.9, 0.2, 0.2)),
            Transform::from_translation(pos),
            Lifetime(PENALTY_TEXT_SECS),
        ));
        info!("innocent shot, {INNOCENT_PENALTY_SECS} second penalty");
    }

    stats.pop_ups_left = stats.pop_ups_left.saturating_sub(1);
    if stats.pop_ups_left == 0 {
        round_end.write(RoundEnd);
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.add_message::<TargetHit>();

    app.add_systems(
        Update,
        apply_target_hits
            .in_set(GameSet::Targets)
            .run_if(gameplay_running),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bounty_is_distance_rounded_up() {
        assert_eq!(prop_bounty(0.2), 1);
        assert_eq!(prop_bounty(17.0), 17);
        assert_eq!(prop_bounty(17.01), 18);
    }

    #[test]
    fn bounty_never_negative() {
        assert_eq!(prop_bounty(-5.0), 0);
    }
}
