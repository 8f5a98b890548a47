//! Pop-up silhouette director for the human-target mode.
//!
//! The 18 silhouettes are permanent scene entities. Each round the
//! director reseeds its working pool from them, then shows one at a
//! time: raise it, give the shooter a 3 second window, lower it again
//! if they are too slow.

use avian2d::prelude::Collider;
use bevy::prelude::*;
use rand::Rng;

use super::{Target, TargetState};
use crate::gameplay::scoring::RoundEnd;
use crate::gameplay::session::{GameMode, RangeRng, RoundStats};
use crate::{GameSet, gameplay_running};

// === Constants ===

/// Seconds a shown silhouette stays up before ducking back down.
pub const ARM_SECS: f32 = 3.0;

/// How far a silhouette rises above its lowered home position.
pub const RISE_HEIGHT: f32 = 1.5;

/// Rise and lower speed, units per second.
pub const RISE_SPEED: f32 = 3.0;

/// An innocent is rolled with probability 1 in `INNOCENT_DIE`.
const INNOCENT_DIE: u32 = 3;

/// At most this many innocents per round.
pub const INNOCENT_BUDGET: u32 = 2;

/// Silhouette sprite size; the collider matches.
pub const SILHOUETTE_SIZE: Vec2 = Vec2::new(0.9, 1.8);

pub const SILHOUETTE_COLOR: Color = Color::srgb(0.45, 0.42, 0.4);
const HOSTILE_COLOR: Color = Color::srgb(0.75, 0.25, 0.2);
const INNOCENT_COLOR: Color = Color::srgb(0.85, 0.85, 0.95);

// === Components ===

/// Permanent marker for the pop-up silhouettes, holding the lowered
/// home position.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Silhouette {
    pub home: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum PopUpRole {
    Hostile,
    /// Shooting one costs penalty time.
    Innocent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum PopUpPhase {
    Rising,
    Armed,
    Lowering,
}

/// Present on a silhouette while it is shown.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct PopUp {
    pub role: PopUpRole,
    pub phase: PopUpPhase,
    /// Seconds until an unshot silhouette ducks back down.
    pub time_left: f32,
}

impl PopUp {
    #[cfg(test)]
    pub(crate) const fn shown(role: PopUpRole) -> Self {
        Self {
            role,
            phase: PopUpPhase::Armed,
            time_left: ARM_SECS,
        }
    }
}

// === Resources ===

/// Round-scoped state of the silhouette rotation.
#[derive(Resource, Debug, Default)]
pub struct PopUpDirector {
    /// Silhouettes not yet shown this round.
    pub pool: Vec<Entity>,
    /// Set whenever the previous silhouette resolved or timed out.
    pub can_show: bool,
    pub innocents_left: u32,
}

// === Systems ===

/// Seed a fresh round: every silhouette back home, alive, and in the
/// pool.
fn reset_pop_ups(
    mut director: ResMut<PopUpDirector>,
    mut silhouettes: Query<(Entity, &Silhouette, &mut Target, &mut Transform, &mut Sprite)>,
    mut stats: ResMut<RoundStats>,
    mut commands: Commands,
) {
    director.pool.clear();
    director.can_show = true;
    director.innocents_left = INNOCENT_BUDGET;

    for (entity, silhouette, mut target, mut transform, mut sprite) in &mut silhouettes {
        target.health = Target::SPAWN_HEALTH;
        target.state = TargetState::Alive;
        transform.translation.x = silhouette.home.x;
        transform.translation.y = silhouette.home.y;
        sprite.color = SILHOUETTE_COLOR;
        commands.entity(entity).remove::<(PopUp, Collider)>();
        director.pool.push(entity);
    }

    #[allow(clippy::cast_possible_truncation)]
    {
        stats.pop_ups_left = director.pool.len() as u32;
    }
    info!("human-target round seeded with {} silhouettes", director.pool.len());
}

/// Show the next silhouette when the director is clear to.
fn show_next_pop_up(
    mut director: ResMut<PopUpDirector>,
    mut rng: ResMut<RangeRng>,
    mut sprites: Query<&mut Sprite, With<Silhouette>>,
    mut commands: Commands,
) {
    if !director.can_show || director.pool.is_empty() {
        return;
    }

    let index = rng.random_range(0..director.pool.len());
    let entity = director.pool.swap_remove(index);

    let innocent =
        director.innocents_left > 0 && rng.random_range(0..INNOCENT_DIE) == 1;
    let role = if innocent {
        director.innocents_left -= 1;
        PopUpRole::Innocent
    } else {
        PopUpRole::Hostile
    };

    if let Ok(mut sprite) = sprites.get_mut(entity) {
        sprite.color = match role {
            PopUpRole::Hostile => HOSTILE_COLOR,
            PopUpRole::Innocent => INNOCENT_COLOR,
        };
    }

    commands.entity(entity).insert((
        PopUp {
            role,
            phase: PopUpPhase::Rising,
            time_left: ARM_SECS,
        },
        Collider::rectangle(SILHOUETTE_SIZE.x, SILHOUETTE_SIZE.y),
    ));
    director.can_show = false;
    debug!("showing {role:?} silhouette");
}

/// Drive the rise, the armed countdown, and the lowering of the shown
/// silhouette.
fn animate_pop_ups(
    time: Res<Time<Virtual>>,
    mut director: ResMut<PopUpDirector>,
    mut shown: Query<(Entity, &Silhouette, &mut PopUp, &mut Transform)>,
    mut stats: ResMut<RoundStats>,
    mut round_end: MessageWriter<RoundEnd>,
    mut commands: Commands,
) {
    let dt = time.delta_secs();
    for (entity, silhouette, mut pop_up, mut transform) in &mut shown {
        match pop_up.phase {
            PopUpPhase::Rising | PopUpPhase::Armed => {
                if pop_up.phase == PopUpPhase::Rising {
                    let top = silhouette.home.y + RISE_HEIGHT;
                    transform.translation.y += RISE_SPEED * dt;
                    if transform.translation.y >= top {
                        transform.translation.y = top;
                        pop_up.phase = PopUpPhase::Armed;
                    }
                }

                // The window runs from the moment the rise starts.
                pop_up.time_left -= dt;
                if pop_up.time_left <= 0.0 {
                    pop_up.phase = PopUpPhase::Lowering;
                    director.can_show = true;
                    commands.entity(entity).remove::<Collider>();

                    stats.pop_ups_left = stats.pop_ups_left.saturating_sub(1);
                    if stats.pop_ups_left == 0 {
                        round_end.write(RoundEnd);
                    }
                    debug!("silhouette timed out");
                }
            }
            PopUpPhase::Lowering => {
                transform.translation.y -= RISE_SPEED * dt;
                if transform.translation.y <= silhouette.home.y {
                    transform.translation.y = silhouette.home.y;
                    commands.entity(entity).remove::<PopUp>();
                }
            }
        }
    }
}

/// Nothing stays up once the round is over.
fn lower_all_pop_ups(
    mut director: ResMut<PopUpDirector>,
    shown: Query<Entity, With<PopUp>>,
    mut commands: Commands,
) {
    director.pool.clear();
    director.can_show = false;
    for entity in &shown {
        if let Ok(mut entity) = commands.get_entity(entity) {
            entity.remove::<(PopUp, Collider)>();
        }
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Silhouette>();
    app.register_type::<PopUp>();
    app.init_resource::<PopUpDirector>();

    app.add_systems(OnEnter(GameMode::HumanTarget), reset_pop_ups);
    app.add_systems(OnExit(GameMode::HumanTarget), lower_all_pop_ups);
    app.add_systems(
        Update,
        (show_next_pop_up, animate_pop_ups)
            .chain()
            .in_set(GameSet::Targets)
            .run_if(gameplay_running.and(in_state(GameMode::HumanTarget))),
    );
}
