//! Box target patrol movement and the fast mode's escape rule.

use avian2d::prelude::Collider;
use bevy::prelude::*;

use super::{ControllerState, Target, TargetController, TargetKind};
use crate::gameplay::session::GameMode;
use crate::{GameSet, gameplay_running};

// === Constants ===

/// Seconds an escaped box lingers offscreen before despawning and
/// freeing its lane.
pub const ESCAPE_COOLDOWN_SECS: f32 = 1.0;

/// Parking spot for escaped boxes, well outside the range.
const OFFSCREEN: Vec2 = Vec2::new(1000.0, 1000.0);

// === Components ===

/// Horizontal back-and-forth movement across a lane.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Patrol {
    /// Units per second. Zero for stationary targets.
    pub speed: f32,
    /// +1 right, -1 left.
    pub direction: f32,
    pub center_x: f32,
    pub half_width: f32,
    /// Lane-end contacts so far.
    pub contacts: u32,
}

impl Patrol {
    #[must_use]
    pub const fn new(speed: f32, center_x: f32, half_width: f32) -> Self {
        Self {
            speed,
            direction: 1.0,
            center_x,
            half_width,
            contacts: 0,
        }
    }
}

/// A box that bounced once too often in the fast mode and slipped away.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Escaped {
    pub cooldown: f32,
}

// === Systems ===

/// Slide patrolling boxes along their lane, bouncing at the ends. In
/// the fast mode a box that reaches its second lane end escapes instead
/// of bouncing again.
fn move_patrols(
    time: Res<Time<Virtual>>,
    mode: Res<State<GameMode>>,
    mut boxes: Query<(Entity, &mut Patrol, &mut Transform), Without<Escaped>>,
    mut commands: Commands,
) {
    let dt = time.delta_secs();
    for (entity, mut patrol, mut transform) in &mut boxes {
        if patrol.speed <= 0.0 {
            continue;
        }

        transform.translation.x += patrol.speed * patrol.direction * dt;

        let min = patrol.center_x - patrol.half_width;
        let max = patrol.center_x + patrol.half_width;
        let x = transform.translation.x;
        if x < min || x > max {
            transform.translation.x = x.clamp(min, max);
            patrol.direction = -patrol.direction;
            patrol.contacts += 1;

            if *mode.get() == GameMode::TimedMoving && patrol.contacts > 1 {
                transform.translation.x = OFFSCREEN.x;
                transform.translation.y = OFFSCREEN.y;
                commands
                    .entity(entity)
                    .remove::<Collider>()
                    .insert((
                        Visibility::Hidden,
                        Escaped {
                            cooldown: ESCAPE_COOLDOWN_SECS,
                        },
                    ));
                debug!("box target escaped");
            }
        }
    }
}

/// After the cooldown an escaped box is removed and its lane freed, as
/// long as a round is still running.
fn despawn_escaped(
    time: Res<Time<Virtual>>,
    mode: Res<State<GameMode>>,
    mut escaped: Query<(Entity, &Target, &mut Escaped)>,
    mut controllers: Query<&mut TargetController>,
    mut commands: Commands,
) {
    for (entity, target, mut escape) in &mut escaped {
        escape.cooldown -= time.delta_secs();
        if escape.cooldown > 0.0 || *mode.get() == GameMode::Idle {
            continue;
        }

        commands.entity(entity).despawn();
        if let TargetKind::Prop { controller } = target.kind {
            if let Ok(mut controller) = controllers.get_mut(controller) {
                controller.state = ControllerState::Idle;
            }
        }
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Patrol>();
    app.register_type::<Escaped>();

    app.add_systems(
        Update,
        (move_patrols, despawn_escaped)
            .chain()
            .in_set(GameSet::Targets)
            .run_if(gameplay_running),
    );
}
