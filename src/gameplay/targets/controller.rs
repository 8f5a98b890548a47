//! Lane spawners for the box targets. Each lane has a controller; the
//! controllers come in sibling pairs and a fresh box may appear on
//! either lane of the pair.

use avian2d::prelude::Collider;
use bevy::prelude::*;
use rand::Rng;

use super::movement::Patrol;
use super::Target;
use crate::gameplay::session::{GameMode, RangeRng};
use crate::{GameSet, Z_TARGET, gameplay_running};

// === Constants ===

/// The lane draw samples this symmetric range.
pub const LANE_DRAW_RANGE: f32 = 1000.0;

/// Default draw threshold above which the sibling lane is used
/// (roughly a quarter of draws).
pub const DEFAULT_SIBLING_SPLIT: f32 = 500.0;

/// Box patrol speed (units/s) in the slow mode.
pub const PROP_SPEED_BOX: f32 = 3.0;

/// Box patrol speed in the fast mode.
pub const PROP_SPEED_MOVING: f32 = 4.5;

/// Box sprite and collider size.
pub const PROP_SIZE: Vec2 = Vec2::new(1.2, 1.2);

const PROP_COLOR: Color = Color::srgb(0.72, 0.52, 0.3);

// === Components ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum ControllerState {
    /// No live box; may spawn.
    #[default]
    Idle,
    /// A box from this controller is on the range.
    Busy,
}

/// One lane's box spawner.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct TargetController {
    pub state: ControllerState,
    /// The paired lane's controller.
    pub sibling: Entity,
    /// Lane draws at or above this (out of `±LANE_DRAW_RANGE`) place the
    /// box on the sibling lane instead.
    pub sibling_split: f32,
    /// Boxes patrol this far to either side of the lane center.
    pub patrol_half_width: f32,
}

impl TargetController {
    #[must_use]
    pub const fn new(sibling: Entity, patrol_half_width: f32) -> Self {
        Self {
            state: ControllerState::Idle,
            sibling,
            sibling_split: DEFAULT_SIBLING_SPLIT,
            patrol_half_width,
        }
    }

    #[cfg(test)]
    pub(crate) const fn busy_for_test(sibling: Entity) -> Self {
        Self {
            state: ControllerState::Busy,
            sibling,
            sibling_split: DEFAULT_SIBLING_SPLIT,
            patrol_half_width: 6.0,
        }
    }
}

// === Pure Functions ===

/// Whether a lane draw lands on the sibling lane.
#[must_use]
pub fn draw_picks_sibling(draw: f32, split: f32) -> bool {
    draw >= split
}

/// Box patrol speed for the given mode. Zero outside the box modes.
#[must_use]
pub const fn prop_speed(mode: GameMode) -> f32 {
    match mode {
        GameMode::TimedBox => PROP_SPEED_BOX,
        GameMode::TimedMoving => PROP_SPEED_MOVING,
        GameMode::Idle | GameMode::HumanTarget => 0.0,
    }
}

// === Systems ===

/// Every idle controller puts a new box on a lane of its pair.
fn spawn_boxes(
    mode: Res<State<GameMode>>,
    mut rng: ResMut<RangeRng>,
    mut controllers: Query<(Entity, &mut TargetController, &Transform)>,
    lane_positions: Query<&Transform, With<TargetController>>,
    mut commands: Commands,
) {
    let mode = *mode.get();
    if !mode.spawns_boxes() {
        return;
    }

    for (entity, mut controller, transform) in &mut controllers {
        if controller.state != ControllerState::Idle {
            continue;
        }

        let draw = rng.random_range(-LANE_DRAW_RANGE..LANE_DRAW_RANGE);
        let lane = if draw_picks_sibling(draw, controller.sibling_split) {
            lane_positions
                .get(controller.sibling)
                .copied()
                .unwrap_or(*transform)
        } else {
            *transform
        };

        let mut pos = lane.translation;
        pos.z = Z_TARGET;
        commands.spawn((
            Name::new("Box Target"),
            Target::prop(entity),
            Patrol::new(prop_speed(mode), lane.translation.x, controller.patrol_half_width),
            Sprite::from_color(PROP_COLOR, PROP_SIZE),
            Transform::from_translation(pos),
            Collider::rectangle(PROP_SIZE.x, PROP_SIZE.y),
            DespawnOnExit(mode),
        ));

        controller.state = ControllerState::Busy;
        debug!("spawned box target");
    }
}

/// Controllers go idle when the range empties back out.
fn reset_controllers(mut controllers: Query<&mut TargetController>) {
    for mut controller in &mut controllers {
        controller.state = ControllerState::Idle;
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<TargetController>();

    app.add_systems(OnEnter(GameMode::Idle), reset_controllers);
    app.add_systems(
        Update,
        spawn_boxes
            .in_set(GameSet::Targets)
            .run_if(gameplay_running),
    );
}


#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::gameplay::session::RangeRng;
    use crate::testing::{assert_entity_count, create_gameplay_test_app, set_mode};
    use pretty_assertions::assert_eq;

    fn create_controller_test_app() -> App {
        let mut app = create_gameplay_test_app();
        app.insert_resource(RangeRng::seeded(3));
        app.add_systems(OnEnter(GameMode::Idle), reset_controllers);
        app.add_systems(Update, spawn_boxes);
        app
    }

    fn spawn_pair(app: &mut App) -> (Entity, Entity) {
        let a = app
            .world_mut()
            .spawn(Transform::from_xyz(-4.0, 10.0, 0.0))
            .id();
        let b = app
            .world_mut()
            .spawn(Transform::from_xyz(4.0, 10.0, 0.0))
            .id();
        app.world_mut()
            .entity_mut(a)
            .insert(TargetController::new(b, 6.0));
        app.world_mut()
            .entity_mut(b)
            .insert(TargetController::new(a, 6.0));
        (a, b)
    }

    #[test]
    fn idle_controllers_spawn_one_box_each() {
        let mut app = create_controller_test_app();
        spawn_pair(&mut app);
        set_mode(&mut app, GameMode::TimedBox);

        app.update();
        assert_entity_count::<With<Target>>(&mut app, 2);

        // Both controllers are now busy; no further spawns.
        app.update();
        assert_entity_count::<With<Target>>(&mut app, 2);
    }

    #[test]
    fn no_spawns_while_idle() {
        let mut app = create_controller_test_app();
        spawn_pair(&mut app);

        app.update();
        assert_entity_count::<With<Target>>(&mut app, 0);
    }

    #[test]
    fn controllers_reset_when_round_ends() {
        let mut app = create_controller_test_app();
        let (a, _) = spawn_pair(&mut app);
        set_mode(&mut app, GameMode::TimedBox);
        app.update();

        set_mode(&mut app, GameMode::Idle);
        app.update();

        let controller = app.world().get::<TargetController>(a).unwrap();
        assert_eq!(controller.state, ControllerState::Idle);
        // Scoped despawn removed the round's boxes.
        assert_entity_count::<With<Target>>(&mut app, 0);
    }
}
