//! Range scene construction: camera, backstop, box lanes, the pop-up
//! row, mode start plates, and the crosshair.

use avian2d::prelude::{Collider, RigidBody};
use bevy::prelude::*;
use bevy::camera::ScalingMode;

use crate::gameplay::hud::Crosshair;
use crate::gameplay::session::GameMode;
use crate::gameplay::targets::popup::{SILHOUETTE_COLOR, SILHOUETTE_SIZE, Silhouette};
use crate::gameplay::targets::{Target, TargetController};
use crate::{GameState, Z_CROSSHAIR, Z_RANGE, Z_TARGET};

// === Constants ===

/// Where bullets leave the player's weapon.
pub const MUZZLE: Vec2 = Vec2::new(0.0, -13.0);

/// Vertical world height the camera shows.
const VIEW_HEIGHT: f32 = 32.0;

/// Box lane pairs: (left x, right x, y). Farther lanes pay more points.
const LANE_PAIRS: [(f32, f32, f32); 3] = [(-10.0, -6.0, 6.0), (-2.0, 2.0, 9.0), (6.0, 10.0, 12.0)];

/// Boxes patrol this far around their lane center.
const LANE_HALF_WIDTH: f32 = 1.8;

/// The 18 silhouettes stand in one row at this height.
const SILHOUETTE_ROW_Y: f32 = 3.0;
const SILHOUETTE_SPACING: f32 = 1.0;

const PLATE_Y: f32 = -8.0;
const PLATE_SIZE: Vec2 = Vec2::new(1.6, 1.0);

const BACKSTOP_COLOR: Color = Color::srgb(0.25, 0.27, 0.3);
const FLOOR_COLOR: Color = Color::srgb(0.18, 0.2, 0.22);
const PLATE_COLOR: Color = Color::srgb(0.2, 0.45, 0.25);
const CROSSHAIR_COLOR: Color = Color::srgb(0.95, 0.95, 0.95);

// === Components ===

/// Shooting this plate while the range is idle starts the given mode.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct ModeStartPlate(pub GameMode);

// === Systems ===

fn spawn_range(mut commands: Commands) {
    commands.spawn((
        Name::new("Range Camera"),
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: VIEW_HEIGHT,
            },
            ..OrthographicProjection::default_2d()
        }),
        DespawnOnExit(GameState::InRange),
    ));

    commands.spawn((
        Name::new("Range Floor"),
        Sprite::from_color(FLOOR_COLOR, Vec2::new(40.0, VIEW_HEIGHT)),
        Transform::from_xyz(0.0, 0.0, Z_RANGE),
        DespawnOnExit(GameState::InRange),
    ));

    // Backstop wall; soaks every shot that misses everything else.
    commands.spawn((
        Name::new("Backstop"),
        Sprite::from_color(BACKSTOP_COLOR, Vec2::new(40.0, 2.0)),
        Transform::from_xyz(0.0, 15.0, Z_RANGE + 0.5),
        RigidBody::Static,
        Collider::rectangle(40.0, 2.0),
        DespawnOnExit(GameState::InRange),
    ));

    spawn_lane_controllers(&mut commands);
    spawn_silhouettes(&mut commands);
    spawn_start_plates(&mut commands);

    commands.spawn((
        Name::new("Crosshair"),
        Crosshair,
        Sprite::from_color(CROSSHAIR_COLOR, Vec2::new(0.25, 0.25)),
        Transform::from_xyz(0.0, 0.0, Z_CROSSHAIR),
        DespawnOnExit(GameState::InRange),
    ));
}

/// Three sibling pairs of box spawners.
fn spawn_lane_controllers(commands: &mut Commands) {
    for (left_x, right_x, y) in LANE_PAIRS {
        let left = commands
            .spawn((
                Name::new("Lane Controller"),
                Transform::from_xyz(left_x, y, Z_TARGET),
                DespawnOnExit(GameState::InRange),
            ))
            .id();
        let right = commands
            .spawn((
                Name::new("Lane Controller"),
                Transform::from_xyz(right_x, y, Z_TARGET),
                DespawnOnExit(GameState::InRange),
            ))
            .id();
        commands
            .entity(left)
            .insert(TargetController::new(right, LANE_HALF_WIDTH));
        commands
            .entity(right)
            .insert(TargetController::new(left, LANE_HALF_WIDTH));
    }
}

/// The pop-up row. Silhouettes start lowered and get their colliders
/// only while shown.
fn spawn_silhouettes(commands: &mut Commands) {
    #[allow(clippy::cast_precision_loss)]
    let first_x = -(17.0 * SILHOUETTE_SPACING) / 2.0;
    for i in 0..18 {
        #[allow(clippy::cast_precision_loss)]
        let home = Vec2::new(
            (i as f32).mul_add(SILHOUETTE_SPACING, first_x),
            SILHOUETTE_ROW_Y,
        );
        commands.spawn((
            Name::new("Silhouette"),
            Silhouette { home },
            Target::pop_up(),
            Sprite::from_color(SILHOUETTE_COLOR, SILHOUETTE_SIZE),
            Transform::from_translation(home.extend(Z_TARGET)),
            DespawnOnExit(GameState::InRange),
        ));
    }
}

fn spawn_start_plates(commands: &mut Commands) {
    let plates = [
        (-4.0, GameMode::TimedBox, "Boxes"),
        (0.0, GameMode::TimedMoving, "Moving"),
        (4.0, GameMode::HumanTarget, "Pop-Ups"),
    ];
    for (x, mode, label) in plates {
        commands.spawn((
            Name::new("Start Plate"),
            ModeStartPlate(mode),
            Sprite::from_color(PLATE_COLOR, PLATE_SIZE),
            Transform::from_xyz(x, PLATE_Y, Z_TARGET),
            RigidBody::Static,
            Collider::rectangle(PLATE_SIZE.x, PLATE_SIZE.y),
            DespawnOnExit(GameState::InRange),
            children![(
                Text2d::new(label),
                TextColor(Color::WHITE),
                Transform::from_xyz(0.0, 1.2, 0.1).with_scale(Vec3::splat(0.02)),
            )],
        ));
    }
}

// === Plugin ===

pub fn plugin(app: &mut App) {
    app.register_type::<ModeStartPlate>();

    app.add_systems(OnEnter(GameState::InRange), spawn_range);
}
