//! Bullet holes left by shots that hit nothing interesting.

use bevy::prelude::*;

use crate::{GameState, Z_DECAL};

const BULLET_HOLE_SIZE: Vec2 = Vec2::new(0.12, 0.12);
const BULLET_HOLE_COLOR: Color = Color::srgb(0.08, 0.08, 0.08);

/// Paint a bullet hole at a world point. Holes persist until the range
/// is left.
#[derive(Message, Debug, Clone, Copy)]
pub struct SpawnBulletHole {
    pub point: Vec2,
}

/// Marker for painted bullet holes.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct BulletHole;

fn spawn_bullet_holes(mut requests: MessageReader<SpawnBulletHole>, mut commands: Commands) {
    for request in requests.read() {
        commands.spawn((
            Name::new("Bullet Hole"),
            BulletHole,
            Sprite::from_color(BULLET_HOLE_COLOR, BULLET_HOLE_SIZE),
            Transform::from_translation(request.point.extend(Z_DECAL)),
            DespawnOnExit(GameState::InRange),
        ));
    }
}

pub(super) fn plugin(app: &mut App) {
    app.register_type::<BulletHole>();
    app.add_message::<SpawnBulletHole>();

    app.add_systems(Update, spawn_bullet_holes);
}
