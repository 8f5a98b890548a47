//! Timed despawn for short-lived entities (muzzle flashes, floating
//! score text, penalty indicators, spent targets).

use bevy::prelude::*;

use crate::GameSet;

/// Seconds until this entity is despawned. Never removed early.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Lifetime(pub f32);

fn tick_lifetimes(
    time: Res<Time<Virtual>>,
    mut query: Query<(Entity, &mut Lifetime)>,
    mut commands: Commands,
) {
    for (entity, mut lifetime) in &mut query {
        lifetime.0 -= time.delta_secs();
        if lifetime.0 <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Lifetime>();

    app.add_systems(Update, tick_lifetimes.in_set(GameSet::Targets));
}
