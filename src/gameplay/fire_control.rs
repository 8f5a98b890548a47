//! Trigger handling: fire-rate and semi-auto gating, the sustained-fire
//! spread accumulator, and the per-shot raycast.

use avian2d::prelude::{SpatialQuery, SpatialQueryFilter};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use rand::Rng;

use crate::gameplay::audio::SoundCue;
use crate::gameplay::lifetime::Lifetime;
use crate::gameplay::session::{RangeRng, RoundStats, Session};
use crate::gameplay::weapons::{WeaponProfile, WeaponTable};
use crate::range::MUZZLE;
use crate::{GameSet, Z_EFFECT, gameplay_running};

// === Constants ===

/// Maximum bullet travel.
pub const MAX_SHOT_DISTANCE: f32 = 250.0;

/// Spread decays at this multiple of its growth rate once the trigger
/// is released.
pub const SPREAD_DECAY_FACTOR: f32 = 2.0;

const MUZZLE_FLASH_SECS: f32 = 0.05;
const MUZZLE_FLASH_SIZE: Vec2 = Vec2::new(0.5, 0.5);
const MUZZLE_FLASH_COLOR: Color = Color::srgb(1.0, 0.9, 0.4);

// === Messages ===

/// A shot's raycast struck something.
#[derive(Message, Debug, Clone, Copy)]
pub struct ShotImpact {
    pub entity: Entity,
    pub point: Vec2,
    /// Muzzle-to-impact distance.
    pub distance: f32,
}

// === Resources ===

/// Trigger and spread state for the wielded weapon.
#[derive(Resource, Debug, Reflect)]
#[reflect(Resource)]
pub struct FireControl {
    /// Virtual-time stamp of the last shot.
    pub last_shot_at: f32,
    /// Sustained-fire accumulator, capped at the weapon's max spread
    /// time. Reset on weapon switch.
    pub burst_secs: f32,
    /// Semi-auto gate; cleared by a shot, restored on trigger release.
    pub can_fire: bool,
    /// Whether the trigger was held on the previous frame.
    pub was_held: bool,
}

impl Default for FireControl {
    fn default() -> Self {
        Self {
            last_shot_at: f32::MIN,
            burst_secs: 0.0,
            can_fire: true,
            was_held: false,
        }
    }
}

// === Pure Functions ===

/// Advance the trigger state machine one frame. Returns true when a
/// shot fires this frame.
pub fn fire_gate(
    control: &mut FireControl,
    profile: &WeaponProfile,
    held: bool,
    now: f32,
    dt: f32,
) -> bool {
    if !held {
        control.can_fire = true;
        control.was_held = false;
        if control.burst_secs > 0.0 {
            control.burst_secs =
                (control.burst_secs - SPREAD_DECAY_FACTOR * dt).max(0.0);
        }
        return false;
    }

    if !control.can_fire {
        return false;
    }

    let fired = now - control.last_shot_at > profile.fire_interval;
    if fired {
        control.last_shot_at = now;
        if !profile.automatic {
            control.can_fire = false;
        }
    }

    // Spread only builds from the second consecutive held frame.
    if control.was_held && control.burst_secs < profile.max_spread_time {
        control.burst_secs += dt;
    }
    control.was_held = true;

    fired
}

/// Aim offset in viewport pixels for the current spread. Horizontal
/// scatter is symmetric, vertical always climbs.
pub fn spread_offset<R: Rng>(rng: &mut R, burst_secs: f32, spread_factor: f32) -> Vec2 {
    if burst_secs <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        rng.random_range(-burst_secs..burst_secs),
        rng.random_range(-burst_secs..0.0),
    ) * spread_factor
}

// === Systems ===

/// Poll the trigger and, when a shot fires, run its single raycast from
/// the muzzle toward the (spread-perturbed) cursor.
fn fire_weapon(
    mouse: Res<ButtonInput<MouseButton>>,
    time: Res<Time<Virtual>>,
    session: Res<Session>,
    table: Res<WeaponTable>,
    mut control: ResMut<FireControl>,
    mut stats: ResMut<RoundStats>,
    mut rng: ResMut<RangeRng>,
    spatial: SpatialQuery,
    camera: Single<(&Camera, &GlobalTransform)>,
    window: Single<&Window, With<PrimaryWindow>>,
    mut impacts: MessageWriter<ShotImpact>,
    mut sounds: MessageWriter<SoundCue>,
    mut commands: Commands,
) {
    let profile = *table.profile(session.selected);
    let held = mouse.pressed(MouseButton::Left);
    if !fire_gate(
        &mut control,
        &profile,
        held,
        time.elapsed_secs(),
        time.delta_secs(),
    ) {
        return;
    }

    stats.shots_fired += 1;
    sounds.write(SoundCue(profile.sound));

    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let spread = spread_offset(&mut **rng, control.burst_secs, profile.spread_factor);
    let (camera, camera_transform) = *camera;
    let Ok(aim_point) = camera.viewport_to_world_2d(camera_transform, cursor + spread) else {
        return;
    };
    let Ok(direction) = Dir2::new(aim_point - MUZZLE) else {
        return;
    };

    commands.spawn((
        Name::new("Muzzle Flash"),
        Sprite::from_color(MUZZLE_FLASH_COLOR, MUZZLE_FLASH_SIZE),
        Transform::from_translation((MUZZLE + *direction * 0.8).extend(Z_EFFECT)),
        Lifetime(MUZZLE_FLASH_SECS),
    ));

    if let Some(hit) = spatial.cast_ray(
        MUZZLE,
        direction,
        MAX_SHOT_DISTANCE,
        true,
        &SpatialQueryFilter::default(),
    ) {
        impacts.write(ShotImpact {
            entity: hit.entity,
            point: MUZZLE + *direction * hit.distance,
            distance: hit.distance,
        });
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<FireControl>();
    app.init_resource::<FireControl>();
    app.add_message::<ShotImpact>();

    app.add_systems(
        Update,
        fire_weapon
            .in_set(GameSet::Weapons)
            .run_if(gameplay_running),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::weapons::WeaponId;
    use pretty_assertions::assert_eq;

    fn rifle() -> WeaponProfile {
        *WeaponTable::default().profile(WeaponId::Rifle)
    }

    fn pistol() -> WeaponProfile {
        *WeaponTable::default().profile(WeaponId::Pistol)
    }

    #[test]
    fn first_shot_fires_immediately() {
        let mut control = FireControl::default();
        assert!(fire_gate(&mut control, &rifle(), true, 0.0, 0.016));
    }

    #[test]
    fn fire_interval_gates_consecutive_shots() {
        let mut control = FireControl::default();
        let profile = rifle();

        assert!(fire_gate(&mut control, &profile, true, 0.0, 0.016));
        // Too soon.
        assert!(!fire_gate(&mut control, &profile, true, 0.05, 0.016));
        // Past the interval.
        assert!(fire_gate(&mut control, &profile, true, 0.11, 0.016));
    }

    #[test]
    fn semi_auto_needs_a_trigger_release() {
        let mut control = FireControl::default();
        let profile = pistol();

        assert!(fire_gate(&mut control, &profile, true, 0.0, 0.016));
        // Held well past the interval: still blocked.
        assert!(!fire_gate(&mut control, &profile, true, 1.0, 0.016));
        // Release, then press again.
        assert!(!fire_gate(&mut control, &profile, false, 1.1, 0.016));
        assert!(fire_gate(&mut control, &profile, true, 1.2, 0.016));
    }

    #[test]
    fn automatic_keeps_firing_while_held() {
        let mut control = FireControl::default();
        let profile = rifle();

        let mut shots = 0;
        let mut now = 0.0;
        for _ in 0..100 {
            if fire_gate(&mut control, &profile, true, now, 0.016) {
                shots += 1;
            }
            now += 0.016;
        }
        // ~1.6 s of held trigger at a 0.1 s interval.
        assert!(shots >= 14, "expected sustained fire, got {shots} shots");
    }

    #[test]
    fn burst_grows_while_held_and_caps() {
        let mut control = FireControl::default();
        let profile = rifle();

        let mut now = 0.0;
        for _ in 0..200 {
            fire_gate(&mut control, &profile, true, now, 0.016);
            now += 0.016;
        }
        let burst = control.burst_secs;
        assert!(burst > 0.0);
        assert!(burst <= profile.max_spread_time + 0.016);
    }

    #[test]
    fn burst_decays_twice_as_fast_when_released() {
        let mut control = FireControl {
            burst_secs: 1.0,
            ..default()
        };
        let profile = rifle();

        fire_gate(&mut control, &profile, false, 0.0, 0.1);
        assert!((control.burst_secs - 0.8).abs() < 1e-4);

        // Decay never undershoots zero.
        for _ in 0..20 {
            fire_gate(&mut control, &profile, false, 0.0, 0.1);
        }
        assert_eq!(control.burst_secs, 0.0);
    }

    #[test]
    fn spread_is_zero_with_no_burst() {
        let mut rng = crate::gameplay::session::RangeRng::seeded(5);
        assert_eq!(spread_offset(&mut *rng, 0.0, 75.0), Vec2::ZERO);
    }

    #[test]
    fn spread_stays_in_bounds() {
        let mut rng = crate::gameplay::session::RangeRng::seeded(5);
        for _ in 0..500 {
            let offset = spread_offset(&mut *rng, 1.5, 75.0);
            assert!(offset.x.abs() <= 1.5 * 75.0);
            assert!(offset.y <= 0.0);
            assert!(offset.y >= -1.5 * 75.0);
        }
    }
}
