//! Weapon definitions and weapon switching.

use bevy::prelude::*;

use crate::gameplay::audio::SoundKind;
use crate::gameplay::fire_control::FireControl;
use crate::gameplay::session::Session;
use crate::{GameSet, gameplay_running};

// === Types ===

/// The two weapons on the rack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum WeaponId {
    /// Automatic rifle, key 1.
    Rifle,
    /// Semi-automatic pistol, key 2.
    Pistol,
}

/// Read-only stats record for one weapon.
#[derive(Debug, Clone, Copy, Reflect)]
pub struct WeaponProfile {
    pub name: &'static str,
    /// Minimum seconds between shots.
    pub fire_interval: f32,
    /// Automatic weapons keep firing while the trigger is held;
    /// semi-automatic ones need a release between shots.
    pub automatic: bool,
    /// Cap (seconds) on the sustained-fire spread accumulator.
    pub max_spread_time: f32,
    /// Scales the spread accumulator into an aim offset.
    pub spread_factor: f32,
    /// Health removed from a target per hit.
    pub damage: f32,
    /// Shot report sound.
    pub sound: SoundKind,
}

/// Lookup table for weapon stats.
#[derive(Resource, Debug, Reflect)]
#[reflect(Resource)]
pub struct WeaponTable {
    rifle: WeaponProfile,
    pistol: WeaponProfile,
}

impl WeaponTable {
    #[must_use]
    pub const fn profile(&self, id: WeaponId) -> &WeaponProfile {
        match id {
            WeaponId::Rifle => &self.rifle,
            WeaponId::Pistol => &self.pistol,
        }
    }
}

impl Default for WeaponTable {
    fn default() -> Self {
        Self {
            rifle: WeaponProfile {
                name: "Rifle",
                fire_interval: 0.100,
                automatic: true,
                max_spread_time: 1.5,
                spread_factor: 75.0,
                damage: 20.0,
                sound: SoundKind::RifleShot,
            },
            pistol: WeaponProfile {
                name: "Pistol",
                fire_interval: 0.15,
                automatic: false,
                max_spread_time: 1.5,
                spread_factor: 75.0,
                damage: 20.0,
                sound: SoundKind::PistolShot,
            },
        }
    }
}

// === Systems ===

/// Keys 1/2 swap between the primary and secondary weapon. Switching
/// resets the spread accumulator.
fn switch_weapon(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<Session>,
    mut fire_control: ResMut<FireControl>,
) {
    let wanted = if keyboard.just_pressed(KeyCode::Digit1) {
        Some(session.primary)
    } else if keyboard.just_pressed(KeyCode::Digit2) {
        Some(session.secondary)
    } else {
        None
    };

    let Some(wanted) = wanted else {
        return;
    };
    if wanted == session.selected {
        return;
    }

    session.selected = wanted;
    fire_control.burst_secs = 0.0;
    debug!("switched weapon to {wanted:?}");
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<WeaponTable>();
    app.init_resource::<WeaponTable>();

    app.add_systems(
        Update,
        switch_weapon.in_set(GameSet::Input).run_if(gameplay_running),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rifle_fires_faster_than_pistol() {
        let table = WeaponTable::default();
        assert!(
            table.profile(WeaponId::Rifle).fire_interval
                < table.profile(WeaponId::Pistol).fire_interval
        );
    }

    #[test]
    fn only_the_rifle_is_automatic() {
        let table = WeaponTable::default();
        assert!(table.profile(WeaponId::Rifle).automatic);
        assert!(!table.profile(WeaponId::Pistol).automatic);
    }

    #[test]
    fn both_weapons_deal_standard_damage() {
        let table = WeaponTable::default();
        assert_eq!(table.profile(WeaponId::Rifle).damage, 20.0);
        assert_eq!(table.profile(WeaponId::Pistol).damage, 20.0);
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::gameplay::session::Session;
    use pretty_assertions::assert_eq;

    fn create_switch_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<ButtonInput<KeyCode>>();
        app.init_resource::<Session>();
        app.init_resource::<FireControl>();
        app.init_resource::<WeaponTable>();
        app.add_systems(Update, switch_weapon);
        app
    }

    #[test]
    fn key_two_selects_secondary_and_resets_burst() {
        let mut app = create_switch_test_app();
        app.world_mut().resource_mut::<FireControl>().burst_secs = 1.2;

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Digit2);
        app.update();

        assert_eq!(
            app.world().resource::<Session>().selected,
            WeaponId::Pistol
        );
        assert_eq!(app.world().resource::<FireControl>().burst_secs, 0.0);
    }

    #[test]
    fn reselecting_current_weapon_keeps_burst() {
        let mut app = create_switch_test_app();
        app.world_mut().resource_mut::<FireControl>().burst_secs = 0.8;

        // Rifle is already selected.
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Digit1);
        app.update();

        assert_eq!(app.world().resource::<FireControl>().burst_secs, 0.8);
    }
}
