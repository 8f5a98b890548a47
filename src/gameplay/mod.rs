//! Gameplay rules: session state, weapons, fire control, hit
//! resolution, targets, scoring, and the supporting pieces.

pub mod audio;
pub mod decal;
pub mod fire_control;
pub mod hits;
pub mod hud;
pub mod lifetime;
pub mod scoring;
pub mod session;
pub mod targets;
pub mod weapons;

use bevy::prelude::*;

pub fn plugin(app: &mut App) {
    app.add_plugins((
        session::plugin,
        weapons::plugin,
        fire_control::plugin,
        hits::plugin,
        targets::plugin,
        scoring::plugin,
        lifetime::plugin,
        decal::plugin,
        hud::plugin,
        audio::plugin,
    ));
}
