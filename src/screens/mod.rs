//! Screen-level plugins for each `GameState`.

mod loading;

use bevy::prelude::*;

pub fn plugin(app: &mut App) {
    app.add_plugins(loading::plugin);
}
