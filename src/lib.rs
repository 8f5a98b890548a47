//! Shooting-range game library.
//!
//! Gameplay logic for a first-person shooting gallery: three game modes
//! (timed boxes, timed moving targets, pop-up silhouettes), weapon fire
//! control with spread, per-lane target spawners, scoring, and high-score
//! persistence. Rendering, physics, audio, and UI widgets come from the
//! Bevy/avian stack; everything in this crate is game rules.

pub mod gameplay;
pub mod high_scores;
pub mod menus;
pub mod range;
pub mod screens;
#[cfg(test)]
pub mod testing;
pub mod theme;

use bevy::prelude::*;

/// Primary game states.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Initial asset-loading state.
    #[default]
    Loading,
    /// The player is on the range. Game modes are started by shooting
    /// the mode start plates, not by a separate screen.
    InRange,
}

/// Frame ordering for gameplay systems. Sets run in declaration order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSet {
    /// Input polling and weapon selection.
    Input,
    /// Fire control: shot emission and the per-shot raycast.
    Weapons,
    /// Hit application, spawners, target movement, pop-up director.
    Targets,
    /// Round clocks, round end detection, score computation.
    Scoring,
    /// HUD text and crosshair updates.
    Ui,
}

// === Z Layers ===

pub const Z_RANGE: f32 = 0.0;
pub const Z_TARGET: f32 = 2.0;
pub const Z_DECAL: f32 = 3.0;
pub const Z_EFFECT: f32 = 4.0;
pub const Z_CROSSHAIR: f32 = 10.0;

/// Run condition: the range is live (no overlay menu, not loading).
pub fn gameplay_running(game: Res<State<GameState>>, menu: Res<State<menus::Menu>>) -> bool {
    *game.get() == GameState::InRange && *menu.get() == menus::Menu::None
}

/// Top-level plugin wiring every subsystem together.
pub fn plugin(app: &mut App) {
    app.init_state::<GameState>();

    app.configure_sets(
        Update,
        (
            GameSet::Input,
            GameSet::Weapons,
            GameSet::Targets,
            GameSet::Scoring,
            GameSet::Ui,
        )
            .chain(),
    );

    app.add_plugins((
        theme::plugin,
        screens::plugin,
        menus::plugin,
        range::plugin,
        gameplay::plugin,
        high_scores::plugin,
    ));
}
