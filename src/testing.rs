//! Test utilities shared by the unit and integration test modules.

#![cfg(test)]

use bevy::ecs::query::QueryFilter;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use crate::GameState;
use crate::gameplay::session::{GameMode, RoundStats, Session};
use crate::menus::Menu;

/// Minimal app with all three state machines and the session
/// resources, but no plugins under test.
pub fn create_gameplay_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);
    app.init_state::<GameState>();
    app.init_state::<Menu>();
    app.init_state::<GameMode>();
    app.init_resource::<Session>();
    app.init_resource::<RoundStats>();
    app
}

/// App for menu overlay tests: run the given setup (usually a plugin),
/// enter the range, then open the overlay.
pub fn create_overlay_test_app(setup: impl FnOnce(&mut App), menu: Menu) -> App {
    let mut app = create_gameplay_test_app();
    setup(&mut app);
    enter_range(&mut app);
    app.world_mut()
        .resource_mut::<NextState<Menu>>()
        .set(menu);
    app.update();
    app.update();
    app
}

/// Transition into `GameState::InRange` and flush the transition.
pub fn enter_range(app: &mut App) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::InRange);
    app.update();
    app.update();
}

/// Switch the active game mode and flush the transition.
pub fn set_mode(app: &mut App, mode: GameMode) {
    app.world_mut()
        .resource_mut::<NextState<GameMode>>()
        .set(mode);
    app.update();
}

/// Assert how many entities match the filter.
pub fn assert_entity_count<F: QueryFilter>(app: &mut App, expected: usize) {
    let count = app
        .world_mut()
        .query_filtered::<(), F>()
        .iter(app.world())
        .count();
    assert_eq!(
        count, expected,
        "expected {expected} matching entities, found {count}"
    );
}
