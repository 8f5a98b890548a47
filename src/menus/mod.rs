//! Menu overlays above the range.
//!
//! The `Menu` state is orthogonal to `GameState`: `Menu::Pause` and the
//! others appear while `GameState::InRange` stays active. Any open
//! overlay pauses virtual time, which freezes round clocks, target
//! movement, and physics.

mod high_scores;
mod pause;
mod results;

use bevy::prelude::*;

use crate::GameState;

/// Menu overlay states. Orthogonal to `GameState`.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[states(scoped_entities)]
pub enum Menu {
    /// No overlay; the range is live.
    #[default]
    None,
    /// Pause menu.
    Pause,
    /// High-score tables.
    HighScores,
    /// End-of-round results panel with name entry.
    Results,
}

pub fn plugin(app: &mut App) {
    app.init_state::<Menu>();
    app.add_plugins((pause::plugin, high_scores::plugin, results::plugin));

    // Pause/unpause virtual time when any overlay opens/closes.
    app.add_systems(OnExit(Menu::None), pause_virtual_time);
    app.add_systems(OnEnter(Menu::None), unpause_virtual_time);

    app.add_systems(
        Update,
        handle_escape.run_if(in_state(GameState::InRange)),
    );
}

fn pause_virtual_time(mut time: ResMut<Time<Virtual>>) {
    time.pause();
}

fn unpause_virtual_time(mut time: ResMut<Time<Virtual>>) {
    time.unpause();
}

/// ESC steps one overlay level back, or opens the pause menu.
fn handle_escape(
    keyboard: Res<ButtonInput<KeyCode>>,
    menu: Res<State<Menu>>,
    mut next_menu: ResMut<NextState<Menu>>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }
    next_menu.set(match menu.get() {
        Menu::None | Menu::HighScores => Menu::Pause,
        Menu::Pause | Menu::Results => Menu::None,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;
    use pretty_assertions::assert_eq;

    fn create_menu_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(StatesPlugin);
        app.init_state::<GameState>();
        app.init_state::<Menu>();
        app.init_resource::<ButtonInput<KeyCode>>();
        app.add_systems(OnExit(Menu::None), pause_virtual_time);
        app.add_systems(OnEnter(Menu::None), unpause_virtual_time);
        app.add_systems(Update, handle_escape.run_if(in_state(GameState::InRange)));
        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::InRange);
        app.update();
        app
    }

    fn press_escape(app: &mut App) {
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Escape);
        app.update();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .release(KeyCode::Escape);
        app.update();
    }

    #[test]
    fn opening_a_menu_pauses_virtual_time() {
        let mut app = create_menu_test_app();

        press_escape(&mut app);

        assert_eq!(*app.world().resource::<State<Menu>>().get(), Menu::Pause);
        assert!(app.world().resource::<Time<Virtual>>().is_paused());
    }

    #[test]
    fn closing_the_menu_unpauses() {
        let mut app = create_menu_test_app();

        press_escape(&mut app);
        press_escape(&mut app);

        assert_eq!(*app.world().resource::<State<Menu>>().get(), Menu::None);
        assert!(!app.world().resource::<Time<Virtual>>().is_paused());
    }

    #[test]
    fn escape_backs_out_of_high_scores_to_pause() {
        let mut app = create_menu_test_app();
        app.world_mut()
            .resource_mut::<NextState<Menu>>()
            .set(Menu::HighScores);
        app.update();

        press_escape(&mut app);

        assert_eq!(*app.world().resource::<State<Menu>>().get(), Menu::Pause);
    }
}
