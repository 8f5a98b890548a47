//! Pause menu overlay.

use bevy::prelude::*;

use super::Menu;
use crate::theme::{palette, widget};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Menu::Pause), spawn_pause_menu);
}

fn spawn_pause_menu(mut commands: Commands) {
    commands.spawn((
        widget::ui_root("Pause Menu"),
        BackgroundColor(palette::OVERLAY_BACKGROUND),
        GlobalZIndex(1),
        DespawnOnExit(Menu::Pause),
        children![(
            widget::panel("Pause Panel"),
            children![
                widget::header("PAUSED"),
                widget::button(
                    "Resume",
                    |_: On<Pointer<Click>>, mut next_menu: ResMut<NextState<Menu>>| {
                        next_menu.set(Menu::None);
                    },
                ),
                widget::button(
                    "High Scores",
                    |_: On<Pointer<Click>>, mut next_menu: ResMut<NextState<Menu>>| {
                        next_menu.set(Menu::HighScores);
                    },
                ),
                widget::button(
                    "Exit",
                    |_: On<Pointer<Click>>, mut exit: MessageWriter<AppExit>| {
                        exit.write(AppExit::Success);
                    },
                ),
                widget::body("ESC resumes"),
            ],
        )],
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{assert_entity_count, create_overlay_test_app};

    #[test]
    fn pause_menu_spawns_its_buttons() {
        let mut app = create_overlay_test_app(plugin, Menu::Pause);

        // Resume, High Scores, Exit.
        assert_entity_count::<With<Button>>(&mut app, 3);
    }

    #[test]
    fn pause_menu_despawns_on_close() {
        let mut app = create_overlay_test_app(plugin, Menu::Pause);

        app.world_mut()
            .resource_mut::<NextState<Menu>>()
            .set(Menu::None);
        app.update();

        assert_entity_count::<With<Button>>(&mut app, 0);
    }
}
