//! End-of-round results overlay: summary readout, name entry, and the
//! high-score save flow.

use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;

use super::Menu;
use crate::gameplay::session::{RoundSummary, Session};
use crate::high_scores::{HighScores, MAX_NAME_LEN, ScoreFilePath, lower_is_better};
use crate::theme::{palette, widget};

/// Scores below one point are not worth writing down.
const MIN_SAVABLE_SCORE: f32 = 1.0;

// === Resources ===

/// The name being typed into the results panel.
#[derive(Resource, Debug, Default)]
struct NameBuffer(String);

/// Marker for the text element echoing [`NameBuffer`].
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
struct NameDisplay;

// === Pure Functions ===

/// The summary block of the results panel.
#[must_use]
pub fn summary_text(summary: &RoundSummary) -> String {
    #[allow(clippy::cast_precision_loss)]
    let accuracy = if summary.shots_fired == 0 {
        0.0
    } else {
        summary.shots_hit as f32 / summary.shots_fired as f32
    };
    let score = if lower_is_better(summary.mode) {
        format!("{:.2}s", summary.score)
    } else {
        format!("{:.0}", summary.score)
    };
    format!(
        "Points earned: {}\nAccuracy: {:.2}%\nTargets destroyed: {}\n\nFINAL SCORE: {score} !!!",
        summary.points,
        accuracy * 100.0,
        summary.targets_destroyed,
    )
}

// === Systems ===

fn spawn_results_menu(
    session: Res<Session>,
    mut buffer: ResMut<NameBuffer>,
    mut commands: Commands,
) {
    buffer.0.clear();

    let summary = session.summary.map_or_else(
        || "No round on record.".to_string(),
        |s| summary_text(&s),
    );

    commands.spawn((
        widget::ui_root("Results Menu"),
        BackgroundColor(palette::OVERLAY_BACKGROUND),
        GlobalZIndex(1),
        DespawnOnExit(Menu::Results),
        children![(
            widget::panel("Results Panel"),
            children![
                widget::header("ROUND RESULTS"),
                widget::label(summary),
                widget::body("Type a name to save your score:"),
                (
                    NameDisplay,
                    Text::new("_"),
                    TextFont::from_font_size(palette::FONT_SIZE_LABEL),
                    TextColor(palette::SCORE_TEXT),
                ),
                widget::button("Save Score", save_score),
                widget::button(
                    "Close",
                    |_: On<Pointer<Click>>, mut next_menu: ResMut<NextState<Menu>>| {
                        next_menu.set(Menu::None);
                    },
                ),
            ],
        )],
    ));
}

fn save_score(
    _: On<Pointer<Click>>,
    session: Res<Session>,
    buffer: Res<NameBuffer>,
    scores: Option<ResMut<HighScores>>,
    path: Res<ScoreFilePath>,
    mut next_menu: ResMut<NextState<Menu>>,
) {
    let Some(summary) = session.summary else {
        return;
    };
    if summary.score < MIN_SAVABLE_SCORE {
        info!("score below {MIN_SAVABLE_SCORE}, not saved");
        next_menu.set(Menu::None);
        return;
    }
    let Some(mut scores) = scores else {
        return;
    };

    scores.add(summary.mode, &buffer.0, summary.score);
    if let Err(err) = scores.save(&path.0) {
        warn!("failed to write {:?}: {err}", path.0);
    }
    next_menu.set(Menu::None);
}

/// Collect typed characters into the name buffer.
fn type_name(
    mut keys: MessageReader<KeyboardInput>,
    mut buffer: ResMut<NameBuffer>,
    mut display: Single<&mut Text, With<NameDisplay>>,
) {
    for key in keys.read() {
        if key.state != ButtonState::Pressed {
            continue;
        }
        match &key.logical_key {
            Key::Character(text) => {
                for c in text.chars().filter(|c| !c.is_control()) {
                    if buffer.0.chars().count() < MAX_NAME_LEN {
                        buffer.0.push(c);
                    }
                }
            }
            Key::Space => {
                if buffer.0.chars().count() < MAX_NAME_LEN {
                    buffer.0.push(' ');
                }
            }
            Key::Backspace => {
                buffer.0.pop();
            }
            _ => {}
        }
    }

    **display = Text::new(format!("{}_", buffer.0));
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<NameDisplay>();
    app.init_resource::<NameBuffer>();

    app.add_systems(OnEnter(Menu::Results), spawn_results_menu);
    app.add_systems(Update, type_name.run_if(in_state(Menu::Results)));
}


#[cfg(test)]
mod integration_tests {
    use super::*;
    use bevy::input::keyboard::KeyboardInput;
    use pretty_assertions::assert_eq;

    fn create_typing_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_message::<KeyboardInput>();
        app.init_resource::<NameBuffer>();
        app.add_systems(Update, type_name);
        app.world_mut().spawn((NameDisplay, Text::new("_")));
        app
    }

    fn press(app: &mut App, logical_key: Key) {
        let window = app.world_mut().spawn_empty().id();
        app.world_mut().write_message(KeyboardInput {
            key_code: KeyCode::KeyA,
            logical_key,
            state: ButtonState::Pressed,
            text: None,
            repeat: false,
            window,
        });
        app.update();
    }

    #[test]
    fn typed_characters_fill_the_buffer() {
        let mut app = create_typing_test_app();

        press(&mut app, Key::Character("a".into()));
        press(&mut app, Key::Character("b".into()));

        assert_eq!(app.world().resource::<NameBuffer>().0, "ab");
    }

    #[test]
    fn backspace_removes_the_last_character() {
        let mut app = create_typing_test_app();

        press(&mut app, Key::Character("h".into()));
        press(&mut app, Key::Character("i".into()));
        press(&mut app, Key::Backspace);

        assert_eq!(app.world().resource::<NameBuffer>().0, "h");
    }

    #[test]
    fn buffer_stops_at_nine_characters() {
        let mut app = create_typing_test_app();

        for _ in 0..12 {
            press(&mut app, Key::Character("x".into()));
        }

        assert_eq!(app.world().resource::<NameBuffer>().0.chars().count(), 9);
    }
}
