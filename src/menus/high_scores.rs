//! High-score table overlay.

use bevy::prelude::*;

use super::Menu;
use crate::gameplay::session::GameMode;
use crate::high_scores::{HighScores, lower_is_better};
use crate::theme::{palette, widget};

/// Rows shown per mode.
const TOP_DISPLAY: usize = 20;

const BOARDS: [(GameMode, &str); 3] = [
    (GameMode::TimedBox, "Timed Boxes"),
    (GameMode::TimedMoving, "Moving Targets"),
    (GameMode::HumanTarget, "Pop-Up Targets"),
];

/// One table line. Times show seconds, points show whole numbers.
#[must_use]
pub fn format_entry(rank: usize, name: &str, score: f32, mode: GameMode) -> String {
    if lower_is_better(mode) {
        format!("{rank:>2}. {name:<9} {score:>8.2}s")
    } else {
        format!("{rank:>2}. {name:<9} {score:>8.0}")
    }
}

fn spawn_high_scores(scores: Option<Res<HighScores>>, mut commands: Commands) {
    let root = commands
        .spawn((
            widget::ui_root("High Scores Menu"),
            BackgroundColor(palette::OVERLAY_BACKGROUND),
            GlobalZIndex(1),
            DespawnOnExit(Menu::HighScores),
        ))
        .id();

    commands.entity(root).with_children(|parent| {
        parent
            .spawn((
                Name::new("High Scores Panel"),
                Node {
                    flex_direction: FlexDirection::Row,
                    column_gap: Val::Px(40.0),
                    align_items: AlignItems::FlexStart,
                    padding: UiRect::all(Val::Px(36.0)),
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BackgroundColor(palette::PANEL_BACKGROUND),
                BorderColor::all(palette::PANEL_BORDER),
            ))
            .with_children(|panel| {
                for (mode, title) in BOARDS {
                    panel
                        .spawn((
                            Name::new("Score Board"),
                            Node {
                                flex_direction: FlexDirection::Column,
                                row_gap: Val::Px(4.0),
                                ..default()
                            },
                        ))
                        .with_children(|board| {
                            board.spawn(widget::label(title));
                            let entries = scores
                                .as_deref()
                                .map(|s| s.entries(mode))
                                .unwrap_or_default();
                            if entries.is_empty() {
                                board.spawn(widget::body("no scores yet"));
                            }
                            for (i, entry) in entries.iter().take(TOP_DISPLAY).enumerate() {
                                board.spawn((
                                    Text::new(format_entry(
                                        i + 1,
                                        &entry.name,
                                        entry.score,
                                        mode,
                                    )),
                                    TextFont::from_font_size(palette::FONT_SIZE_BODY),
                                    TextColor(palette::SCORE_TEXT),
                                ));
                            }
                        });
                }
            });

        parent.spawn(widget::button(
            "Back",
            |_: On<Pointer<Click>>, mut next_menu: ResMut<NextState<Menu>>| {
                next_menu.set(Menu::Pause);
            },
        ));
    });
}

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Menu::HighScores), spawn_high_scores);
}


#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::testing::{assert_entity_count, create_overlay_test_app};

    #[test]
    fn empty_boards_still_render() {
        let mut app = create_overlay_test_app(plugin, Menu::HighScores);

        // Three "no scores yet" rows, three titles, one back button.
        assert_entity_count::<With<Button>>(&mut app, 1);
    }

    #[test]
    fn boards_list_saved_entries() {
        let mut app = create_overlay_test_app(
            |app: &mut App| {
                let mut scores = HighScores::default();
                scores.add(GameMode::TimedBox, "ann", 75.0);
                scores.add(GameMode::TimedBox, "bob", 40.0);
                app.insert_resource(scores);
                plugin(app);
            },
            Menu::HighScores,
        );

        let mut texts = app.world_mut().query::<&Text>();
        let listed = texts
            .iter(app.world())
            .filter(|t| t.0.contains("ann") || t.0.contains("bob"))
            .count();
        assert_entity_count::<With<Button>>(&mut app, 1);
        assert_eq!(listed, 2);
    }
}
