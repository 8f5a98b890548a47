//! In-range HUD: score readout, round timer, and the cursor crosshair.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::gameplay::session::{GameMode, POP_UP_ROUND_COUNT, RoundStats, Session};
use crate::theme::palette;
use crate::{GameSet, GameState, Z_CROSSHAIR, gameplay_running};

// === Components ===

/// Marker for the points/shots/targets text block.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PointsDisplay;

/// Marker for the round-timer text block.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct TimerDisplay;

/// Marker for the world-space crosshair sprite.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Crosshair;

// === Pure Functions ===

/// The timer block's contents for the given mode.
#[must_use]
pub fn timer_text(mode: GameMode, clock: f32, pop_ups_left: u32) -> String {
    match mode {
        GameMode::TimedBox | GameMode::TimedMoving => {
            format!("Time Left: {clock:.2}s")
        }
        GameMode::HumanTarget => format!(
            "Time Elapsed: {clock:.2}s\nTargets: {pop_ups_left} / {POP_UP_ROUND_COUNT}"
        ),
        GameMode::Idle => String::new(),
    }
}

// === Systems ===

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Name::new("Points Display"),
        PointsDisplay,
        Text::new("Points: 0"),
        TextFont::from_font_size(palette::FONT_SIZE_HUD),
        TextColor(palette::HEADER_TEXT),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(10.0),
            ..default()
        },
        DespawnOnExit(GameState::InRange),
    ));

    commands.spawn((
        Name::new("Timer Display"),
        TimerDisplay,
        Text::new(""),
        TextFont::from_font_size(palette::FONT_SIZE_HUD),
        TextColor(palette::HEADER_TEXT),
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(10.0),
            top: Val::Px(10.0),
            ..default()
        },
        DespawnOnExit(GameState::InRange),
    ));
}

fn update_points_text(
    stats: Res<RoundStats>,
    mut text: Single<&mut Text, With<PointsDisplay>>,
) {
    **text = Text::new(format!(
        "Points: {}\nShots Fired: {}\nTargets Hit: {}",
        stats.points, stats.shots_fired, stats.targets_destroyed
    ));
}

fn update_timer_text(
    mode: Res<State<GameMode>>,
    session: Res<Session>,
    stats: Res<RoundStats>,
    mut text: Single<&mut Text, With<TimerDisplay>>,
) {
    **text = Text::new(timer_text(*mode.get(), session.clock, stats.pop_ups_left));
}

/// Keep the crosshair sprite under the cursor.
fn move_crosshair(
    camera: Single<(&Camera, &GlobalTransform)>,
    window: Single<&Window, With<PrimaryWindow>>,
    mut crosshair: Single<&mut Transform, With<Crosshair>>,
) {
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let (camera, camera_transform) = *camera;
    let Ok(point) = camera.viewport_to_world_2d(camera_transform, cursor) else {
        return;
    };
    crosshair.translation = point.extend(Z_CROSSHAIR);
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<PointsDisplay>();
    app.register_type::<TimerDisplay>();
    app.register_type::<Crosshair>();

    app.add_systems(OnEnter(GameState::InRange), spawn_hud);
    app.add_systems(
        Update,
        (update_points_text, update_timer_text, move_crosshair)
            .in_set(GameSet::Ui)
            .run_if(gameplay_running),
    );
}
