//! Loading screen: kick off asset loads, then head to the range.

use bevy::prelude::*;

use crate::GameState;
use crate::gameplay::audio::SoundAssets;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::Loading), setup_loading_screen)
        .add_systems(
            Update,
            check_loading_complete.run_if(in_state(GameState::Loading)),
        );
}

fn setup_loading_screen(asset_server: Option<Res<AssetServer>>, mut commands: Commands) {
    commands.spawn((
        crate::theme::widget::ui_root("Loading Screen"),
        DespawnOnExit(GameState::Loading),
        children![crate::theme::widget::header("Loading...")],
    ));

    // Headless test apps have no asset server; sound stays off there.
    if let Some(asset_server) = asset_server {
        commands.insert_resource(SoundAssets::load(&asset_server));
    }
}

/// Handles load asynchronously, so one frame of loading is enough.
fn check_loading_complete(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InRange);
}
