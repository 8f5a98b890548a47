//! Sound playback. Gameplay systems queue [`SoundCue`] messages; one
//! system here turns them into one-shot audio entities.

use bevy::audio::Volume;
use bevy::prelude::*;

// === Types ===

/// The game's sound effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum SoundKind {
    RifleShot,
    PistolShot,
    /// Bullet striking a target (also played on destruction).
    MetalImpact,
}

/// Request to play one sound effect this frame.
#[derive(Message, Debug, Clone, Copy)]
pub struct SoundCue(pub SoundKind);

/// Handles for the sound effects, loaded on the loading screen. Systems
/// take it as `Option<Res<..>>` so headless test apps skip playback.
#[derive(Resource, Debug, Clone)]
pub struct SoundAssets {
    pub rifle_shot: Handle<AudioSource>,
    pub pistol_shot: Handle<AudioSource>,
    pub metal_impact: Handle<AudioSource>,
}

impl SoundAssets {
    pub fn load(asset_server: &AssetServer) -> Self {
        Self {
            rifle_shot: asset_server.load("sounds/rifle.ogg"),
            pistol_shot: asset_server.load("sounds/pistol.ogg"),
            metal_impact: asset_server.load("sounds/metal.ogg"),
        }
    }

    fn handle(&self, kind: SoundKind) -> Handle<AudioSource> {
        match kind {
            SoundKind::RifleShot => self.rifle_shot.clone(),
            SoundKind::PistolShot => self.pistol_shot.clone(),
            SoundKind::MetalImpact => self.metal_impact.clone(),
        }
    }
}

// === Systems ===

fn play_sound_cues(
    mut cues: MessageReader<SoundCue>,
    assets: Option<Res<SoundAssets>>,
    mut commands: Commands,
) {
    let Some(assets) = assets else {
        cues.clear();
        return;
    };

    for SoundCue(kind) in cues.read() {
        commands.spawn((
            Name::new("Sound Effect"),
            AudioPlayer::new(assets.handle(*kind)),
            PlaybackSettings::DESPAWN.with_volume(Volume::Linear(0.6)),
        ));
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.add_message::<SoundCue>();
    app.add_systems(Update, play_sound_cues);
}
