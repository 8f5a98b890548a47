//! Dispatch of shot impacts: targets take damage, start plates start
//! rounds, everything else gets a bullet hole.

use bevy::prelude::*;

use crate::gameplay::audio::{SoundCue, SoundKind};
use crate::gameplay::decal::SpawnBulletHole;
use crate::gameplay::fire_control::ShotImpact;
use crate::gameplay::scoring::start_round;
use crate::gameplay::session::{GameMode, RoundStats, Session};
use crate::gameplay::targets::{Target, TargetHit};
use crate::gameplay::weapons::WeaponTable;
use crate::range::ModeStartPlate;
use crate::{GameSet, gameplay_running};

// === Systems ===

fn resolve_impacts(
    mut impacts: MessageReader<ShotImpact>,
    targets: Query<(), With<Target>>,
    plates: Query<&ModeStartPlate>,
    mode: Res<State<GameMode>>,
    table: Res<WeaponTable>,
    mut session: ResMut<Session>,
    mut stats: ResMut<RoundStats>,
    mut next_mode: ResMut<NextState<GameMode>>,
    mut hits: MessageWriter<TargetHit>,
    mut sounds: MessageWriter<SoundCue>,
    mut decals: MessageWriter<SpawnBulletHole>,
) {
    for impact in impacts.read() {
        if targets.contains(impact.entity) {
            stats.record_hit();
            hits.write(TargetHit {
                target: impact.entity,
                amount: table.profile(session.selected).damage,
                distance: impact.distance,
            });
            sounds.write(SoundCue(SoundKind::MetalImpact));
        } else if let Ok(plate) = plates.get(impact.entity) {
            // Plates only respond between rounds.
            if *mode.get() == GameMode::Idle {
                start_round(plate.0, &mut session, &mut stats, &mut next_mode);
            }
        } else {
            decals.write(SpawnBulletHole { point: impact.point });
        }
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        resolve_impacts
            .in_set(GameSet::Weapons)
            .run_if(gameplay_running),
    );
}
