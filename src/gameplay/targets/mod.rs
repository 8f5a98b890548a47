//! Targets: shootable props in the box lanes and the pop-up
//! silhouettes, their spawners, and their movement.

pub mod controller;
pub mod movement;
pub mod popup;
pub mod target;

use bevy::prelude::*;

pub use controller::{ControllerState, TargetController};
pub use popup::{PopUp, PopUpDirector, PopUpRole};
pub use target::TargetHit;

// === Components ===

/// Lifecycle of a target's terminal branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum TargetState {
    #[default]
    Alive,
    /// The terminal branch already ran; further hits only lower health.
    Resolved,
}

/// What kind of target this is and who owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum TargetKind {
    /// Box prop owned by a lane spawner.
    Prop { controller: Entity },
    /// Permanent pop-up silhouette driven by the director.
    PopUp,
}

/// A shootable target.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Target {
    pub health: f32,
    pub state: TargetState,
    pub kind: TargetKind,
}

impl Target {
    /// Starting health for box props and freshly reset silhouettes.
    pub const SPAWN_HEALTH: f32 = 10.0;

    #[must_use]
    pub const fn prop(controller: Entity) -> Self {
        Self {
            health: Self::SPAWN_HEALTH,
            state: TargetState::Alive,
            kind: TargetKind::Prop { controller },
        }
    }

    #[must_use]
    pub const fn pop_up() -> Self {
        Self {
            health: Self::SPAWN_HEALTH,
            state: TargetState::Alive,
            kind: TargetKind::PopUp,
        }
    }
}

// === Plugin ===

pub(in crate::gameplay) fn plugin(app: &mut App) {
    app.register_type::<Target>();

    app.add_plugins((
        target::plugin,
        controller::plugin,
        movement::plugin,
        popup::plugin,
    ));
}
