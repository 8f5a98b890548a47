//! Button hover/press visual feedback.

use bevy::picking::hover::Hovered;
use bevy::prelude::*;
use bevy::ui::Pressed;

/// Colors for a button's none/hovered/pressed states. Add alongside
/// `Button` and `BackgroundColor`.
#[derive(Component, Debug, Reflect)]
#[reflect(Component)]
#[require(Hovered)]
pub struct InteractionPalette {
    pub none: Color,
    pub hovered: Color,
    pub pressed: Color,
}

fn apply_interaction_palette(
    mut buttons: Query<
        (
            Has<Pressed>,
            &Hovered,
            &InteractionPalette,
            &mut BackgroundColor,
        ),
        Changed<Interaction>,
    >,
) {
    for (pressed, Hovered(hovered), palette, mut background) in &mut buttons {
        *background = if pressed {
            palette.pressed
        } else if *hovered {
            palette.hovered
        } else {
            palette.none
        }
        .into();
    }
}

pub fn plugin(app: &mut App) {
    app.register_type::<InteractionPalette>();
    app.add_systems(Update, apply_interaction_palette);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_button_gets_its_none_color() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_systems(Update, apply_interaction_palette);

        let none = Color::srgb(0.9, 0.1, 0.1);
        app.world_mut().spawn((
            Button,
            BackgroundColor(Color::BLACK),
            InteractionPalette {
                none,
                hovered: Color::srgb(0.1, 0.9, 0.1),
                pressed: Color::srgb(0.1, 0.1, 0.9),
            },
            Interaction::None,
        ));
        app.update();

        let mut query = app.world_mut().query::<&BackgroundColor>();
        assert_eq!(query.single(app.world()).unwrap().0, none);
    }
}
