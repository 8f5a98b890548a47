//! Color and font-size tokens for the menus and HUD.

use bevy::prelude::*;

// === Text Colors ===

pub const HEADER_TEXT: Color = Color::WHITE;

/// Secondary text (prompts, hints).
pub const BODY_TEXT: Color = Color::srgb(0.72, 0.72, 0.72);

pub const BUTTON_TEXT: Color = Color::srgb(0.925, 0.925, 0.925);

/// High-score table rows.
pub const SCORE_TEXT: Color = Color::srgb(0.85, 0.8, 0.55);

// === UI Backgrounds ===

/// Semi-transparent dark overlay behind modal menus.
pub const OVERLAY_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.7);

pub const PANEL_BACKGROUND: Color = Color::srgba(0.12, 0.11, 0.1, 0.95);

pub const PANEL_BORDER: Color = Color::srgba(0.55, 0.5, 0.42, 0.8);

// === Button Colors ===

pub const BUTTON_BACKGROUND: Color = Color::srgb(0.35, 0.42, 0.3);
pub const BUTTON_HOVERED_BACKGROUND: Color = Color::srgb(0.45, 0.55, 0.38);
pub const BUTTON_PRESSED_BACKGROUND: Color = Color::srgb(0.26, 0.32, 0.22);

// === Font Size Tokens ===

pub const FONT_SIZE_HEADER: f32 = 56.0;
pub const FONT_SIZE_LABEL: f32 = 30.0;
pub const FONT_SIZE_HUD: f32 = 24.0;
pub const FONT_SIZE_BODY: f32 = 18.0;
