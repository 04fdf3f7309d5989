//! Color constants and font size tokens for consistent theming.

use bevy::prelude::*;

// === Text Colors ===

/// Header/title text color (white).
pub const HEADER_TEXT: Color = Color::WHITE;

/// Body/subtitle text color (light gray).
pub const BODY_TEXT: Color = Color::srgb(0.7, 0.7, 0.7);

/// Button label text color.
pub const BUTTON_TEXT: Color = Color::srgb(0.925, 0.925, 0.925);

/// Shot counter drawn on shooters.
pub const SHOT_LABEL_TEXT: Color = Color::WHITE;

// === UI Backgrounds ===

/// Semi-transparent dark overlay for pause/modal screens.
pub const OVERLAY_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.7);

/// Panel background (dark blue-gray, nearly opaque).
pub const PANEL_BACKGROUND: Color = Color::srgba(0.1, 0.1, 0.15, 0.95);

/// Panel border (light blue-gray, semi-transparent).
pub const PANEL_BORDER: Color = Color::srgba(0.5, 0.5, 0.6, 0.8);

// === Button Colors ===

pub const BUTTON_BACKGROUND: Color = Color::srgb(0.275, 0.4, 0.75);
pub const BUTTON_HOVERED_BACKGROUND: Color = Color::srgb(0.384, 0.6, 0.82);
pub const BUTTON_PRESSED_BACKGROUND: Color = Color::srgb(0.239, 0.286, 0.6);

// === Play Area ===

pub const BACKGROUND: Color = Color::srgb(0.1, 0.1, 0.12);
pub const READY_SLOT: Color = Color::srgba(1.0, 1.0, 1.0, 0.12);
pub const VICTORY_TEXT: Color = Color::srgb(0.1, 0.9, 0.1);

// === Cube Colors ===

pub const CUBE_RED: Color = Color::srgb(0.9, 0.25, 0.25);
pub const CUBE_BLUE: Color = Color::srgb(0.25, 0.45, 0.95);
pub const CUBE_GREEN: Color = Color::srgb(0.25, 0.8, 0.35);
pub const CUBE_YELLOW: Color = Color::srgb(0.95, 0.85, 0.2);
pub const CUBE_PURPLE: Color = Color::srgb(0.65, 0.35, 0.9);

// === Progress Bar Colors ===

pub const PROGRESS_BAR_BG: Color = Color::srgb(0.2, 0.2, 0.3);
pub const PROGRESS_BAR_FILL: Color = Color::srgb(0.3, 0.5, 0.9);

// === Font Size Tokens ===

pub const FONT_SIZE_TITLE: f32 = 72.0;
pub const FONT_SIZE_HEADER: f32 = 64.0;
pub const FONT_SIZE_LABEL: f32 = 32.0;
pub const FONT_SIZE_HUD: f32 = 28.0;
pub const FONT_SIZE_SHOTS: f32 = 18.0;
