//! Theme constants for the Reversi GUI

use egui::Color32;

// Board colors - felt green
pub const BOARD_BG: Color32 = Color32::from_rgb(34, 120, 70);
pub const BOARD_FRAME: Color32 = Color32::from_rgb(20, 70, 42);
pub const GRID_LINE: Color32 = Color32::from_rgb(15, 50, 30);
pub const COORD_TEXT: Color32 = Color32::from_rgb(210, 230, 215);

// Disc colors
pub const BLACK_DISC: Color32 = Color32::from_rgb(25, 25, 30);
pub const BLACK_DISC_HIGHLIGHT: Color32 = Color32::from_rgb(70, 70, 80);
pub const WHITE_DISC: Color32 = Color32::from_rgb(250, 250, 252);
pub const WHITE_DISC_SHADOW: Color32 = Color32::from_rgb(190, 190, 195);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(230, 60, 60);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 220, 50);

pub fn legal_hint() -> Color32 {
    Color32::from_rgba_unmultiplied(0, 0, 0, 60)
}

pub fn hover_black() -> Color32 {
    Color32::from_rgba_unmultiplied(20, 20, 20, 110)
}

pub fn hover_white() -> Color32 {
    Color32::from_rgba_unmultiplied(240, 240, 240, 110)
}

// Panel colors - dark modern theme
pub const PANEL_BG: Color32 = Color32::from_rgb(25, 27, 31);
pub const CARD_BG: Color32 = Color32::from_rgb(35, 38, 43);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Status colors
pub const STATUS_OK: Color32 = Color32::from_rgb(80, 200, 120);
pub const STATUS_WARNING: Color32 = Color32::from_rgb(255, 180, 50);
pub const STATUS_CRITICAL: Color32 = Color32::from_rgb(255, 70, 70);

// Sizes
pub const BOARD_MARGIN: f32 = 32.0;
pub const DISC_RADIUS_RATIO: f32 = 0.42;
pub const HINT_RADIUS_RATIO: f32 = 0.12;
pub const GRID_LINE_WIDTH: f32 = 1.5;
pub const LAST_MOVE_MARKER_RADIUS: f32 = 5.0;
