use eframe::egui;

use crate::shared_state::{Bounds, Color32 as SharedColor, Point};

// === Pad Design Tokens ===

/// Rounded corners of the pad and the hold ring glued to it
pub const PAD_CORNER_RADIUS: f32 = 24.0;

/// Drop shadow offset below the pad
pub const SHADOW_OFFSET_Y: f32 = 4.0;
pub const SHADOW_SPREAD: f32 = 16.0;

/// Behind the pad in the standalone window (Apple-ish off-white)
pub const STANDALONE_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(245, 245, 247);

/// Full-surface dim layer under every overlay (0x40000000)
pub const DIM_COLOR: egui::Color32 = egui::Color32::from_rgba_premultiplied(0, 0, 0, 0x40);

pub const MARKER_RADIUS: f32 = 10.0;
pub const CROSSHAIR_ALPHA: f32 = 0.25;

pub const FAVORITE_ON: &str = "★";
pub const FAVORITE_OFF: &str = "☆";

/// Convert our Color32 to egui::Color32
pub fn to_egui_color(color: SharedColor) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

/// Bounds are relative to the surface origin
pub fn to_egui_rect(bounds: Bounds, origin: egui::Pos2) -> egui::Rect {
    egui::Rect::from_min_size(
        origin + egui::vec2(bounds.x, bounds.y),
        egui::vec2(bounds.width, bounds.height),
    )
}

/// Screen position -> surface-relative Point
pub fn to_surface_point(pos: egui::Pos2, origin: egui::Pos2) -> Point {
    let rel = pos - origin;
    Point::new(rel.x, rel.y)
}
