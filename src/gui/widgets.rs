use eframe::egui::{self, Painter, Rect, RichText, Stroke, Ui};

use crate::gesture::HoldRing;
use crate::gui::theme::*;
use crate::overlay::{
    Confirmation, DialogResult, MenuResult, MenuSections, PresetMenu, SavePrompt,
};
use crate::shared_state::{Color32 as SharedColor, Placement};

// =======================================================================================
// PAD
// =======================================================================================

/// Draw the pad: drop shadow, themed fill, crosshair and the position marker
pub fn draw_pad(painter: &Painter, rect: Rect, placement: &Placement) {
    let palette = placement.preset.palette();

    // Shadow first (painter's algorithm)
    let shadow_rect = rect
        .translate(egui::vec2(0.0, SHADOW_OFFSET_Y))
        .expand(SHADOW_SPREAD / 4.0);
    painter.rect_filled(shadow_rect, PAD_CORNER_RADIUS, to_egui_color(palette.shadow));

    painter.rect_filled(rect, PAD_CORNER_RADIUS, to_egui_color(palette.pad_fill));
    painter.rect_stroke(
        rect,
        PAD_CORNER_RADIUS,
        Stroke::new(1.0, to_egui_color(palette.border.with_opacity(0.2))),
    );

    let pos = placement.position();
    let marker = egui::pos2(
        rect.left() + pos.x * rect.width(),
        rect.top() + pos.y * rect.height(),
    );

    let cross = Stroke::new(1.0, to_egui_color(palette.marker.with_opacity(CROSSHAIR_ALPHA)));
    painter.line_segment([egui::pos2(rect.left(), marker.y), egui::pos2(rect.right(), marker.y)], cross);
    painter.line_segment([egui::pos2(marker.x, rect.top()), egui::pos2(marker.x, rect.bottom())], cross);

    painter.circle_filled(marker, MARKER_RADIUS, to_egui_color(palette.marker));
}

/// Blue hold ring that thickens with progress, glued to the pad border
pub fn draw_hold_ring(painter: &Painter, rect: Rect, ring: HoldRing) {
    let color = to_egui_color(SharedColor::ACCENT.with_opacity(ring.alpha));
    painter.rect_stroke(rect, PAD_CORNER_RADIUS, Stroke::new(ring.stroke_width, color));
}

/// Normalized pad coordinates for a pointer position, clamped to the pad
pub fn pad_position(rect: Rect, pointer: egui::Pos2) -> (f32, f32) {
    let x = (pointer.x - rect.left()) / rect.width().max(1.0);
    let y = (pointer.y - rect.top()) / rect.height().max(1.0);
    (x.clamp(0.0, 1.0), y.clamp(0.0, 1.0))
}

// =======================================================================================
// OVERLAY CONTENT
// =======================================================================================

/// Preset menu: save, optional file load, then the saved list with favorite stars
pub fn preset_menu(ui: &mut Ui, menu: &PresetMenu, sections: MenuSections) -> Option<MenuResult> {
    let mut picked = None;

    ui.vertical_centered(|ui| {
        ui.heading("Presets");
    });
    ui.separator();

    if ui.button("💾 Save Preset").clicked() {
        picked = Some(MenuResult::Save);
    }
    if sections.file_load && ui.button("📂 Load Preset File…").clicked() {
        picked = Some(MenuResult::LoadFromFile);
    }

    ui.separator();

    if sections.saved_list && menu.entries().is_empty() {
        ui.label(RichText::new("No saved presets yet").weak());
    } else if sections.saved_list {
        egui::ScrollArea::vertical()
            .max_height(8.0 * 32.0)
            .show(ui, |ui| {
                for entry in menu.entries() {
                    ui.horizontal(|ui| {
                        let star = if entry.is_favorite { FAVORITE_ON } else { FAVORITE_OFF };
                        if ui
                            .add(egui::Button::new(star).frame(false))
                            .on_hover_text("Toggle favorite")
                            .clicked()
                        {
                            picked = Some(MenuResult::ToggleFavorite(entry.id));
                        }
                        if ui.button(entry.name.as_str()).clicked() {
                            picked = Some(MenuResult::Load(entry.id));
                        }
                    });
                }
            });
    }

    if sections.saved_list {
        ui.separator();
    }
    if ui.button("Cancel").clicked() {
        picked = Some(MenuResult::Cancelled);
    }

    picked
}

/// Name entry for the standalone save flow. Enter confirms.
pub fn save_prompt(ui: &mut Ui, prompt: &mut SavePrompt) -> Option<DialogResult> {
    let mut result = None;

    ui.heading("Save Preset");
    ui.add_space(6.0);

    ui.horizontal(|ui| {
        ui.label("Name:");
        let edit = ui.text_edit_singleline(&mut prompt.name);
        if !edit.has_focus() && !edit.lost_focus() {
            edit.request_focus();
        }
        if edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            result = Some(DialogResult::from_input(&prompt.name));
        }
    });

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        if ui.button("Save").clicked() {
            result = Some(DialogResult::from_input(&prompt.name));
        }
        if ui.button("Cancel").clicked() {
            result = Some(DialogResult::Cancelled);
        }
    });

    result
}

/// Title, message and a single OK. Returns true when dismissed.
pub fn confirmation(ui: &mut Ui, confirmation: &Confirmation) -> bool {
    ui.heading(confirmation.title.as_str());
    ui.add_space(6.0);
    ui.label(confirmation.message.as_str());
    ui.add_space(6.0);
    ui.vertical_centered(|ui| ui.button("OK").clicked()).inner
}
