// src/gui/mod.rs
pub mod dialogs;
pub mod theme;
pub mod widgets;

use std::time::Instant;

use eframe::egui;

use crate::controller::PadController;
use crate::gui::dialogs::NativeDialogs;
use crate::gui::theme::*;
use crate::overlay::{Overlay, OverlayKind};
use crate::shared_state::{AppConfig, Size, Variant};

// Main Application GUI - pointer routing, painting and overlay hosting
pub struct XYPadApp {
    /// Gesture/overlay/preset logic (no egui inside)
    controller: PadController,

    /// Native dialogs running on worker threads
    dialogs: NativeDialogs,

    /// Press started on the pad: drags move the marker until release
    dragging_pad: bool,

    /// Track window size/position so they can be persisted on exit
    last_window_size: Option<egui::Vec2>,
    last_window_pos: Option<egui::Pos2>,
}

impl XYPadApp {
    pub fn new(controller: PadController) -> Self {
        Self {
            controller,
            dialogs: NativeDialogs::new(),
            dragging_pad: false,
            last_window_size: None,
            last_window_pos: None,
        }
    }
}

impl eframe::App for XYPadApp {
    // Runs once on shutdown, with or without eframe's persistence feature
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.config_snapshot().save();
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // --- Window tracking ---
        if let Some(rect) = ctx.input(|i| i.viewport().outer_rect) {
            self.last_window_pos = Some(rect.min);
        }
        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            let size = rect.size();
            let size_changed = self.last_window_size.map_or(true, |ls| (ls - size).length() > 1.0);
            if size_changed {
                tracing::debug!("[GUI] Window size: {:.0} x {:.0}", size.x, size.y);
                self.last_window_size = Some(size);
            }
        }

        // --- Completed native dialogs ---
        for response in self.dialogs.poll() {
            self.controller.on_dialog_response(response);
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.controller.cancel_overlay();
        }

        // --- Timers (hold progress, host param mirroring) ---
        self.controller.tick(now);

        // === Main surface ===
        let background = match self.controller.variant() {
            Variant::Standalone => STANDALONE_BACKGROUND,
            Variant::PluginEditor => {
                to_egui_color(self.controller.placement().preset.palette().background)
            }
        };
        let custom_frame = egui::Frame::central_panel(&ctx.style())
            .fill(background)
            .inner_margin(0.0);

        let origin = egui::CentralPanel::default()
            .frame(custom_frame)
            .show(ctx, |ui| {
                let surface_rect = ui.max_rect();
                let origin = surface_rect.min;
                self.controller
                    .set_layout(Size::new(surface_rect.width(), surface_rect.height()));
                let pad_rect = to_egui_rect(self.controller.pad_bounds(), origin);

                self.handle_pointer(ui, origin, pad_rect, now);

                // Rendering Order: pad (shadow, fill, marker), then the hold ring on top
                let painter = ui.painter();
                widgets::draw_pad(painter, pad_rect, self.controller.placement());
                if let Some(ring) = self.controller.hold_ring() {
                    widgets::draw_hold_ring(painter, pad_rect, ring);
                }

                origin
            })
            .inner;

        // === Overlay (dim layer + centered content) ===
        self.show_overlay(ctx, origin);

        // --- Hand new dialog requests to the native side ---
        for request in self.controller.take_requests() {
            self.dialogs.launch(request, ctx);
        }

        // Sleep until the next timer is due instead of repainting continuously
        if let Some(wait) = self.controller.next_wakeup(Instant::now()) {
            ctx.request_repaint_after(wait);
        }
    }
}

impl XYPadApp {
    /// Current settings with the tracked window geometry folded in
    pub fn config_snapshot(&self) -> AppConfig {
        let mut config = self.controller.config().clone();
        if let Some(size) = self.last_window_size {
            config.window_size = Some([size.x, size.y]);
        }
        if let Some(pos) = self.last_window_pos {
            config.window_position = Some([pos.x, pos.y]);
        }
        config
    }

    /// Route raw pointer input: pad drags to the pad, everything else to the controller
    fn handle_pointer(&mut self, ui: &egui::Ui, origin: egui::Pos2, pad_rect: egui::Rect, now: Instant) {
        let (pressed, released, double, down, pos) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.button_double_clicked(egui::PointerButton::Primary),
                i.pointer.primary_down(),
                i.pointer.interact_pos(),
            )
        });
        let overlay_open = self.controller.overlay().kind().is_some();

        if let Some(pos) = pos {
            let point = to_surface_point(pos, origin);

            if pressed {
                if !overlay_open && pad_rect.contains(pos) {
                    self.dragging_pad = true;
                }
                self.controller.pointer_down(point, now);
            }

            if double {
                self.controller.double_click(point);
            }

            if self.dragging_pad && down {
                let (x, y) = widgets::pad_position(pad_rect, pos);
                self.controller.set_position(x, y);
            }
        }

        if released {
            self.dragging_pad = false;
            self.controller.pointer_up();
        }

        // Keep frames coming while the hold is building so the ring animates
        if self.controller.hold_ring().is_some() {
            ui.ctx().request_repaint();
        }
    }

    fn show_overlay(&mut self, ctx: &egui::Context, origin: egui::Pos2) {
        let Some(layout) = self.controller.overlay_layout() else {
            return;
        };

        let dim_rect = to_egui_rect(layout.dim, origin);
        ctx.layer_painter(egui::LayerId::new(egui::Order::Middle, egui::Id::new("overlay_dim")))
            .rect_filled(dim_rect, 0.0, DIM_COLOR);

        let content_rect = to_egui_rect(layout.content, origin);
        let sections = self.controller.menu_sections();

        let mut menu_pick = None;
        let mut save_result = None;
        let mut dismissed = false;
        let controller = &mut self.controller;

        let area = egui::Area::new(egui::Id::new("overlay_content"))
            .order(egui::Order::Foreground)
            .fixed_pos(content_rect.min)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).rounding(12.0).show(ui, |ui| {
                    ui.set_width(content_rect.width());
                    match controller.overlay().kind() {
                        Some(OverlayKind::Menu) => {
                            if let Overlay::Menu(menu) = controller.overlay() {
                                menu_pick = widgets::preset_menu(ui, menu, sections);
                            }
                        }
                        Some(OverlayKind::SaveDialog) => {
                            if let Some(prompt) = controller.save_prompt_mut() {
                                save_result = widgets::save_prompt(ui, prompt);
                            }
                        }
                        Some(OverlayKind::Confirmation) => {
                            if let Overlay::Confirmation(c) = controller.overlay() {
                                dismissed = widgets::confirmation(ui, c);
                            }
                        }
                        None => {}
                    }
                });
            });

        // A click that lands on the dim layer dismisses, like Escape
        let content_area = area.response.rect;
        let clicked_dim = ctx.input(|i| {
            i.pointer.primary_clicked()
                && i.pointer.interact_pos().is_some_and(|p| !content_area.contains(p))
        });

        if let Some(result) = menu_pick {
            self.controller.handle_menu_result(result);
        }
        if let Some(result) = save_result {
            self.controller.submit_save_name(result);
        }
        if dismissed {
            self.controller.dismiss_confirmation();
        }
        if clicked_dim {
            self.controller.cancel_overlay();
        }
    }
}
