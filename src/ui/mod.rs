//! User interface for the dot annotation editor.
//!
//! The UI only translates egui input into calls on the core workspace and
//! paints the composed scene.
//!
//! # Module Organization
//!
//! - `state` - The main `DotsApp`, file-operation plumbing, persisted preferences
//! - `file_ops` - Export/import/image loading for native and WASM
//! - `canvas` - Pointer handling on the fixed-size canvas
//! - `rendering` - Painting scene commands with egui

mod canvas;
mod file_ops;
mod rendering;
mod state;

pub use state::{DotsApp, FileOperationResult, PendingFileOperation, Preferences};

use crate::types::{LabelStyle, SymbolKind};
use eframe::egui;

/// Storage key for persisted preferences.
pub const APP_STATE_KEY: &str = "app_state";

impl eframe::App for DotsApp {
    /// Persist user preferences between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.to_json() {
            Ok(json) => {
                storage.set_string(APP_STATE_KEY, json);
            }
            Err(err) => {
                log::error!("Failed to serialize preferences: {err}");
            }
        }
    }

    /// Main update function called by egui for each frame.
    ///
    /// Lays out the toolbar, the series panel, the status bar and the canvas,
    /// after applying any finished file operations.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::light());

        self.handle_pending_operations(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.draw_status_bar(ui);
        });

        egui::SidePanel::right("series_panel")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                self.draw_series_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                self.draw_canvas(ui);
            });
        });
    }
}

impl DotsApp {
    /// Renders the toolbar: placement selectors, series and canvas actions, file actions.
    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            let placement = &mut self.workspace.placement;

            ui.label("Symbol:");
            egui::ComboBox::from_id_salt("symbol_combo")
                .selected_text(placement.symbol.to_string())
                .show_ui(ui, |ui| {
                    for kind in SymbolKind::ALL {
                        ui.selectable_value(&mut placement.symbol, kind, kind.to_string());
                    }
                });

            ui.label("Labels:");
            egui::ComboBox::from_id_salt("label_style_combo")
                .selected_text(placement.label_style.to_string())
                .show_ui(ui, |ui| {
                    for style in LabelStyle::ALL {
                        ui.selectable_value(&mut placement.label_style, style, style.to_string());
                    }
                });

            ui.label("Font size:");
            ui.add(
                egui::DragValue::new(&mut placement.font_size)
                    .range(1..=200)
                    .suffix(" px"),
            );

            ui.separator();

            if ui.button("Add Series").clicked() && self.workspace.add_series().is_none() {
                self.status = Some("No series ids left".to_string());
            }
            ui.add_enabled_ui(!self.workspace.series.is_empty(), |ui| {
                if ui.button("Remove Series").clicked() {
                    self.controller.reset();
                    self.workspace.remove_current_series();
                }
            });
            if ui.button("Clear Canvas").clicked() {
                self.controller.reset();
                self.workspace.clear_points();
            }

            ui.separator();

            if ui.button("Load Image").clicked() {
                self.load_background_image();
            }
            ui.add_enabled_ui(self.workspace.background.is_some(), |ui| {
                if ui.button("Toggle Background").clicked() {
                    self.workspace.toggle_background();
                }
            });
            ui.checkbox(&mut self.workspace.show_lines, "Show Lines");

            ui.separator();

            if ui.button("Export JSON").clicked() {
                self.export_json();
            }
            if ui.button("Import JSON").clicked() {
                self.import_json();
            }
            if ui.button("Export SVG").clicked() {
                self.export_svg();
            }
            #[cfg(not(target_arch = "wasm32"))]
            if ui.button("Export PNG").clicked() {
                self.export_png();
            }
        });
    }

    /// Renders the series list with visibility toggles, the point list, and the JSON output.
    fn draw_series_panel(&mut self, ui: &mut egui::Ui) {
        match self.workspace.series.current() {
            Some(id) => ui.label(format!("Current: Series {}", u64::from(id) + 1)),
            None => ui.label("No series"),
        };
        ui.separator();

        // Toggles are collected first; the grouped view borrows the store.
        let mut toggles = Vec::new();
        egui::ScrollArea::vertical()
            .id_salt("point_list")
            .max_height(ui.available_height() * 0.6)
            .show(ui, |ui| {
                for (series, members) in self.workspace.points.grouped() {
                    let mut visible = self.workspace.series.is_visible(series);
                    ui.horizontal(|ui| {
                        ui.strong(format!("Series {}", u64::from(series) + 1));
                        if ui.checkbox(&mut visible, "").changed() {
                            toggles.push((series, visible));
                        }
                    });
                    for point in members {
                        ui.label(format!("({:.0}, {:.0}) - {}", point.x, point.y, point.label));
                    }
                    ui.add_space(4.0);
                }
            });
        for (series, visible) in toggles {
            self.workspace.set_series_visible(series, visible);
        }

        ui.separator();
        ui.label("JSON output");
        egui::ScrollArea::vertical()
            .id_salt("json_output")
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut self.json_output.as_str())
                        .code_editor()
                        .desired_width(f32::INFINITY),
                );
            });
    }

    /// Renders point/series counts and the last status message.
    fn draw_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(format!(
                "{} point(s), {} series",
                self.workspace.points.len(),
                self.workspace.series.len()
            ));
            if let Some(status) = &self.status {
                ui.separator();
                ui.label(status);
            }
        });
    }
}

#[cfg(test)]
mod tests;
