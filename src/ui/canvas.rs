//! Canvas interaction: pointer handling and coordinate conversion.
//!
//! The canvas is a fixed-size surface; canvas coordinates are screen
//! coordinates relative to its top-left corner.

use super::state::DotsApp;
use crate::constants;
use crate::interaction::PointerOutcome;
use eframe::egui;

impl DotsApp {
    /// Converts a screen position to canvas coordinates.
    ///
    /// # Arguments
    ///
    /// * `canvas_rect` - Screen rectangle occupied by the canvas
    /// * `screen_pos` - Position in screen space (pixels)
    pub fn screen_to_canvas(canvas_rect: egui::Rect, screen_pos: egui::Pos2) -> (f64, f64) {
        let local = screen_pos - canvas_rect.min;
        (f64::from(local.x), f64::from(local.y))
    }

    /// Allocates the canvas, feeds pointer events to the interaction controller,
    /// and paints the scene.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    pub fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let size = egui::vec2(
            constants::CANVAS_WIDTH as f32,
            constants::CANVAS_HEIGHT as f32,
        );
        let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
        let canvas_rect = response.rect;
        self.canvas_rect = Some(canvas_rect);

        if self.handle_canvas_pointer(ui, canvas_rect) {
            ui.ctx().request_repaint();
        }

        self.render_scene(&painter, canvas_rect);
    }

    /// Routes this frame's primary-button input through the controller.
    ///
    /// Presses only count inside the canvas; motion and release are tracked
    /// anywhere while a point is held. Returns `true` if the store changed.
    fn handle_canvas_pointer(&mut self, ui: &egui::Ui, canvas_rect: egui::Rect) -> bool {
        let (pressed, released, moved, press_pos, latest_pos) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.delta() != egui::Vec2::ZERO,
                i.pointer.press_origin(),
                i.pointer.latest_pos(),
            )
        });

        let mut mutated = false;
        let mut grabbed_now = false;

        if pressed {
            if let Some(pos) = press_pos.filter(|p| canvas_rect.contains(*p)) {
                let (x, y) = Self::screen_to_canvas(canvas_rect, pos);
                let outcome = self.controller.pointer_down(&mut self.workspace, x, y);
                grabbed_now = matches!(outcome, PointerOutcome::Grabbed(_));
                mutated |= outcome.mutated();
            }
        }

        if moved && !grabbed_now && self.controller.dragged_index().is_some() {
            if let Some(pos) = latest_pos {
                let (x, y) = Self::screen_to_canvas(canvas_rect, pos);
                let outcome = self.controller.pointer_move(&mut self.workspace, x, y);
                mutated |= outcome.mutated();
            }
        }

        if released {
            if let PointerOutcome::Released(index) = self.controller.pointer_up() {
                log::debug!("Released point {index}");
            }
        }

        mutated
    }
}
