//! Canvas painting for the composed scene.
//!
//! Replays [`Scene`] commands onto an egui painter. Geometry comes from the
//! scene unchanged; this module only maps canvas coordinates to screen space.

use super::state::DotsApp;
use crate::scene::{self, DrawCommand, Scene};
use crate::shapes::Shape;
use eframe::egui;

const INK: egui::Color32 = egui::Color32::BLACK;
const PAPER: egui::Color32 = egui::Color32::WHITE;

impl DotsApp {
    /// Clears the canvas and paints the current workspace.
    ///
    /// # Arguments
    ///
    /// * `painter` - The egui painter for drawing operations
    /// * `canvas_rect` - The screen-space rectangle of the canvas area
    pub fn render_scene(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        painter.rect_filled(canvas_rect, 0.0, PAPER);
        let scene = scene::compose(&self.workspace);
        paint_scene(
            painter,
            canvas_rect.min,
            &scene,
            self.background_texture.as_ref(),
        );
    }
}

/// Paints every command in order with canvas origin at `origin`.
pub fn paint_scene(
    painter: &egui::Painter,
    origin: egui::Pos2,
    scene: &Scene,
    background: Option<&egui::TextureHandle>,
) {
    let to_screen = |(x, y): (f64, f64)| origin + egui::vec2(x as f32, y as f32);

    for command in &scene.commands {
        match command {
            DrawCommand::Background(fit) => {
                if let Some(texture) = background {
                    let rect = egui::Rect::from_min_size(
                        to_screen((fit.offset_x, fit.offset_y)),
                        egui::vec2(fit.width as f32, fit.height as f32),
                    );
                    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                    painter.image(texture.id(), rect, uv, egui::Color32::WHITE);
                }
            }
            DrawCommand::Label {
                position,
                text,
                font_size,
            } => {
                painter.text(
                    to_screen(*position),
                    egui::Align2::LEFT_BOTTOM,
                    text,
                    egui::FontId::proportional(*font_size as f32),
                    INK,
                );
            }
            DrawCommand::Symbol(shape) => paint_shape(painter, shape, &to_screen),
            DrawCommand::Polyline(vertices) => {
                let points: Vec<egui::Pos2> = vertices.iter().copied().map(&to_screen).collect();
                painter.add(egui::Shape::line(points, egui::Stroke::new(1.0, INK)));
            }
        }
    }
}

fn paint_shape(
    painter: &egui::Painter,
    shape: &Shape,
    to_screen: &impl Fn((f64, f64)) -> egui::Pos2,
) {
    match shape {
        Shape::Circle { center, radius } => {
            painter.circle_filled(to_screen(*center), *radius as f32, INK);
        }
        Shape::Polygon { center, vertices } => {
            // Stars are concave: fan the fill out from the center.
            let mut mesh = egui::Mesh::default();
            mesh.colored_vertex(to_screen(*center), INK);
            for v in vertices {
                mesh.colored_vertex(to_screen(*v), INK);
            }
            let n = vertices.len() as u32;
            for i in 0..n {
                mesh.add_triangle(0, 1 + i, 1 + (i + 1) % n);
            }
            painter.add(egui::Shape::mesh(mesh));
        }
    }
}
