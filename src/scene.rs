//! Scene composition: turns the workspace into a renderer-agnostic draw list.
//!
//! The whole scene is rebuilt from scratch after every mutation. Backends
//! (the egui canvas, tests) replay the commands in order.

use crate::background::BackgroundFit;
use crate::shapes::{label_anchor, Shape};
use crate::state::Workspace;

/// One drawing step, in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Draw the background image into this rectangle
    Background(BackgroundFit),
    /// Draw label text with its baseline-left corner at `position`
    Label {
        /// Text anchor
        position: (f64, f64),
        /// Text to draw
        text: String,
        /// Font size in pixels
        font_size: u32,
    },
    /// Fill a symbol
    Symbol(Shape),
    /// Stroke a connected polyline through the given vertices
    Polyline(Vec<(f64, f64)>),
}

/// An ordered list of draw commands for one full redraw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    /// Commands in back-to-front order
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    /// Number of symbols drawn.
    pub fn symbol_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Symbol(_)))
            .count()
    }

    /// Whether the background image is drawn.
    pub fn has_background(&self) -> bool {
        self.commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Background(_)))
    }

    /// The connecting polyline, if drawn.
    pub fn polyline(&self) -> Option<&[(f64, f64)]> {
        self.commands.iter().find_map(|c| match c {
            DrawCommand::Polyline(v) => Some(v.as_slice()),
            _ => None,
        })
    }
}

/// Builds the scene for the current workspace.
///
/// Layers, back to front: the background (if loaded and visible) in its fit
/// rectangle, then label and symbol for every point in a visible series, then
/// the connecting line. The line follows raw store order through every point,
/// ignoring series and visibility, and needs at least two points.
pub fn compose(workspace: &Workspace) -> Scene {
    let mut commands = Vec::with_capacity(workspace.points.len() * 2 + 2);

    if let Some(bg) = workspace.background.filter(|bg| bg.visible) {
        commands.push(DrawCommand::Background(bg.fit));
    }

    for point in workspace
        .points
        .iter()
        .filter(|p| workspace.series.is_visible(p.series))
    {
        commands.push(DrawCommand::Label {
            position: label_anchor(point),
            text: point.label.clone(),
            font_size: point.font_size,
        });
        commands.push(DrawCommand::Symbol(Shape::for_point(point)));
    }

    if workspace.show_lines && workspace.points.len() >= 2 {
        let vertices = workspace.points.iter().map(|p| (p.x, p.y)).collect();
        commands.push(DrawCommand::Polyline(vertices));
    }

    Scene { commands }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Point, SymbolKind};

    fn single_point_workspace() -> Workspace {
        let mut ws = Workspace::new();
        ws.import_points(vec![Point::new(10.0, 10.0, SymbolKind::Circle, "a", 12, 0)]);
        ws
    }

    #[test]
    fn visible_point_draws_label_then_symbol() {
        let scene = compose(&single_point_workspace());
        assert_eq!(
            scene.commands,
            vec![
                DrawCommand::Label {
                    position: (20.0, 0.0),
                    text: "a".into(),
                    font_size: 12,
                },
                DrawCommand::Symbol(Shape::Circle {
                    center: (10.0, 10.0),
                    radius: 5.0,
                }),
            ]
        );
    }

    #[test]
    fn hidden_series_draws_no_points_but_keeps_background() {
        let mut ws = single_point_workspace();
        ws.set_background(1600, 800);
        ws.set_series_visible(0, false);
        let scene = compose(&ws);
        assert_eq!(scene.symbol_count(), 0);
        assert!(!scene
            .commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Label { .. })));
        assert!(scene.has_background());
        assert_eq!(
            scene.commands[0],
            DrawCommand::Background(BackgroundFit {
                offset_x: 0.0,
                offset_y: 100.0,
                width: 800.0,
                height: 400.0,
            })
        );
    }

    #[test]
    fn hidden_background_is_skipped() {
        let mut ws = single_point_workspace();
        ws.set_background(300, 600);
        ws.toggle_background();
        assert!(!compose(&ws).has_background());
    }

    #[test]
    fn polyline_follows_store_order_across_series() {
        let mut ws = Workspace::new();
        ws.show_lines = true;
        ws.place_point(0.0, 0.0);
        ws.add_series();
        ws.place_point(10.0, 0.0);
        ws.set_series_visible(1, false);
        ws.series.set_visible(0, true);
        ws.place_point(20.0, 5.0);
        let scene = compose(&ws);
        assert_eq!(
            scene.polyline(),
            Some(&[(0.0, 0.0), (10.0, 0.0), (20.0, 5.0)][..])
        );
        assert_eq!(scene.symbol_count(), 1);
    }

    #[test]
    fn polyline_needs_two_points_and_toggle() {
        let mut ws = single_point_workspace();
        ws.show_lines = true;
        assert!(compose(&ws).polyline().is_none());
        ws.place_point(50.0, 50.0);
        assert!(compose(&ws).polyline().is_some());
        ws.show_lines = false;
        assert!(compose(&ws).polyline().is_none());
    }
}
