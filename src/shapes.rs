//! Symbol geometry shared by the canvas painter and the SVG exporter.
//!
//! Each symbol is described once as a [`Shape`]; both backends consume that
//! description so the preview and the exported document cannot drift apart.

use crate::constants;
use crate::types::{Point, SymbolKind};
use std::f64::consts::PI;
use std::fmt::Write as _;

/// A filled glyph in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Filled circle
    Circle {
        /// Center position
        center: (f64, f64),
        /// Radius in pixels
        radius: f64,
    },
    /// Closed polygon that is star-shaped with respect to `center`
    Polygon {
        /// Anchor the polygon was built around; every vertex is visible from it
        center: (f64, f64),
        /// Vertices in drawing order; the path closes back to the first
        vertices: Vec<(f64, f64)>,
    },
}

impl Shape {
    /// Geometry of `symbol` anchored at `(x, y)`.
    pub fn for_symbol(symbol: SymbolKind, x: f64, y: f64) -> Self {
        match symbol {
            SymbolKind::Circle => Shape::Circle {
                center: (x, y),
                radius: constants::CIRCLE_RADIUS,
            },
            SymbolKind::Star => Shape::Polygon {
                center: (x, y),
                vertices: star_vertices(
                    x,
                    y,
                    constants::STAR_SPIKES,
                    constants::STAR_OUTER_RADIUS,
                    constants::STAR_INNER_RADIUS,
                ),
            },
            SymbolKind::Triangle => Shape::Polygon {
                center: (x, y),
                vertices: triangle_vertices(x, y, constants::TRIANGLE_SIZE).to_vec(),
            },
        }
    }

    /// Geometry of the symbol for an existing point.
    pub fn for_point(point: &Point) -> Self {
        Self::for_symbol(point.symbol, point.x, point.y)
    }

    /// Writes this shape as a black-filled SVG element.
    pub fn write_svg(&self, out: &mut String) {
        match self {
            Shape::Circle { center, radius } => {
                let _ = write!(
                    out,
                    "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"black\" />",
                    fmt_num(center.0),
                    fmt_num(center.1),
                    fmt_num(*radius)
                );
            }
            Shape::Polygon { vertices, .. } => {
                out.push_str("<path d=\"");
                for (i, (vx, vy)) in vertices.iter().enumerate() {
                    let cmd = if i == 0 { "M" } else { " L" };
                    let _ = write!(out, "{}{},{}", cmd, fmt_num(*vx), fmt_num(*vy));
                }
                out.push_str(" Z\" fill=\"black\" />");
            }
        }
    }
}

/// Vertices of a star, alternating outer and inner radius.
///
/// Starts at the top (270 degrees) and advances `PI / spikes` per vertex, giving
/// `2 * spikes` vertices.
pub fn star_vertices(
    cx: f64,
    cy: f64,
    spikes: usize,
    outer_radius: f64,
    inner_radius: f64,
) -> Vec<(f64, f64)> {
    let step = PI / spikes as f64;
    let mut rot = PI / 2.0 * 3.0;
    let mut vertices = Vec::with_capacity(spikes * 2);
    for _ in 0..spikes {
        vertices.push((cx + rot.cos() * outer_radius, cy + rot.sin() * outer_radius));
        rot += step;
        vertices.push((cx + rot.cos() * inner_radius, cy + rot.sin() * inner_radius));
        rot += step;
    }
    vertices
}

/// Vertices of an equilateral triangle with edge `size`, centered on `(cx, cy)`, apex up.
pub fn triangle_vertices(cx: f64, cy: f64, size: f64) -> [(f64, f64); 3] {
    let height = size * (3.0_f64.sqrt() / 2.0);
    [
        (cx, cy - height / 2.0),
        (cx - size / 2.0, cy + height / 2.0),
        (cx + size / 2.0, cy + height / 2.0),
    ]
}

/// Where a point's label text starts.
pub fn label_anchor(point: &Point) -> (f64, f64) {
    (
        point.x + constants::LABEL_OFFSET_X,
        point.y + constants::LABEL_OFFSET_Y,
    )
}

/// Formats a coordinate for markup: at most three decimals, no trailing zeros, no `-0`.
pub fn fmt_num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}")
}
