//! Export utilities: serialize the point store to JSON, SVG and PNG, and import JSON.
//!
//! Notes:
//! - JSON is a bare array of point records, no envelope.
//! - SVG export is supported on all targets (native + wasm).
//! - PNG export rasterizes the SVG and is supported on native targets only.

use crate::constants;
use crate::error::Result;
use crate::shapes::{fmt_num, label_anchor, Shape};
use crate::state::Workspace;
use crate::types::{Point, PointStore};
use std::fmt::Write as _;

/// Serializes every point, in store order, as pretty-printed JSON.
pub fn points_to_json(store: &PointStore) -> Result<String> {
    Ok(serde_json::to_string_pretty(store)?)
}

/// Parses a JSON array of point records.
///
/// Records missing any field are rejected; unknown symbol names become circles.
pub fn parse_points(json: &str) -> Result<Vec<Point>> {
    Ok(serde_json::from_str(json)?)
}

impl Workspace {
    /// Replaces the store with the points in `json`.
    ///
    /// The document is parsed completely before anything changes, so a
    /// malformed import leaves the current points untouched. Returns the number
    /// of imported points.
    pub fn import_json(&mut self, json: &str) -> Result<usize> {
        let points = parse_points(json)?;
        let count = points.len();
        self.import_points(points);
        log::info!("Imported {count} point(s) across {} series", self.series.len());
        Ok(count)
    }

    /// Serializes the store as JSON.
    pub fn export_json(&self) -> Result<String> {
        points_to_json(&self.points)
    }

    /// Renders the store as an SVG document.
    pub fn export_svg(&self) -> String {
        build_svg(&self.points)
    }
}

/// Builds an 800x600 SVG 1.1 document with one `<g>` per series.
///
/// Groups follow first-appearance order in the store; inside a group each
/// point contributes its symbol followed by its label, in store order. Every
/// point is exported regardless of on-screen visibility.
pub fn build_svg(store: &PointStore) -> String {
    let mut parts: Vec<String> = vec![
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>".to_string(),
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{}\" height=\"{}\">",
            constants::CANVAS_WIDTH,
            constants::CANVAS_HEIGHT
        ),
    ];

    for (series, members) in store.grouped() {
        parts.push(format!("<g id=\"series{}\">", u64::from(series) + 1));
        for point in members {
            let mut symbol = String::new();
            Shape::for_point(point).write_svg(&mut symbol);
            parts.push(symbol);

            let (tx, ty) = label_anchor(point);
            let mut text = String::new();
            let _ = write!(
                text,
                "<text x=\"{}\" y=\"{}\" font-size=\"{}px\" font-family=\"{}\" fill=\"black\">{}</text>",
                fmt_num(tx),
                fmt_num(ty),
                point.font_size,
                constants::LABEL_FONT_FAMILY,
                escape_xml(&point.label)
            );
            parts.push(text);
        }
        parts.push("</g>".to_string());
    }

    parts.push("</svg>".to_string());
    parts.join("\n")
}

/// Rasterizes an SVG document to PNG bytes at the given scale.
#[cfg(not(target_arch = "wasm32"))]
pub fn render_png(svg: &str, scale: f32) -> Result<Vec<u8>> {
    use crate::error::DotsError;
    use std::sync::Arc;
    use tiny_skia::Pixmap;

    let mut opt = usvg::Options::default();
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    opt.fontdb = Arc::new(db);

    let tree = usvg::Tree::from_data(svg.as_bytes(), &opt)
        .map_err(|e| DotsError::Svg(e.to_string()))?;

    let scale = scale.clamp(0.25, 8.0);
    let size = tree.size();
    let out_w = (size.width() * scale).round().max(1.0) as u32;
    let out_h = (size.height() * scale).round().max(1.0) as u32;

    let mut pixmap = Pixmap::new(out_w, out_h)
        .ok_or_else(|| DotsError::Raster(format!("cannot create pixmap {out_w}x{out_h}")))?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let transform = tiny_skia::Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| DotsError::Raster(e.to_string()))
}

fn escape_xml(input: &str) -> String {
    let mut s = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => s.push_str("&amp;"),
            '<' => s.push_str("&lt;"),
            '>' => s.push_str("&gt;"),
            '"' => s.push_str("&quot;"),
            '\'' => s.push_str("&apos;"),
            _ => s.push(ch),
        }
    }
    s
}
