//! Shared application-wide constants.
//! Centralizes tweakable values used across geometry, rendering, and export.

// Canvas
/// Width of the drawing surface in canvas pixels.
pub const CANVAS_WIDTH: f64 = 800.0;
/// Height of the drawing surface in canvas pixels.
pub const CANVAS_HEIGHT: f64 = 600.0;

// Canvas interactions
/// Pointer-down within this Euclidean distance of a point grabs it for dragging.
pub const HIT_RADIUS: f64 = 10.0;

// Symbol geometry
/// Radius of the circle symbol.
pub const CIRCLE_RADIUS: f64 = 5.0;
/// Number of spikes on the star symbol.
pub const STAR_SPIKES: usize = 5;
/// Distance from the star center to each spike tip.
pub const STAR_OUTER_RADIUS: f64 = 10.0;
/// Distance from the star center to each inner vertex.
pub const STAR_INNER_RADIUS: f64 = 5.0;
/// Edge length of the equilateral triangle symbol.
pub const TRIANGLE_SIZE: f64 = 10.0;

// Labels
/// Horizontal offset of label text from the point anchor.
pub const LABEL_OFFSET_X: f64 = 10.0;
/// Vertical offset of label text from the point anchor (negative is up).
pub const LABEL_OFFSET_Y: f64 = -10.0;
/// Font size used for new points until the user picks another.
pub const DEFAULT_FONT_SIZE: u32 = 16;
/// Font family written into exported SVG text.
pub const LABEL_FONT_FAMILY: &str = "Arial";

// Export
/// Default file name for JSON export.
pub const JSON_FILE_NAME: &str = "connect-the-dots.json";
/// Default file name for SVG export.
pub const SVG_FILE_NAME: &str = "connect-the-dots.svg";
/// Default file name for PNG export.
pub const PNG_FILE_NAME: &str = "connect-the-dots.png";
