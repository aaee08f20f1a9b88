//! Core data types for the dot annotation editor.
//!
//! This module defines the point record that is exported and imported, the
//! symbol and label-style selectors, the explicit series list, and the ordered
//! point store that every other component reads from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a logical series. Zero-based, never renumbered.
pub type SeriesId = u32;

/// The glyph drawn at a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SymbolKind {
    /// Filled circle; also the fallback for unrecognized names
    #[default]
    Circle,
    /// Five-spike star
    Star,
    /// Equilateral triangle, apex up
    Triangle,
}

impl SymbolKind {
    /// Every symbol, in the order shown in the toolbar.
    pub const ALL: [SymbolKind; 3] = [SymbolKind::Circle, SymbolKind::Star, SymbolKind::Triangle];

    /// The lowercase name used in JSON documents.
    pub fn as_str(self) -> &'static str {
        match self {
            SymbolKind::Circle => "circle",
            SymbolKind::Star => "star",
            SymbolKind::Triangle => "triangle",
        }
    }

    /// Parses a symbol name, falling back to [`SymbolKind::Circle`] for anything unknown.
    pub fn from_name(name: &str) -> Self {
        match name {
            "star" => SymbolKind::Star,
            "triangle" => SymbolKind::Triangle,
            "circle" => SymbolKind::Circle,
            other => {
                log::warn!("Unrecognized symbol '{other}', drawing as circle");
                SymbolKind::Circle
            }
        }
    }
}

impl From<String> for SymbolKind {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<SymbolKind> for String {
    fn from(kind: SymbolKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SymbolKind::Circle => "Circle",
            SymbolKind::Star => "Star",
            SymbolKind::Triangle => "Triangle",
        };
        f.write_str(name)
    }
}

/// How labels are derived from a point's ordinal within its series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LabelStyle {
    /// 1, 2, 3, ...; also the fallback for unrecognized names
    #[default]
    Numeric,
    /// a, b, c, ...
    Alpha,
    /// I, II, III, ...
    Roman,
}

impl LabelStyle {
    /// Every style, in the order shown in the toolbar.
    pub const ALL: [LabelStyle; 3] = [LabelStyle::Numeric, LabelStyle::Alpha, LabelStyle::Roman];

    /// The lowercase selector name.
    pub fn as_str(self) -> &'static str {
        match self {
            LabelStyle::Numeric => "numeric",
            LabelStyle::Alpha => "alpha",
            LabelStyle::Roman => "roman",
        }
    }

    /// Parses a selector name, falling back to [`LabelStyle::Numeric`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "alpha" => LabelStyle::Alpha,
            "roman" => LabelStyle::Roman,
            _ => LabelStyle::Numeric,
        }
    }
}

impl From<String> for LabelStyle {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<LabelStyle> for String {
    fn from(style: LabelStyle) -> Self {
        style.as_str().to_string()
    }
}

impl fmt::Display for LabelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LabelStyle::Numeric => "Numeric (1, 2, 3)",
            LabelStyle::Alpha => "Alphabetic (a, b, c)",
            LabelStyle::Roman => "Roman (I, II, III)",
        };
        f.write_str(name)
    }
}

/// A single annotated dot, exactly as it appears in exported JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal canvas coordinate
    pub x: f64,
    /// Vertical canvas coordinate
    pub y: f64,
    /// Glyph drawn at the anchor
    pub symbol: SymbolKind,
    /// Display text, fixed when the point is created
    pub label: String,
    /// Label text size in pixels
    #[serde(rename = "fontSize")]
    pub font_size: u32,
    /// Series this point belongs to
    pub series: SeriesId,
}

impl Point {
    /// Creates a point at the given canvas position.
    pub fn new(
        x: f64,
        y: f64,
        symbol: SymbolKind,
        label: impl Into<String>,
        font_size: u32,
        series: SeriesId,
    ) -> Self {
        Self {
            x,
            y,
            symbol,
            label: label.into(),
            font_size,
            series,
        }
    }

    /// Euclidean distance from this point's anchor to `(x, y)`.
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }
}

/// A toggle-able logical grouping of points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    /// Series identifier shared by member points
    pub id: SeriesId,
    /// Whether member points are drawn
    pub visible: bool,
}

impl Series {
    /// Creates a visible series.
    pub fn new(id: SeriesId) -> Self {
        Self { id, visible: true }
    }
}

/// The ordered list of series known to the editor.
///
/// The last entry is the current series that new points join. Removing a
/// series never renumbers the others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesList {
    series: Vec<Series>,
}

impl Default for SeriesList {
    fn default() -> Self {
        Self {
            series: vec![Series::new(0)],
        }
    }
}

impl SeriesList {
    /// Creates a list holding each distinct id once, all visible, in ascending
    /// order so the highest id is current.
    pub fn from_ids(ids: impl IntoIterator<Item = SeriesId>) -> Self {
        let mut ids: Vec<SeriesId> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Self {
            series: ids.into_iter().map(Series::new).collect(),
        }
    }

    /// Number of series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns `true` when no series exists.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// The series new points are placed into, if any.
    pub fn current(&self) -> Option<SeriesId> {
        self.series.last().map(|s| s.id)
    }

    /// Appends a new series and makes it current.
    ///
    /// Returns `None` without changing anything once the current id is
    /// [`SeriesId::MAX`].
    pub fn push_next(&mut self) -> Option<SeriesId> {
        let id = match self.series.last() {
            Some(last) => last.id.checked_add(1)?,
            None => 0,
        };
        self.series.push(Series::new(id));
        Some(id)
    }

    /// Drops the current series entry, returning its id.
    pub fn pop_current(&mut self) -> Option<SeriesId> {
        self.series.pop().map(|s| s.id)
    }

    /// Looks up a series by id.
    pub fn get(&self, id: SeriesId) -> Option<&Series> {
        self.series.iter().find(|s| s.id == id)
    }

    /// Visibility of a series. Series the list does not know about are drawn.
    pub fn is_visible(&self, id: SeriesId) -> bool {
        self.get(id).map_or(true, |s| s.visible)
    }

    /// Sets the visibility flag of a known series. Returns `false` if the id is unknown.
    pub fn set_visible(&mut self, id: SeriesId, visible: bool) -> bool {
        match self.series.iter_mut().find(|s| s.id == id) {
            Some(series) => {
                series.visible = visible;
                true
            }
            None => false,
        }
    }
}

/// In-memory ordered collection of points.
///
/// Reads are full scans; the store is sized for manual placement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointStore {
    points: Vec<Point>,
}

impl PointStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from an existing list, preserving order.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Appends a point and returns its index.
    pub fn push(&mut self, point: Point) -> usize {
        self.points.push(point);
        self.points.len() - 1
    }

    /// Removes every point belonging to `series`, returning how many were removed.
    pub fn remove_series(&mut self, series: SeriesId) -> usize {
        let before = self.points.len();
        self.points.retain(|p| p.series != series);
        before - self.points.len()
    }

    /// Removes all points.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Replaces the whole collection.
    pub fn replace(&mut self, points: Vec<Point>) {
        self.points = points;
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` when the store holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point at `index`.
    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    /// Mutable point at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Point> {
        self.points.get_mut(index)
    }

    /// All points in store order.
    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    /// Iterates over points in store order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Points belonging to `series`, in store order.
    pub fn members(&self, series: SeriesId) -> impl Iterator<Item = &Point> {
        self.points.iter().filter(move |p| p.series == series)
    }

    /// Number of points already in `series`; the ordinal of the next one.
    pub fn count_in_series(&self, series: SeriesId) -> usize {
        self.members(series).count()
    }

    /// Groups points by series, ordering groups by first appearance in the store.
    pub fn grouped(&self) -> Vec<(SeriesId, Vec<&Point>)> {
        let mut groups: Vec<(SeriesId, Vec<&Point>)> = Vec::new();
        for point in &self.points {
            match groups.iter_mut().find(|(id, _)| *id == point.series) {
                Some((_, members)) => members.push(point),
                None => groups.push((point.series, vec![point])),
            }
        }
        groups
    }

    /// Index of the first point (in store order) within `radius` of `(x, y)`.
    pub fn hit_test(&self, x: f64, y: f64, radius: f64) -> Option<usize> {
        self.points.iter().position(|p| p.distance_to(x, y) < radius)
    }
}

impl<'a> IntoIterator for &'a PointStore {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
