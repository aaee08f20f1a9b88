//! The explicit application state every component operates on.
//!
//! Nothing in the core keeps hidden globals: the point store, series list,
//! placement settings, and background placement all live on [`Workspace`],
//! which callers pass by reference into the interaction controller, the scene
//! compositor, and the exporters.

use crate::background::BackgroundLayer;
use crate::constants;
use crate::labels::next_label;
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Selectors read each time a point is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementSettings {
    /// Symbol for new points
    pub symbol: SymbolKind,
    /// Label style for new points
    pub label_style: LabelStyle,
    /// Label font size in pixels for new points
    pub font_size: u32,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            symbol: SymbolKind::Circle,
            label_style: LabelStyle::Numeric,
            font_size: constants::DEFAULT_FONT_SIZE,
        }
    }
}

/// Editor state: points, series, placement settings, and background.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    /// All points in creation order
    pub points: PointStore,
    /// Known series; the last one is current
    pub series: SeriesList,
    /// Settings applied to newly placed points
    pub placement: PlacementSettings,
    /// Loaded background image placement, if any
    pub background: Option<BackgroundLayer>,
    /// Whether the connecting polyline is drawn
    pub show_lines: bool,
}

impl Workspace {
    /// Creates an empty workspace with a single visible series 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// The series new points join, creating series 0 if none exists.
    pub fn ensure_current_series(&mut self) -> SeriesId {
        match self.series.current() {
            Some(id) => id,
            None => {
                self.series = SeriesList::default();
                0
            }
        }
    }

    /// Places a new point at `(x, y)` in the current series and returns its index.
    ///
    /// The label is derived from the number of points already in the series
    /// and never changes afterwards.
    pub fn place_point(&mut self, x: f64, y: f64) -> usize {
        let series = self.ensure_current_series();
        let settings = self.placement;
        let ordinal = self.points.count_in_series(series);
        let label = next_label(ordinal, settings.label_style);
        let point = Point::new(
            x,
            y,
            settings.symbol,
            label,
            settings.font_size.max(1),
            series,
        );
        log::debug!("Placed point '{}' at ({x}, {y}) in series {series}", point.label);
        self.points.push(point)
    }

    /// Moves the point at `index`. Only the coordinates change.
    ///
    /// Returns `false` if no such point exists.
    pub fn move_point(&mut self, index: usize, x: f64, y: f64) -> bool {
        match self.points.get_mut(index) {
            Some(point) => {
                point.x = x;
                point.y = y;
                true
            }
            None => false,
        }
    }

    /// Appends a new series and makes it current.
    ///
    /// Returns `None` when the id space is exhausted.
    pub fn add_series(&mut self) -> Option<SeriesId> {
        match self.series.push_next() {
            Some(id) => {
                log::info!("Added series {}", u64::from(id) + 1);
                Some(id)
            }
            None => {
                log::warn!("No series id left after {}", SeriesId::MAX);
                None
            }
        }
    }

    /// Removes the current series and every point in it.
    ///
    /// Returns the removed series id and how many points went with it, or
    /// `None` when there is no series left to remove.
    pub fn remove_current_series(&mut self) -> Option<(SeriesId, usize)> {
        let id = self.series.pop_current()?;
        let removed = self.points.remove_series(id);
        log::info!("Removed series {} with {removed} point(s)", u64::from(id) + 1);
        Some((id, removed))
    }

    /// Deletes every point. Series stay as they are.
    pub fn clear_points(&mut self) {
        self.points.clear();
    }

    /// Shows or hides a series.
    pub fn set_series_visible(&mut self, id: SeriesId, visible: bool) -> bool {
        self.series.set_visible(id, visible)
    }

    /// Replaces the store wholesale with imported points.
    ///
    /// The series list is rebuilt from the distinct ids present, all visible,
    /// so the highest imported series becomes current. An empty import leaves
    /// a single series 0. Font sizes below 1 are raised to 1.
    pub fn import_points(&mut self, mut points: Vec<Point>) {
        for point in points.iter_mut().filter(|p| p.font_size == 0) {
            log::warn!("Point '{}' has font size 0, using 1", point.label);
            point.font_size = 1;
        }
        let store = PointStore::from_points(points);
        self.series = if store.is_empty() {
            SeriesList::default()
        } else {
            SeriesList::from_ids(store.iter().map(|p| p.series))
        };
        self.points = store;
    }

    /// Installs a newly loaded background image, computing its fit.
    pub fn set_background(&mut self, image_width: u32, image_height: u32) {
        self.background = Some(BackgroundLayer::new(image_width, image_height));
    }

    /// Flips background visibility without recomputing the fit.
    pub fn toggle_background(&mut self) {
        if let Some(bg) = self.background.as_mut() {
            bg.visible = !bg.visible;
        }
    }
}
