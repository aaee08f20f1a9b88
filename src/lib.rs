//! # Connect the Dots
//!
//! An annotation editor for placing, labeling, and exporting points ("dots")
//! over an optional background image. Points are organized into series that
//! can be shown or hidden independently.
//!
//! ## Features
//! - Click to place a point, drag an existing point to move it
//! - Circle, star, and triangle symbols
//! - Numeric, alphabetic, and Roman numeral labels, counted per series
//! - Letterbox-fitted background images
//! - Optional connecting line through all points
//! - JSON export/import, SVG export, and PNG export on desktop
//!
//! The core (`types`, `labels`, `shapes`, `background`, `scene`,
//! `interaction`, `export`, `state`) has no UI dependency; the `ui` module
//! wraps it in an eframe application.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod background;
pub mod constants;
pub mod error;
pub mod export;
pub mod interaction;
pub mod labels;
pub mod scene;
pub mod shapes;
pub mod state;
mod types;
mod ui;

// Re-export public types and functions
pub use error::{DotsError, Result};
pub use state::{PlacementSettings, Workspace};
pub use types::*;
pub use ui::DotsApp;

/// Runs the editor as a native desktop application.
///
/// Preferences saved by a previous session are restored from eframe storage.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// use connect_the_dots::run_app;
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app()
/// }
/// ```
#[cfg(not(target_arch = "wasm32"))]
pub fn run_app() -> std::result::Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Connect the Dots")
            .with_inner_size([1200.0, 760.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Connect the Dots",
        options,
        Box::new(|cc| Ok(Box::new(restore_app(cc.storage)))),
    )
}

/// Starts the editor in the browser on the canvas element with id `the_canvas_id`.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start_web() {
    use wasm_bindgen::JsCast;

    wasm_bindgen_futures::spawn_local(async {
        let Some(canvas) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("the_canvas_id"))
            .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        else {
            log::error!("Canvas element 'the_canvas_id' not found");
            return;
        };
        let result = eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|cc| Ok(Box::new(restore_app(cc.storage)))),
            )
            .await;
        if let Err(e) = result {
            log::error!("Failed to start app: {e:?}");
        }
    });
}

fn restore_app(storage: Option<&dyn eframe::Storage>) -> DotsApp {
    storage
        .and_then(|s| s.get_string(ui::APP_STATE_KEY))
        .and_then(|json| match DotsApp::from_json(&json) {
            Ok(app) => Some(app),
            Err(e) => {
                log::warn!("Ignoring stored preferences: {e}");
                None
            }
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_default() {
        let workspace = Workspace::default();
        assert!(workspace.points.is_empty());
        assert_eq!(workspace.series.current(), Some(0));
        assert!(workspace.background.is_none());
        assert!(!workspace.show_lines);
    }

    #[test]
    fn test_restore_without_storage() {
        let app = restore_app(None);
        assert_eq!(app.workspace.placement, PlacementSettings::default());
    }
}
