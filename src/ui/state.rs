//! Application state management structures.
//!
//! This module contains the main application struct and the state it keeps
//! beside the core [`Workspace`]: the background texture, file operations in
//! flight, and the persisted user preferences.

use crate::interaction::InteractionController;
use crate::state::{PlacementSettings, Workspace};
use eframe::egui;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{channel, Receiver, Sender};

/// User preferences remembered between sessions.
///
/// Points, series and the background image are never persisted; the only way
/// to keep them is an explicit export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Symbol, label style and font size for new points
    pub placement: PlacementSettings,
    /// Whether the connecting line is drawn
    pub show_lines: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            placement: PlacementSettings::default(),
            show_lines: false,
        }
    }
}

/// State related to file operations.
///
/// Dialogs run asynchronously; their results come back through a channel and
/// are applied on the UI thread.
pub struct FileState {
    /// Operation requested by the toolbar this frame
    pub pending: Option<PendingFileOperation>,
    /// Channel for receiving file operation results from async contexts
    pub sender: Option<Sender<FileOperationResult>>,
    /// Receiving end drained every frame
    pub receiver: Option<Receiver<FileOperationResult>>,
}

impl Default for FileState {
    fn default() -> Self {
        let (sender, receiver) = channel();
        Self {
            pending: None,
            sender: Some(sender),
            receiver: Some(receiver),
        }
    }
}

/// A file operation waiting to be started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingFileOperation {
    /// Save the points as JSON
    ExportJson,
    /// Save the points as SVG
    ExportSvg,
    /// Save the points as a PNG rendering (native only)
    ExportPng,
    /// Pick a JSON file and replace the points with it
    ImportJson,
    /// Pick a raster image to use as the background
    LoadImage,
}

/// Messages sent from async file operations back to the main app.
#[derive(Debug)]
pub enum FileOperationResult {
    /// A file was written to the given path
    Saved(String),
    /// A JSON document was read: name and content
    JsonLoaded(String, String),
    /// An image file was read: name and raw bytes
    ImageLoaded(String, Vec<u8>),
    /// Operation failed with an error message
    OperationFailed(String),
}

/// The main application structure containing the workspace and UI state.
///
/// This struct implements the `eframe::App` trait; all point and series
/// mutations go through the core [`Workspace`].
pub struct DotsApp {
    /// Points, series, placement settings and background placement
    pub workspace: Workspace,
    /// Pointer state machine for placing and dragging points
    pub controller: InteractionController,
    /// Texture of the loaded background image
    pub background_texture: Option<egui::TextureHandle>,
    /// Screen rectangle of the canvas in the last frame
    pub canvas_rect: Option<egui::Rect>,
    /// Text of the most recent JSON export
    pub json_output: String,
    /// Last informational or error message for the status bar
    pub status: Option<String>,
    /// File operations state
    pub file: FileState,
}

impl Default for DotsApp {
    fn default() -> Self {
        Self {
            workspace: Workspace::new(),
            controller: InteractionController::new(),
            background_texture: None,
            canvas_rect: None,
            json_output: String::new(),
            status: None,
            file: FileState::default(),
        }
    }
}

impl DotsApp {
    /// Current preferences, read from the workspace.
    pub fn preferences(&self) -> Preferences {
        Preferences {
            placement: self.workspace.placement,
            show_lines: self.workspace.show_lines,
        }
    }

    /// Applies stored preferences to the workspace.
    pub fn apply_preferences(&mut self, prefs: Preferences) {
        self.workspace.placement = prefs.placement;
        self.workspace.show_lines = prefs.show_lines;
    }

    /// Serializes the persisted preferences to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.preferences())
    }

    /// Creates a fresh app carrying the preferences stored in `json`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let prefs: Preferences = serde_json::from_str(json)?;
        let mut app = Self::default();
        app.apply_preferences(prefs);
        Ok(app)
    }
}
