//! Pointer handling for placing and dragging points.
//!
//! The controller is a two-state machine. A press near an existing point
//! grabs it; a press anywhere else places a new point. While a point is held,
//! pointer motion moves it; releasing the pointer anywhere lets it go.

use crate::constants;
use crate::state::Workspace;

/// Whether a point is currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// No point held
    #[default]
    Idle,
    /// Holding the point at this store index
    Dragging {
        /// Store index captured at press time
        index: usize,
    },
}

/// What a pointer event did to the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// An existing point was grabbed
    Grabbed(usize),
    /// A new point was placed
    Created(usize),
    /// The held point moved
    Moved(usize),
    /// The held point was released
    Released(usize),
    /// Nothing changed
    Ignored,
}

impl PointerOutcome {
    /// Returns `true` if the point store changed and the scene should be redrawn.
    pub fn mutated(self) -> bool {
        matches!(self, PointerOutcome::Created(_) | PointerOutcome::Moved(_))
    }
}

/// Translates pointer events into point creation and drag mutations.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    state: DragState,
}

impl InteractionController {
    /// Creates an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Index of the held point, if dragging.
    pub fn dragged_index(&self) -> Option<usize> {
        match self.state {
            DragState::Dragging { index } => Some(index),
            DragState::Idle => None,
        }
    }

    /// Handles a primary-button press at canvas position `(x, y)`.
    ///
    /// Hit-testing picks the first point in store order within
    /// [`constants::HIT_RADIUS`], so earlier points win over later overlapping ones.
    pub fn pointer_down(&mut self, workspace: &mut Workspace, x: f64, y: f64) -> PointerOutcome {
        match workspace.points.hit_test(x, y, constants::HIT_RADIUS) {
            Some(index) => {
                self.state = DragState::Dragging { index };
                PointerOutcome::Grabbed(index)
            }
            None => {
                self.state = DragState::Idle;
                PointerOutcome::Created(workspace.place_point(x, y))
            }
        }
    }

    /// Handles pointer motion to `(x, y)`.
    pub fn pointer_move(&mut self, workspace: &mut Workspace, x: f64, y: f64) -> PointerOutcome {
        let DragState::Dragging { index } = self.state else {
            return PointerOutcome::Ignored;
        };
        if workspace.move_point(index, x, y) {
            PointerOutcome::Moved(index)
        } else {
            // The store shrank underneath the drag.
            self.state = DragState::Idle;
            PointerOutcome::Ignored
        }
    }

    /// Handles a primary-button release anywhere.
    pub fn pointer_up(&mut self) -> PointerOutcome {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { index } => PointerOutcome::Released(index),
            DragState::Idle => PointerOutcome::Ignored,
        }
    }

    /// Drops any held point without reporting a release.
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LabelStyle, SymbolKind};

    #[test]
    fn press_on_empty_canvas_creates_point_and_stays_idle() {
        let mut ws = Workspace::new();
        let mut ctl = InteractionController::new();
        assert_eq!(ctl.pointer_down(&mut ws, 50.0, 60.0), PointerOutcome::Created(0));
        assert_eq!(ctl.state(), DragState::Idle);
        assert_eq!(ws.points.len(), 1);
        assert_eq!(ctl.pointer_up(), PointerOutcome::Ignored);
    }

    #[test]
    fn drag_changes_only_coordinates() {
        let mut ws = Workspace::new();
        ws.placement.symbol = SymbolKind::Star;
        ws.placement.label_style = LabelStyle::Roman;
        ws.placement.font_size = 18;
        let mut ctl = InteractionController::new();
        ctl.pointer_down(&mut ws, 100.0, 100.0);
        let before = ws.points.get(0).unwrap().clone();

        assert_eq!(ctl.pointer_down(&mut ws, 104.0, 103.0), PointerOutcome::Grabbed(0));
        assert_eq!(ctl.pointer_move(&mut ws, 150.0, 120.0), PointerOutcome::Moved(0));
        assert_eq!(ctl.pointer_move(&mut ws, 200.0, 250.0), PointerOutcome::Moved(0));
        assert_eq!(ctl.pointer_up(), PointerOutcome::Released(0));

        let after = ws.points.get(0).unwrap();
        assert_eq!((after.x, after.y), (200.0, 250.0));
        assert_eq!(after.symbol, before.symbol);
        assert_eq!(after.label, before.label);
        assert_eq!(after.font_size, before.font_size);
        assert_eq!(after.series, before.series);
        assert_eq!(ws.points.len(), 1);
    }

    #[test]
    fn overlapping_points_grab_the_earlier_one() {
        let mut ws = Workspace::new();
        ws.place_point(100.0, 100.0);
        ws.place_point(106.0, 100.0);
        let mut ctl = InteractionController::new();
        // Closer to the second point, but the first is still within range.
        assert_eq!(ctl.pointer_down(&mut ws, 105.0, 100.0), PointerOutcome::Grabbed(0));
        assert_eq!(ctl.dragged_index(), Some(0));
    }

    #[test]
    fn motion_while_idle_is_ignored() {
        let mut ws = Workspace::new();
        ws.place_point(10.0, 10.0);
        let mut ctl = InteractionController::new();
        assert_eq!(ctl.pointer_move(&mut ws, 10.0, 10.0), PointerOutcome::Ignored);
        assert_eq!(ws.points.get(0).unwrap().x, 10.0);
    }

    #[test]
    fn drag_of_vanished_point_returns_to_idle() {
        let mut ws = Workspace::new();
        ws.place_point(10.0, 10.0);
        let mut ctl = InteractionController::new();
        ctl.pointer_down(&mut ws, 10.0, 10.0);
        ws.clear_points();
        assert_eq!(ctl.pointer_move(&mut ws, 20.0, 20.0), PointerOutcome::Ignored);
        assert_eq!(ctl.state(), DragState::Idle);
    }
}
