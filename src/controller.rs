//! Pointer-driven edit-mode state machine.
//!
//! This module translates press/enter/release events into grid edits. Every transition is gated by
//! the running flag and every illegal target is absorbed by the grid as a silent no-op, so no
//! event sequence produces an error.

use crate::grid::Grid;

/// Edit modes of the interaction state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EditMode {
    /// No pointer interaction in progress.
    Idle,
    /// A press started on a plain cell; entered cells have their wall flag toggled.
    DrawingWalls,
    /// A press started on the start marker; entered cells receive the marker.
    DraggingStart,
    /// A press started on the end marker; entered cells receive the marker.
    DraggingEnd,
}

/// Interaction state machine mutating the live grid between searches.
pub(crate) struct Controller {
    /// Current edit mode.
    mode: EditMode,
}

impl Controller {
    /// Creates an idle controller.
    pub(crate) const fn new() -> Self {
        Self {
            mode: EditMode::Idle,
        }
    }

    /// Returns the current edit mode.
    pub(crate) const fn mode(&self) -> EditMode {
        self.mode
    }

    /// Forces the controller back to idle.
    ///
    /// Called when a run is triggered so an interrupted drag does not survive the replay.
    pub(crate) fn cancel(&mut self) {
        self.mode = EditMode::Idle;
    }

    /// Handles a pointer press on the given cell.
    ///
    /// From idle, a press on the start or end marker begins a drag of that marker; a press on any
    /// other cell begins wall drawing and immediately toggles that cell's wall. Ignored while a
    /// replay is running or while another interaction is already in progress.
    pub(crate) fn press(&mut self, grid: &mut Grid, running: bool, row: usize, col: usize) {
        if running || self.mode != EditMode::Idle {
            return;
        }

        if (row, col) == grid.start() {
            self.mode = EditMode::DraggingStart;
        } else if (row, col) == grid.end() {
            self.mode = EditMode::DraggingEnd;
        } else {
            self.mode = EditMode::DrawingWalls;
            grid.toggle_wall(row, col);
        }
    }

    /// Handles the pointer entering the given cell while pressed.
    ///
    /// While drawing this toggles the entered cell's wall; while dragging it relocates the
    /// respective marker, with rejections leaving the marker in place. Ignored while running or
    /// when idle.
    pub(crate) fn enter(&mut self, grid: &mut Grid, running: bool, row: usize, col: usize) {
        if running {
            return;
        }

        match self.mode {
            EditMode::Idle => {}
            EditMode::DrawingWalls => grid.toggle_wall(row, col),
            EditMode::DraggingStart => grid.move_start(row, col),
            EditMode::DraggingEnd => grid.move_end(row, col),
        }
    }

    /// Handles the pointer release, returning the machine to idle.
    pub(crate) fn release(&mut self, running: bool) {
        if running {
            return;
        }

        self.mode = EditMode::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(6, 6, (1, 1), (4, 4)).expect("failed to create test grid")
    }

    #[test]
    fn test_press_on_plain_cell_starts_drawing_and_toggles() {
        let mut grid = grid();
        let mut controller = Controller::new();

        controller.press(&mut grid, false, 0, 0);

        assert_eq!(controller.mode(), EditMode::DrawingWalls);
        assert!(grid.cell(0, 0).wall);
    }

    #[test]
    fn test_drag_to_draw_toggles_entered_cells() {
        let mut grid = grid();
        let mut controller = Controller::new();

        controller.press(&mut grid, false, 0, 0);
        controller.enter(&mut grid, false, 0, 1);
        controller.enter(&mut grid, false, 0, 2);
        controller.release(false);

        assert!(grid.cell(0, 1).wall);
        assert!(grid.cell(0, 2).wall);
        assert_eq!(controller.mode(), EditMode::Idle);
    }

    #[test]
    fn test_press_on_markers_starts_the_matching_drag() {
        let mut grid = grid();
        let mut controller = Controller::new();

        controller.press(&mut grid, false, 1, 1);
        assert_eq!(controller.mode(), EditMode::DraggingStart);
        controller.release(false);

        controller.press(&mut grid, false, 4, 4);
        assert_eq!(controller.mode(), EditMode::DraggingEnd);
    }

    #[test]
    fn test_dragging_start_relocates_the_marker() {
        let mut grid = grid();
        let mut controller = Controller::new();

        controller.press(&mut grid, false, 1, 1);
        controller.enter(&mut grid, false, 1, 2);
        controller.enter(&mut grid, false, 2, 2);
        controller.release(false);

        assert_eq!(grid.start(), (2, 2));
        assert!(!grid.cell(1, 1).wall, "dragging a marker must not paint walls");
    }

    #[test]
    fn test_dragging_over_illegal_targets_leaves_marker_in_place() {
        let mut grid = grid();
        grid.toggle_wall(2, 1);
        let mut controller = Controller::new();

        controller.press(&mut grid, false, 1, 1);
        controller.enter(&mut grid, false, 2, 1);
        assert_eq!(grid.start(), (1, 1));
        controller.enter(&mut grid, false, 4, 4);
        assert_eq!(grid.start(), (1, 1));
        controller.enter(&mut grid, false, 3, 1);
        assert_eq!(grid.start(), (3, 1));
    }

    #[test]
    fn test_all_events_are_gated_while_running() {
        let mut grid = grid();
        let pristine = grid.clone();
        let mut controller = Controller::new();

        controller.press(&mut grid, true, 0, 0);
        controller.enter(&mut grid, true, 0, 1);
        controller.release(true);

        assert_eq!(grid, pristine);
        assert_eq!(controller.mode(), EditMode::Idle);
    }

    #[test]
    fn test_press_while_interacting_is_ignored() {
        let mut grid = grid();
        let mut controller = Controller::new();

        controller.press(&mut grid, false, 1, 1);
        controller.press(&mut grid, false, 0, 0);

        assert_eq!(controller.mode(), EditMode::DraggingStart);
        assert!(!grid.cell(0, 0).wall);
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut grid = grid();
        let mut controller = Controller::new();

        controller.press(&mut grid, false, 0, 0);
        controller.cancel();

        assert_eq!(controller.mode(), EditMode::Idle);
    }
}
