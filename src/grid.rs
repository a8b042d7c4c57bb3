//! Grid data model and edit invariants.
//!
//! This module contains the [`Grid`] type that owns the 2D cell buffer, the per-cell state used as
//! scratch space by the search algorithms, and the read-only [`CellView`] projection consumed by
//! the rendering layer.

use color_eyre::eyre::{ensure, Result};

/// Sentinel distance for cells not yet reached by a search.
///
/// This constant stands in for an infinite distance; any relaxation with a real distance compares
/// strictly smaller than it.
pub(crate) const INFINITY: u32 = u32::MAX;

/// One addressable grid position.
///
/// This structure holds the wall flag together with the per-search scratch fields. The start and
/// end markers are deliberately not stored here: their coordinates live on the [`Grid`] itself so
/// that the marker position can never drift out of sync with a per-cell flag, and the mutual
/// exclusivity of start/end/wall is structural rather than enforced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    /// Whether this cell is an obstacle that no path may cross.
    pub(crate) wall: bool,
    /// Whether a search run has finalized this cell.
    pub(crate) visited: bool,
    /// Whether this cell lies on the reconstructed shortest path.
    pub(crate) on_path: bool,
    /// Search-scratch distance from the start cell, [`INFINITY`] until relaxed.
    pub(crate) distance: u32,
    /// Search-scratch priority used only by the heuristic-guided variant.
    pub(crate) score: u32,
    /// Flat index of the cell this one was reached from during search, if any.
    ///
    /// This field stores a parent index into the grid's cell buffer rather than any kind of live
    /// reference, so a snapshot's predecessor chain can never alias cells of the live grid.
    pub(crate) predecessor: Option<usize>,
}

impl Cell {
    /// Creates an empty non-wall cell with scratch fields in their initial search state.
    const fn empty() -> Self {
        Self {
            wall: false,
            visited: false,
            on_path: false,
            distance: INFINITY,
            score: INFINITY,
            predecessor: None,
        }
    }

    /// Clears the search-scratch fields, preserving the wall flag.
    fn clear_scratch(&mut self) {
        self.visited = false;
        self.on_path = false;
        self.distance = INFINITY;
        self.score = INFINITY;
        self.predecessor = None;
    }
}

/// Read-only per-cell projection handed to the rendering layer.
///
/// This structure exposes exactly the fields a renderer needs to choose a visual style for one
/// cell and nothing else; the search-scratch numbers stay internal to the grid and the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CellView {
    /// Whether this cell is the start marker.
    pub(crate) is_start: bool,
    /// Whether this cell is the end marker.
    pub(crate) is_end: bool,
    /// Whether this cell is a wall.
    pub(crate) is_wall: bool,
    /// Whether a search finalized this cell.
    pub(crate) visited: bool,
    /// Whether this cell lies on the revealed path.
    pub(crate) on_path: bool,
}

/// Fixed-size rectangular cell buffer with start/end markers.
///
/// This structure is the single state container for the visualizer core. Its dimensions are set at
/// construction and immutable thereafter; every edit operation rejects invalid targets as a silent
/// no-op, so no sequence of public calls can reach an illegal state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Grid {
    /// Number of rows, fixed at construction.
    rows: usize,
    /// Number of columns, fixed at construction.
    cols: usize,
    /// Row-major cell buffer of length `rows * cols`.
    cells: Vec<Cell>,
    /// Current coordinates of the start marker.
    start: (usize, usize),
    /// Current coordinates of the end marker.
    end: (usize, usize),
    /// Start coordinates restored by [`Grid::clear`].
    default_start: (usize, usize),
    /// End coordinates restored by [`Grid::clear`].
    default_end: (usize, usize),
}

impl Grid {
    /// Builds a new wall-free grid with the given shape and marker placement.
    ///
    /// # Errors
    ///
    /// This function returns an error if either dimension is zero, if a marker coordinate lies
    /// outside the grid, or if both markers name the same cell.
    pub(crate) fn new(
        rows: usize,
        cols: usize,
        start: (usize, usize),
        end: (usize, usize),
    ) -> Result<Self> {
        ensure!(rows > 0 && cols > 0, "grid dimensions must be nonzero");
        ensure!(
            start.0 < rows && start.1 < cols,
            "start marker out of bounds"
        );
        ensure!(end.0 < rows && end.1 < cols, "end marker out of bounds");
        ensure!(start != end, "start and end markers must differ");

        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::empty(); rows * cols],
            start,
            end,
            default_start: start,
            default_end: end,
        })
    }

    /// Returns the number of rows.
    pub(crate) const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub(crate) const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the current start marker coordinates.
    pub(crate) const fn start(&self) -> (usize, usize) {
        self.start
    }

    /// Returns the current end marker coordinates.
    pub(crate) const fn end(&self) -> (usize, usize) {
        self.end
    }

    /// Converts a coordinate pair to a flat index into the cell buffer.
    pub(crate) const fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Converts a flat cell index back to a coordinate pair.
    pub(crate) const fn coords(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    /// Returns a shared reference to the cell at the given coordinates.
    ///
    /// # Panics
    ///
    /// This function panics if the coordinates are out of bounds; all callers stay within the
    /// shape they obtained from [`Grid::rows`] and [`Grid::cols`].
    pub(crate) fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.cells[self.index(row, col)]
    }

    /// Returns a mutable reference to the cell at the given coordinates.
    pub(crate) fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        let index = self.index(row, col);
        &mut self.cells[index]
    }

    /// Returns the display projection for the cell at the given coordinates.
    pub(crate) fn view(&self, row: usize, col: usize) -> CellView {
        let cell = self.cell(row, col);

        CellView {
            is_start: (row, col) == self.start,
            is_end: (row, col) == self.end,
            is_wall: cell.wall,
            visited: cell.visited,
            on_path: cell.on_path,
        }
    }

    /// Flips the wall flag of the cell at the given coordinates.
    ///
    /// This function is a silent no-op when the target is the start or end marker, which keeps the
    /// marker/wall exclusivity invariant intact. Applying it twice to the same plain cell restores
    /// the original wall layout.
    pub(crate) fn toggle_wall(&mut self, row: usize, col: usize) {
        if (row, col) == self.start || (row, col) == self.end {
            return;
        }

        let cell = self.cell_mut(row, col);
        cell.wall = !cell.wall;
    }

    /// Relocates the start marker to the given cell.
    ///
    /// This function rejects the move as a silent no-op when the target is a wall or the end
    /// marker's current cell; the grid is left unchanged in that case.
    pub(crate) fn move_start(&mut self, row: usize, col: usize) {
        if (row, col) == self.end || self.cell(row, col).wall {
            return;
        }

        self.start = (row, col);
    }

    /// Relocates the end marker to the given cell.
    ///
    /// This function rejects the move as a silent no-op when the target is a wall or the start
    /// marker's current cell.
    pub(crate) fn move_end(&mut self, row: usize, col: usize) {
        if (row, col) == self.start || self.cell(row, col).wall {
            return;
        }

        self.end = (row, col);
    }

    /// Clears the search-scratch fields of every cell, preserving walls and markers.
    ///
    /// The caller gates this behind the running flag; the grid itself has no notion of an
    /// animation being in flight.
    pub(crate) fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.clear_scratch();
        }
    }

    /// Restores the grid to its default state: no walls, markers at their construction
    /// coordinates, scratch fields cleared.
    pub(crate) fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::empty();
        }
        self.start = self.default_start;
        self.end = self.default_end;
    }

    /// Produces an independent copy of this grid for a single search run.
    ///
    /// The copy shares shape, wall layout and marker placement with the live grid but has all
    /// scratch fields reset, so search mutation never leaks into an in-flight animation.
    pub(crate) fn snapshot(&self) -> Self {
        let mut copy = self.clone();
        copy.reset();
        copy
    }

    /// Returns the traversable orthogonal neighbors of the given cell.
    ///
    /// Neighbors are produced in fixed up, down, left, right order, skipping coordinates that fall
    /// outside the grid and cells that are walls. Both search variants inherit their tie-breaking
    /// from this order, so it must never change.
    pub(crate) fn neighbors(&self, row: usize, col: usize) -> Vec<(usize, usize)> {
        let mut result = Vec::with_capacity(4);

        if row > 0 {
            result.push((row - 1, col));
        }
        if row + 1 < self.rows {
            result.push((row + 1, col));
        }
        if col > 0 {
            result.push((row, col - 1));
        }
        if col + 1 < self.cols {
            result.push((row, col + 1));
        }

        result.retain(|&(nrow, ncol)| !self.cell(nrow, ncol).wall);
        result
    }
}
