//! Shortest-path search engines.
//!
//! This module contains the two run-to-completion search variants that consume a grid snapshot and
//! produce a visitation trace plus a reconstructed path. Both variants share one open-set
//! representation: a binary min-heap keyed by `(key, seq)` where `seq` is a monotonically
//! increasing insertion counter. Among equal keys the entry pushed earliest pops first, so with
//! neighbors relaxed in the grid's fixed up/down/left/right order the tie-break is fully
//! deterministic. Stale entries (already finalized, or superseded by a cheaper relaxation) are
//! skipped when popped instead of being removed; no decrease-key structure is needed.

use std::{cmp::Ordering, collections::BinaryHeap, fmt};

use clap::ValueEnum;

use crate::grid::Grid;

/// Selectable search algorithm variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    /// Uniform-cost search, equivalent to shortest-path-by-hop-count on an unweighted grid.
    UniformCost,
    /// Heuristic-guided search (A*) using the Manhattan distance to the end marker.
    AStar,
}

impl Algorithm {
    /// Returns the other variant, for cycling through algorithms from the keyboard.
    pub(crate) const fn toggled(self) -> Self {
        match self {
            Self::UniformCost => Self::AStar,
            Self::AStar => Self::UniformCost,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UniformCost => write!(formatter, "uniform cost"),
            Self::AStar => write!(formatter, "A*"),
        }
    }
}

/// Result of one completed search run.
///
/// This structure carries the ordered sequence of finalized cells (the trace that drives the
/// animation) and the reconstructed path from start to end inclusive, empty when the end marker is
/// unreachable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SearchOutcome {
    /// Cells in the order the search finalized them.
    pub(crate) trace: Vec<(usize, usize)>,
    /// Ordered path from start to end inclusive, or empty when no path exists.
    pub(crate) path: Vec<(usize, usize)>,
}

/// One open-set entry awaiting finalization.
///
/// Ordering is reversed on the key so that [`BinaryHeap`], a max-heap, pops the smallest key
/// first, and reversed on the insertion counter so that among equal keys the earliest push wins.
struct OpenEntry {
    /// Priority of the entry: distance for uniform cost, distance plus heuristic for A*.
    key: u32,
    /// Insertion counter breaking ties among equal keys in first-pushed order.
    seq: u32,
    /// Flat index of the cell this entry refers to.
    cell: usize,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.seq == other.seq
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Runs the selected algorithm to completion over the given snapshot.
///
/// The snapshot is mutated freely as scratch space; the caller keeps the live grid untouched until
/// the returned trace is replayed.
pub(crate) fn run(algorithm: Algorithm, snapshot: &mut Grid) -> SearchOutcome {
    match algorithm {
        Algorithm::UniformCost => uniform_cost(snapshot),
        Algorithm::AStar => a_star(snapshot),
    }
}

/// Manhattan distance between two cells.
///
/// Admissible and consistent on a uniform-cost orthogonal grid, so the heuristic-guided variant
/// finds paths of the same length as the uniform-cost one.
pub(crate) const fn manhattan(from: (usize, usize), to: (usize, usize)) -> u32 {
    (from.0.abs_diff(to.0) + from.1.abs_diff(to.1)) as u32
}

/// Uniform-cost search over the snapshot.
///
/// This function repeatedly finalizes the unfinalized cell with minimum distance and relaxes its
/// neighbors by one hop. When the heap runs dry before the end marker is finalized, every
/// remaining cell sits at the infinite sentinel and the end is unreachable: the trace holds
/// whatever was finalized and the path is empty.
fn uniform_cost(grid: &mut Grid) -> SearchOutcome {
    let (start_row, start_col) = grid.start();
    let end = grid.end();

    grid.cell_mut(start_row, start_col).distance = 0;

    let mut open = BinaryHeap::new();
    let mut seq = 0_u32;
    let mut trace = Vec::new();
    open.push(OpenEntry {
        key: 0,
        seq,
        cell: grid.index(start_row, start_col),
    });

    while let Some(OpenEntry { cell, .. }) = open.pop() {
        let (row, col) = grid.coords(cell);
        if grid.cell(row, col).visited {
            continue;
        }

        grid.cell_mut(row, col).visited = true;
        trace.push((row, col));

        if (row, col) == end {
            let path = reconstruct(grid);
            return SearchOutcome { trace, path };
        }

        let next_distance = grid.cell(row, col).distance + 1;
        for (nrow, ncol) in grid.neighbors(row, col) {
            let neighbor = grid.cell(nrow, ncol);
            if neighbor.visited || next_distance >= neighbor.distance {
                continue;
            }

            seq += 1;
            let neighbor_index = grid.index(nrow, ncol);
            let neighbor = grid.cell_mut(nrow, ncol);
            neighbor.distance = next_distance;
            neighbor.predecessor = Some(cell);
            open.push(OpenEntry {
                key: next_distance,
                seq,
                cell: neighbor_index,
            });
        }
    }

    SearchOutcome {
        trace,
        path: Vec::new(),
    }
}

/// Heuristic-guided search (A*) over the snapshot.
///
/// This function keeps an explicit open set seeded with the start cell and scored by distance plus
/// the Manhattan estimate to the end. Duplicate open entries are tolerated: a stale, non-minimal
/// entry is skipped when popped because its cell has been finalized by then.
fn a_star(grid: &mut Grid) -> SearchOutcome {
    let (start_row, start_col) = grid.start();
    let end = grid.end();

    let start_score = manhattan((start_row, start_col), end);
    {
        let start_cell = grid.cell_mut(start_row, start_col);
        start_cell.distance = 0;
        start_cell.score = start_score;
    }

    let mut open = BinaryHeap::new();
    let mut seq = 0_u32;
    let mut trace = Vec::new();
    open.push(OpenEntry {
        key: start_score,
        seq,
        cell: grid.index(start_row, start_col),
    });

    while let Some(OpenEntry { cell, .. }) = open.pop() {
        let (row, col) = grid.coords(cell);
        if grid.cell(row, col).visited {
            continue;
        }

        grid.cell_mut(row, col).visited = true;
        trace.push((row, col));

        if (row, col) == end {
            let path = reconstruct(grid);
            return SearchOutcome { trace, path };
        }

        let tentative = grid.cell(row, col).distance + 1;
        for (nrow, ncol) in grid.neighbors(row, col) {
            let neighbor = grid.cell(nrow, ncol);
            if neighbor.visited || tentative >= neighbor.distance {
                continue;
            }

            seq += 1;
            let score = tentative + manhattan((nrow, ncol), end);
            let neighbor_index = grid.index(nrow, ncol);
            let neighbor = grid.cell_mut(nrow, ncol);
            neighbor.distance = tentative;
            neighbor.score = score;
            neighbor.predecessor = Some(cell);
            open.push(OpenEntry {
                key: score,
                seq,
                cell: neighbor_index,
            });
        }
    }

    SearchOutcome {
        trace,
        path: Vec::new(),
    }
}

/// Reconstructs the path by walking predecessor indices back from the end marker.
///
/// The walk follows the parent-index table rooted at the start cell (the only finalized cell
/// without a predecessor), marks every cell on the way as part of the path, and reverses the
/// collected sequence so it reads start to end.
fn reconstruct(grid: &mut Grid) -> Vec<(usize, usize)> {
    let mut path = Vec::new();
    let (mut row, mut col) = grid.end();

    loop {
        path.push((row, col));
        grid.cell_mut(row, col).on_path = true;

        match grid.cell(row, col).predecessor {
            Some(parent) => (row, col) = grid.coords(parent),
            None => break,
        }
    }

    path.reverse();
    path
}
