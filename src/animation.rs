//! Trace replay and animation scheduling.
//!
//! This module turns a completed search outcome into a time-ordered sequence of reveal steps and
//! plays that sequence against the live grid. The replay has two back-to-back phases: every
//! visited cell is revealed at a fixed delay, then every path cell at a (larger) fixed delay, the
//! path phase starting strictly after the last visited reveal. The step queue is precomputed, so
//! for a given trace, path and pair of delays the same steps fire in the same order at the same
//! offsets.
//!
//! Every scheduled run is tagged with a generation. Aborting a replay bumps the generation and a
//! pending step whose tag no longer matches is drained without being applied, so a stale step can
//! never write onto a grid that was reset underneath it.

use std::time::{Duration, Instant};

use crate::grid::Grid;

/// One reveal applied to the live grid during replay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Reveal {
    /// Mark the cell as visited by the search.
    Visited(usize, usize),
    /// Mark the cell as part of the reconstructed path.
    Path(usize, usize),
}

/// One scheduled reveal step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Step {
    /// The reveal to apply.
    reveal: Reveal,
    /// Offset from the start of the replay at which this step becomes due.
    due: Duration,
    /// Generation the step belongs to; stale steps are dropped, not applied.
    generation: u64,
}

/// Replays a precomputed search trace against the live grid.
///
/// This structure is the only writer of the live grid while a replay is in flight; the interaction
/// controller is the only writer otherwise, and the running gate keeps the two temporally
/// disjoint. The event loop drives it by calling [`Scheduler::update`] once per tick.
pub(crate) struct Scheduler {
    /// Queue of scheduled steps for the current and any aborted generation.
    steps: Vec<Step>,
    /// Index of the next step that has not yet come due.
    next: usize,
    /// Current run generation; bumped on every begin and abort.
    generation: u64,
    /// Time origin of the current replay.
    started_at: Instant,
    /// Delay between consecutive visited-cell reveals.
    visit_delay: Duration,
    /// Delay between consecutive path-cell reveals.
    path_delay: Duration,
}

impl Scheduler {
    /// Creates an idle scheduler with the given phase delays.
    pub(crate) fn new(visit_delay: Duration, path_delay: Duration) -> Self {
        Self {
            steps: Vec::new(),
            next: 0,
            generation: 0,
            started_at: Instant::now(),
            visit_delay,
            path_delay,
        }
    }

    /// Reports whether a replay is in flight.
    ///
    /// The gate is true from the moment a run is scheduled until its final reveal has been
    /// applied. Steps left over from an aborted generation do not count: editing is re-enabled the
    /// moment a replay is aborted even while stale steps are still draining.
    pub(crate) fn is_running(&self) -> bool {
        self.steps[self.next..]
            .iter()
            .any(|step| step.generation == self.generation)
    }

    /// Schedules the replay of one search outcome.
    ///
    /// Rejected as a silent no-op while a replay is already running. The trace is revealed first,
    /// one cell per visit delay, then the path, one cell per path delay, starting one path delay
    /// after the last visited reveal.
    pub(crate) fn begin(&mut self, trace: &[(usize, usize)], path: &[(usize, usize)]) {
        if self.is_running() {
            return;
        }

        self.generation += 1;
        self.steps = plan(trace, path, self.visit_delay, self.path_delay, self.generation);
        self.next = 0;
        self.started_at = Instant::now();
    }

    /// Abandons the current replay.
    ///
    /// Pending steps stay queued but belong to a dead generation: they drain as they come due and
    /// are dropped instead of applied.
    pub(crate) fn abort(&mut self) {
        self.generation += 1;
    }

    /// Applies every due reveal to the live grid.
    pub(crate) fn update(&mut self, grid: &mut Grid) {
        self.update_at(grid, Instant::now());
    }

    /// Applies every reveal due at the given instant to the live grid.
    ///
    /// Steps fire strictly in queue order; a step from a stale generation is consumed without
    /// touching the grid.
    fn update_at(&mut self, grid: &mut Grid, now: Instant) {
        let elapsed = now.saturating_duration_since(self.started_at);

        while let Some(step) = self.steps.get(self.next) {
            if step.due > elapsed {
                break;
            }

            if step.generation == self.generation {
                match step.reveal {
                    Reveal::Visited(row, col) => grid.cell_mut(row, col).visited = true,
                    Reveal::Path(row, col) => grid.cell_mut(row, col).on_path = true,
                }
            }
            self.next += 1;
        }
    }
}

/// Builds the deterministic step queue for one search outcome.
///
/// Visited reveal `i` comes due at `(i + 1) * visit_delay`; path reveal `j` comes due one path
/// delay per step after the final visited reveal. The queue is strictly ordered by due time with
/// the whole visited phase preceding the whole path phase.
fn plan(
    trace: &[(usize, usize)],
    path: &[(usize, usize)],
    visit_delay: Duration,
    path_delay: Duration,
    generation: u64,
) -> Vec<Step> {
    let mut steps = Vec::with_capacity(trace.len() + path.len());

    for (index, &(row, col)) in trace.iter().enumerate() {
        steps.push(Step {
            reveal: Reveal::Visited(row, col),
            due: visit_delay * (index as u32 + 1),
            generation,
        });
    }

    let visited_phase = visit_delay * trace.len() as u32;
    for (index, &(row, col)) in path.iter().enumerate() {
        steps.push(Step {
            reveal: Reveal::Path(row, col),
            due: visited_phase + path_delay * (index as u32 + 1),
            generation,
        });
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    const VISIT: Duration = Duration::from_millis(10);
    const PATH: Duration = Duration::from_millis(50);

    fn grid() -> Grid {
        Grid::new(4, 4, (0, 0), (3, 3)).expect("failed to create test grid")
    }

    fn trace_and_path() -> (Vec<(usize, usize)>, Vec<(usize, usize)>) {
        (
            vec![(0, 0), (0, 1), (1, 0), (1, 1)],
            vec![(0, 0), (0, 1), (1, 1)],
        )
    }

    #[test]
    fn test_plan_is_deterministic() {
        let (trace, path) = trace_and_path();

        let first = plan(&trace, &path, VISIT, PATH, 1);
        let second = plan(&trace, &path, VISIT, PATH, 1);

        assert_eq!(first, second);
    }

    #[test]
    fn test_plan_orders_visited_phase_before_path_phase() {
        let (trace, path) = trace_and_path();

        let steps = plan(&trace, &path, VISIT, PATH, 1);

        assert_eq!(steps.len(), trace.len() + path.len());
        assert!(steps.windows(2).all(|pair| pair[0].due <= pair[1].due));

        let last_visited_due = VISIT * trace.len() as u32;
        for step in &steps {
            match step.reveal {
                Reveal::Visited(..) => assert!(step.due <= last_visited_due),
                Reveal::Path(..) => assert!(step.due > last_visited_due),
            }
        }
    }

    #[test]
    fn test_running_gate_spans_both_phases() {
        let mut grid = grid();
        let mut scheduler = Scheduler::new(VISIT, PATH);
        let (trace, path) = trace_and_path();

        scheduler.begin(&trace, &path);
        assert!(scheduler.is_running());

        let origin = scheduler.started_at;
        scheduler.update_at(&mut grid, origin + VISIT * trace.len() as u32);
        assert!(scheduler.is_running(), "gate must stay set through the path phase");

        scheduler.update_at(
            &mut grid,
            origin + VISIT * trace.len() as u32 + PATH * path.len() as u32,
        );
        assert!(!scheduler.is_running());
    }

    #[test]
    fn test_reveals_fire_in_trace_order() {
        let mut grid = grid();
        let mut scheduler = Scheduler::new(VISIT, PATH);
        let (trace, path) = trace_and_path();

        scheduler.begin(&trace, &path);
        let origin = scheduler.started_at;

        scheduler.update_at(&mut grid, origin + VISIT * 2);
        assert!(grid.cell(0, 0).visited);
        assert!(grid.cell(0, 1).visited);
        assert!(!grid.cell(1, 0).visited);
        assert!(!grid.cell(1, 1).on_path);

        scheduler.update_at(&mut grid, origin + VISIT * 4 + PATH * 3);
        assert!(grid.cell(1, 1).visited);
        assert!(grid.cell(0, 0).on_path);
        assert!(grid.cell(1, 1).on_path);
    }

    #[test]
    fn test_begin_while_running_is_rejected() {
        let mut scheduler = Scheduler::new(VISIT, PATH);
        let (trace, path) = trace_and_path();

        scheduler.begin(&trace, &path);
        let generation = scheduler.generation;
        let steps = scheduler.steps.clone();

        scheduler.begin(&trace, &path);
        assert_eq!(scheduler.generation, generation);
        assert_eq!(scheduler.steps, steps);
    }

    #[test]
    fn test_aborted_generation_steps_are_dropped() {
        let mut grid = grid();
        let mut scheduler = Scheduler::new(VISIT, PATH);
        let (trace, path) = trace_and_path();

        scheduler.begin(&trace, &path);
        let origin = scheduler.started_at;
        scheduler.abort();
        assert!(!scheduler.is_running());

        scheduler.update_at(&mut grid, origin + VISIT * 10 + PATH * 10);
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                assert!(!grid.cell(row, col).visited);
                assert!(!grid.cell(row, col).on_path);
            }
        }
        assert_eq!(scheduler.next, scheduler.steps.len(), "stale steps must drain");
    }

    #[test]
    fn test_empty_path_clears_gate_after_visited_phase() {
        let mut grid = grid();
        let mut scheduler = Scheduler::new(VISIT, PATH);
        let (trace, _) = trace_and_path();

        scheduler.begin(&trace, &[]);
        let origin = scheduler.started_at;
        scheduler.update_at(&mut grid, origin + VISIT * trace.len() as u32);

        assert!(!scheduler.is_running());
        assert!(grid.cell(1, 1).visited);
    }
}
