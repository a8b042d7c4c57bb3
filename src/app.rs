//! Core application state and run loop.

use color_eyre::eyre::Result;
use ratatui::{layout::Rect, DefaultTerminal};

use crate::{
    animation::Scheduler,
    config::Config,
    controller::Controller,
    events,
    grid::Grid,
    search::{self, Algorithm},
    ui,
};

/// Application state container for the visualizer.
///
/// This structure holds everything the event loop touches: the live grid, the interaction state
/// machine that edits it while idle, the scheduler that writes to it while a replay is running,
/// and the currently selected algorithm. The running gate checked by every mutating entry point is
/// the scheduler's.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit but it starts off `false`.
    pub(crate) exit: bool,
    /// The live grid edited by the user and painted by the replay.
    pub(crate) grid: Grid,
    /// Pointer-driven edit-mode state machine.
    pub(crate) controller: Controller,
    /// Replay scheduler; its gate decides whether editing is allowed.
    pub(crate) scheduler: Scheduler,
    /// Algorithm used by the next triggered run.
    pub(crate) algorithm: Algorithm,
    /// Screen area the grid occupied during the last redraw.
    ///
    /// This field is written by the rendering layer and read by the event translation to map
    /// terminal mouse coordinates back onto grid cells.
    pub(crate) grid_area: Rect,
    /// Grid cell the pointer last reported while the left button was held.
    ///
    /// Each cell spans two terminal columns, so a smooth drag delivers several mouse events per
    /// cell. The event translation forwards `enter` only when this field changes, one call per
    /// cell actually entered.
    pub(crate) pointer_cell: Option<(usize, usize)>,
}

impl App {
    /// Creates the application state from the parsed configuration.
    ///
    /// # Errors
    ///
    /// This function returns an error when the configured grid shape or marker placement violates
    /// the grid invariants.
    pub fn new(config: &Config) -> Result<Self> {
        let grid = Grid::new(
            config.rows,
            config.cols,
            config.start_coordinates(),
            config.end_coordinates(),
        )?;

        Ok(Self {
            exit: false,
            grid,
            controller: Controller::new(),
            scheduler: Scheduler::new(config.visit_delay(), config.path_delay()),
            algorithm: config.algorithm,
            grid_area: Rect::default(),
            pointer_cell: None,
        })
    }

    /// Runs the main loop of the application.
    ///
    /// This function redraws the frame and handles pending input events until the exit flag is
    /// set, after which it returns to the call site so the terminal can be restored.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.draw(|frame| ui::draw(self, frame))?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Reports whether a replay is in flight.
    pub(crate) fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Triggers a search run with the currently selected algorithm.
    ///
    /// Rejected as a silent no-op while a replay is already running. The search runs synchronously
    /// to completion over an independent snapshot; only then is its trace handed to the scheduler
    /// for replay against the live grid.
    pub(crate) fn run_search(&mut self) {
        if self.is_running() {
            return;
        }

        self.controller.cancel();
        self.grid.reset();

        let mut snapshot = self.grid.snapshot();
        let outcome = search::run(self.algorithm, &mut snapshot);
        self.scheduler.begin(&outcome.trace, &outcome.path);
    }

    /// Clears search-scratch state from the live grid, keeping walls and markers.
    ///
    /// Rejected as a silent no-op while running.
    pub(crate) fn reset_grid(&mut self) {
        if self.is_running() {
            return;
        }

        self.scheduler.abort();
        self.grid.reset();
    }

    /// Restores the default grid: no walls, markers at their configured coordinates.
    ///
    /// Rejected as a silent no-op while running.
    pub(crate) fn clear_grid(&mut self) {
        if self.is_running() {
            return;
        }

        self.scheduler.abort();
        self.grid.clear();
    }

    /// Switches to the other search algorithm for the next run.
    pub(crate) fn toggle_algorithm(&mut self) {
        self.algorithm = self.algorithm.toggled();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser as _;

    fn app() -> App {
        let config = Config::try_parse_from(["wayfinder", "--rows", "8", "--cols", "8"])
            .expect("failed to parse test config");
        App::new(&config).expect("failed to create test app")
    }

    #[test]
    fn test_new_places_default_markers() {
        let app = app();

        assert_eq!(app.grid.start(), (4, 2));
        assert_eq!(app.grid.end(), (4, 6));
        assert!(!app.is_running());
    }

    #[test]
    fn test_new_rejects_invalid_configuration() {
        let config = Config::try_parse_from(["wayfinder", "--rows", "5", "--start", "9,9"])
            .expect("failed to parse test config");

        assert!(App::new(&config).is_err());
    }

    #[test]
    fn test_run_search_sets_the_running_gate() {
        let mut app = app();

        app.run_search();

        assert!(app.is_running());
    }

    #[test]
    fn test_second_trigger_while_running_is_rejected() {
        let mut app = app();

        app.run_search();
        let grid_before = app.grid.clone();

        app.run_search();
        assert_eq!(app.grid, grid_before);
        assert!(app.is_running());
    }

    #[test]
    fn test_reset_and_clear_are_rejected_while_running() {
        let mut app = app();
        app.grid.toggle_wall(0, 0);

        app.run_search();
        app.reset_grid();
        app.clear_grid();

        assert!(app.grid.cell(0, 0).wall);
        assert!(app.is_running());
    }

    #[test]
    fn test_toggle_algorithm_cycles_both_variants() {
        let mut app = app();

        assert_eq!(app.algorithm, Algorithm::UniformCost);
        app.toggle_algorithm();
        assert_eq!(app.algorithm, Algorithm::AStar);
        app.toggle_algorithm();
        assert_eq!(app.algorithm, Algorithm::UniformCost);
    }

    #[test]
    fn test_run_search_discards_previous_reveal_state() {
        let mut app = app();
        app.grid.cell_mut(0, 0).visited = true;
        app.grid.cell_mut(0, 0).on_path = true;

        app.run_search();

        assert!(!app.grid.cell(0, 0).visited);
        assert!(!app.grid.cell(0, 0).on_path);
    }
}
