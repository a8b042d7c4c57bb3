//! Event handling and input translation.
//!
//! This module polls for crossterm events, maps keyboard commands onto application operations and
//! mouse events onto the controller's press/enter/release vocabulary, and drives the replay
//! scheduler once per tick.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, MouseButton, MouseEvent, MouseEventKind};

use crate::App;

/// Handles pending input events and advances the replay.
///
/// This function polls with a short timeout so the animation keeps progressing while no input
/// arrives. Scheduler updates run on every tick; the scheduler itself decides which reveals are
/// due.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(10))? {
        match event::read()? {
            Event::Key(key) => match key.code {
                KeyCode::Char('q') => app.exit = true,
                KeyCode::Char('r') => app.run_search(),
                KeyCode::Char('a') => app.toggle_algorithm(),
                KeyCode::Char('x') => app.reset_grid(),
                KeyCode::Char('c') => app.clear_grid(),
                _ => {}
            },
            Event::Mouse(mouse) => handle_mouse(app, mouse),
            _ => {}
        }
    }

    app.scheduler.update(&mut app.grid);

    Ok(())
}

/// Routes one mouse event into the interaction state machine.
///
/// Only the left button edits the grid: a button press maps to `press` on the cell under the
/// cursor, a drag to `enter`, and releasing the button to `release`. A drag delivers one terminal
/// event per column crossed while every cell spans two columns, so consecutive events over the
/// same cell are collapsed and `enter` fires once per cell actually entered. Events outside the
/// grid viewport are ignored except for the release, which always ends the interaction.
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let running = app.is_running();

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some((row, col)) = cell_at(app, mouse.column, mouse.row) {
                app.pointer_cell = Some((row, col));
                app.controller.press(&mut app.grid, running, row, col);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some((row, col)) = cell_at(app, mouse.column, mouse.row) {
                if app.pointer_cell != Some((row, col)) {
                    app.pointer_cell = Some((row, col));
                    app.controller.enter(&mut app.grid, running, row, col);
                }
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.pointer_cell = None;
            app.controller.release(running);
        }
        _ => {}
    }
}

/// Maps terminal coordinates onto the grid cell under the cursor.
///
/// Each cell occupies two terminal columns and one terminal row inside the viewport recorded
/// during the last redraw; coordinates outside that viewport map to nothing. The viewport may be
/// clipped to a small terminal, in which case the cells beyond its edge are not addressable.
fn cell_at(app: &App, column: u16, row: u16) -> Option<(usize, usize)> {
    let area = app.grid_area;
    if column < area.x || row < area.y || column >= area.right() || row >= area.bottom() {
        return None;
    }

    let grid_col = usize::from(column - area.x) / 2;
    let grid_row = usize::from(row - area.y);

    (grid_row < app.grid.rows() && grid_col < app.grid.cols()).then_some((grid_row, grid_col))
}
