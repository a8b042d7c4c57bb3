//! User interface rendering.
//!
//! This module draws the grid viewport and the surrounding chrome. It consumes only the read-only
//! per-cell projection exposed by the grid; nothing else of the core state crosses into the
//! rendering layer.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear},
    Frame,
};

use crate::{grid::CellView, App};

/// Updates the frame from the current application state.
///
/// This function renders the outer block with the algorithm and key bindings in its titles,
/// centers the grid viewport inside it, and records the viewport rectangle on the application so
/// mouse coordinates can be mapped back to cells.
pub(crate) fn draw(app: &mut App, frame: &mut Frame) {
    frame.render_widget(Clear, frame.area());

    let status = if app.is_running() {
        " running... ".to_owned()
    } else {
        format!(" [{}] (r) run / (a) algorithm / (x) reset / (c) clear / (q) quit ", app.algorithm)
    };
    let block = Block::bordered()
        .title(" wayfinder ")
        .title_bottom(status)
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner = block.inner(frame.area());
    frame.render_widget(block, frame.area());

    app.grid_area = viewport(app, inner);

    let visible_rows = usize::from(app.grid_area.height).min(app.grid.rows());
    let visible_cols = (usize::from(app.grid_area.width) / 2).min(app.grid.cols());

    for row in 0..visible_rows {
        let spans: Vec<Span<'_>> = (0..visible_cols)
            .map(|col| cell_span(app.grid.view(row, col)))
            .collect();
        let line_area = Rect::new(
            app.grid_area.x,
            app.grid_area.y + u16::try_from(row).unwrap_or(u16::MAX),
            app.grid_area.width,
            1,
        );
        frame.render_widget(Line::from(spans), line_area);
    }
}

/// Computes the centered rectangle the grid occupies inside the given area.
///
/// Each cell takes two terminal columns and one terminal row; when the terminal is too small the
/// viewport is clipped to the available area instead of scrolled.
fn viewport(app: &App, inner: Rect) -> Rect {
    let width = u16::try_from(app.grid.cols())
        .unwrap_or(u16::MAX)
        .saturating_mul(2);
    let height = u16::try_from(app.grid.rows()).unwrap_or(u16::MAX);

    let pad_x = rounded_div::u16(inner.width.saturating_sub(width), 2);
    let pad_y = rounded_div::u16(inner.height.saturating_sub(height), 2);

    Rect::new(
        inner.x + pad_x,
        inner.y + pad_y,
        width.min(inner.width),
        height.min(inner.height),
    )
}

/// Chooses the two-column span rendering one cell.
///
/// Marker flags take precedence over the path, the path over the visited shading, so a finished
/// replay reads start, path, end over a field of visited cells.
fn cell_span(view: CellView) -> Span<'static> {
    if view.is_start {
        Span::styled("S ", Style::default().fg(Color::Black).bg(Color::Green))
    } else if view.is_end {
        Span::styled("E ", Style::default().fg(Color::Black).bg(Color::Red))
    } else if view.is_wall {
        Span::styled("  ", Style::default().bg(Color::White))
    } else if view.on_path {
        Span::styled("  ", Style::default().bg(Color::Yellow))
    } else if view.visited {
        Span::styled("  ", Style::default().bg(Color::Cyan))
    } else {
        Span::styled("  ", Style::default().bg(Color::Black))
    }
}
