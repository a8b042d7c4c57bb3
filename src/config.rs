//! Command-line configuration.
//!
//! This module defines the recognized options of the visualizer: grid shape, marker placement,
//! reveal delays and the initially selected algorithm. Everything is static for the lifetime of
//! the process except the algorithm, which can also be switched from the keyboard.

use std::time::Duration;

use clap::Parser;

use crate::search::Algorithm;

/// Command-line options of the visualizer.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Config {
    /// Number of grid rows.
    #[arg(long, default_value_t = 20)]
    pub rows: usize,
    /// Number of grid columns.
    #[arg(long, default_value_t = 40)]
    pub cols: usize,
    /// Start marker placement as `row,col`; defaults to the left quarter of the middle row.
    #[arg(long, value_parser = parse_coordinate)]
    pub start: Option<(usize, usize)>,
    /// End marker placement as `row,col`; defaults to the right quarter of the middle row.
    #[arg(long, value_parser = parse_coordinate)]
    pub end: Option<(usize, usize)>,
    /// Milliseconds between two visited-cell reveals.
    #[arg(long, default_value_t = 10)]
    pub visit_delay: u64,
    /// Milliseconds between two path-cell reveals.
    #[arg(long, default_value_t = 50)]
    pub path_delay: u64,
    /// Search algorithm used when a run is triggered.
    #[arg(long, value_enum, default_value_t = Algorithm::UniformCost)]
    pub algorithm: Algorithm,
}

impl Config {
    /// Returns the configured start coordinates, or the default derived from the grid shape.
    #[must_use]
    pub fn start_coordinates(&self) -> (usize, usize) {
        self.start.unwrap_or((self.rows / 2, self.cols / 4))
    }

    /// Returns the configured end coordinates, or the default derived from the grid shape.
    #[must_use]
    pub fn end_coordinates(&self) -> (usize, usize) {
        self.end.unwrap_or((self.rows / 2, (self.cols * 3) / 4))
    }

    /// Returns the delay between visited-cell reveals.
    #[must_use]
    pub const fn visit_delay(&self) -> Duration {
        Duration::from_millis(self.visit_delay)
    }

    /// Returns the delay between path-cell reveals.
    #[must_use]
    pub const fn path_delay(&self) -> Duration {
        Duration::from_millis(self.path_delay)
    }
}

/// Parses a `row,col` pair from a single argument value.
fn parse_coordinate(value: &str) -> Result<(usize, usize), String> {
    let (row, col) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `row,col`, got `{value}`"))?;

    let row = row
        .trim()
        .parse()
        .map_err(|err| format!("invalid row `{row}`: {err}"))?;
    let col = col
        .trim()
        .parse()
        .map_err(|err| format!("invalid column `{col}`: {err}"))?;

    Ok((row, col))
}
