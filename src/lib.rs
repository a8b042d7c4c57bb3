//! This crate contains the core and interface of wayfinder, a terminal shortest-path visualizer.
//!
//! The user paints walls on a rectangular grid with the mouse, relocates the start and end
//! markers by dragging them, and triggers a search run from the keyboard. The selected algorithm
//! runs synchronously to completion over a snapshot of the grid; its visitation trace and the
//! reconstructed path are then replayed step by step against the live grid.

mod animation;
mod app;
mod config;
mod controller;
mod events;
mod grid;
mod search;
mod ui;

pub use app::App;
pub use config::Config;
pub use search::Algorithm;
