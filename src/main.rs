//! This crate contains the source code for the wayfinder binary.

use std::io::stdout;

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use wayfinder::{App, Config};

fn main() -> Result<()> {
    install()?;

    let config = Config::parse();
    let mut app = App::new(&config)?;

    let mut terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture)?;
    let result = app.run(&mut terminal);
    execute!(stdout(), DisableMouseCapture)?;
    ratatui::restore();

    result
}
