mod apples;
mod game;
mod snake;
mod term;

use std::fs::File;
use std::process::exit;

use log::{error, info};
use simplelog::{Config, LevelFilter, WriteLogger};

pub type GridInt = i16;

pub const WINDOW_WIDTH: GridInt = 30;
pub const MAX_COLUMNS: GridInt = 15;
pub const MAX_ROWS: GridInt = 15;

const LOG_FILE: &str = "termsnake.log";

fn main() {
    // The terminal runs in raw mode, so diagnostics go to a file instead
    if let Ok(file) = File::create(LOG_FILE) {
        let _ = WriteLogger::init(LevelFilter::Info, Config::default(), file);
    }

    info!("starting termsnake");

    if let Err(err) = game::run() {
        error!("terminal failure: {}", err);
        eprintln!("terminal failure: {}", err);
        exit(1);
    }
}
