use std::{fs::File, process::exit};

use clap::Parser;

pub use utils::{Coord, Pos};
mod utils;

pub use error::{Error, Result};
mod error;

pub use board::Board;
pub mod board;

pub use geometry::GridGeometry;
pub mod geometry;

mod timer;

pub use sim::Sim;
mod sim;

pub use view::View;
mod view;

mod app;
mod config;
mod pattern;

use config::Config;

fn init_logging(config: &Config) -> Result<()> {
    let mut builder = match &config.log_file {
        Some(path) => {
            let file = File::create(path)?;
            let mut builder =
                env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            builder
        }
        None => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")),
    };
    builder.init();
    Ok(())
}

pub fn main() {
    let config = Config::parse();
    let result = init_logging(&config).and_then(|()| app::run(&config));
    if let Err(err) = result {
        eprintln!("[error] {err}");
        exit(1);
    }
}
