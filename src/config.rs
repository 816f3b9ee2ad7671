use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::sim::{DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_TICK_INTERVAL};

/// Conway's game of life on a board whose edges wrap around.
///
/// Click cells to toggle them. Keys: `s` start, `x` stop, `c` clear, `q` quit.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Number of rows on the board.
    #[arg(long, default_value_t = DEFAULT_ROWS as u32, value_parser = clap::value_parser!(u32).range(1..))]
    pub rows: u32,

    /// Number of columns on the board.
    #[arg(long, default_value_t = DEFAULT_COLS as u32, value_parser = clap::value_parser!(u32).range(1..))]
    pub cols: u32,

    /// Milliseconds between generations while running.
    #[arg(
        long = "interval-ms",
        value_name = "MILLISECONDS",
        default_value_t = DEFAULT_TICK_INTERVAL.as_millis() as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval_ms: u64,

    /// Write logs to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Text file seeding the board, `#` marks a live cell.
    #[arg(value_name = "PATTERN")]
    pub pattern: Option<PathBuf>,
}

impl Config {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::parse_from(["torus-life"]);
        assert_eq!((config.rows, config.cols), (20, 20));
        assert_eq!(config.interval(), Duration::from_millis(1000));
        assert!(config.pattern.is_none());
        assert!(config.log_file.is_none());
    }

    #[test]
    fn overrides() {
        let config = Config::parse_from([
            "torus-life",
            "--rows",
            "8",
            "--cols",
            "12",
            "--interval-ms",
            "250",
            "glider.txt",
        ]);
        assert_eq!((config.rows, config.cols), (8, 12));
        assert_eq!(config.interval(), Duration::from_millis(250));
        assert_eq!(config.pattern, Some(PathBuf::from("glider.txt")));
    }

    #[test]
    fn rejects_zero_rows() {
        assert!(Config::try_parse_from(["torus-life", "--rows", "0"]).is_err());
    }
}
