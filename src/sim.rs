use std::time::{Duration, Instant};

use crate::{error::Result, timer::Ticker, Board, Coord, GridGeometry};

pub const DEFAULT_ROWS: usize = 20;
pub const DEFAULT_COLS: usize = 20;
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Whatever displays the board.
pub trait Renderer {
    fn draw_board(&mut self, board: &Board);
    fn draw_cell(&mut self, board: &Board, coord: Coord);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
}

/// The three user-facing actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Start,
    Stop,
    Clear,
}

#[derive(Debug)]
pub struct Sim {
    board: Board,
    geometry: GridGeometry,
    ticker: Ticker,
    generation: u64,
}

impl Sim {
    pub fn new(rows: usize, cols: usize, interval: Duration) -> Result<Self> {
        let board = Board::new(rows, cols)?;
        let geometry = GridGeometry::new(rows, cols)?;
        log::debug!("created {}x{} board", board.rows(), board.cols());
        Ok(Self {
            board,
            geometry,
            ticker: Ticker::new(interval),
            generation: 0,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn interval(&self) -> Duration {
        self.ticker.interval()
    }

    pub fn state(&self) -> RunState {
        if self.ticker.is_armed() {
            RunState::Running
        } else {
            RunState::Idle
        }
    }

    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.ticker.time_until(now)
    }

    pub fn seed(&mut self, coords: impl IntoIterator<Item = Coord>) -> usize {
        let placed = self.board.seed(coords);
        log::info!("seeded {placed} cells");
        placed
    }

    /// Steps once right away and keeps stepping every interval. Calling it
    /// while already running steps again and pushes the next deadline back.
    pub fn start(&mut self, now: Instant, renderer: &mut impl Renderer) {
        if self.state() == RunState::Idle {
            log::info!("starting, one step every {:?}", self.interval());
        }
        self.step(renderer);
        self.ticker.arm(now);
    }

    pub fn stop(&mut self) {
        if self.ticker.cancel() {
            log::info!("stopped at generation {}", self.generation);
        }
    }

    pub fn clear(&mut self, renderer: &mut impl Renderer) {
        self.board.clear();
        self.generation = 0;
        log::info!("board cleared");
        renderer.draw_board(&self.board);
    }

    pub fn toggle_cell(&mut self, coord: Coord, renderer: &mut impl Renderer) -> Result<bool> {
        let alive = self.board.toggle(coord)?;
        log::debug!("toggled ({}, {}) to {alive}", coord.row, coord.col);
        renderer.draw_cell(&self.board, coord);
        Ok(alive)
    }

    pub fn control(&mut self, control: Control, now: Instant, renderer: &mut impl Renderer) {
        match control {
            Control::Start => self.start(now, renderer),
            Control::Stop => self.stop(),
            Control::Clear => self.clear(renderer),
        }
    }

    /// Runs the scheduled step if it is due. Returns whether a step ran.
    pub fn poll(&mut self, now: Instant, renderer: &mut impl Renderer) -> bool {
        if !self.ticker.fire(now) {
            return false;
        }
        self.step(renderer);
        true
    }

    fn step(&mut self, renderer: &mut impl Renderer) {
        let changed = self.board.apply_rules();
        self.generation += 1;
        log::debug!(
            "generation {}: {changed} changed, {} alive",
            self.generation,
            self.board.population()
        );
        renderer.draw_board(&self.board);
    }
}
