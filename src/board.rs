use crate::{coord, error::Result, Coord, Error};

/// Cell states of a wrapping (toroidal) board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Board {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimension { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, Coord { row, col }: Coord) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }

    pub fn get(&self, coord: Coord) -> Result<bool> {
        let index = self.index(coord)?;
        Ok(self.cells[index])
    }

    pub fn set(&mut self, coord: Coord, alive: bool) -> Result<()> {
        let index = self.index(coord)?;
        self.cells[index] = alive;
        Ok(())
    }

    /// flips a cell and returns its new state.
    pub fn toggle(&mut self, coord: Coord) -> Result<bool> {
        let index = self.index(coord)?;
        self.cells[index] = !self.cells[index];
        Ok(self.cells[index])
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| coord!(row, col)))
    }

    pub fn actives(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords().filter(|&coord| self.is_alive(coord))
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// the eight surrounding coordinates, wrapping around the edges.
    pub fn get_neighbors(&self, Coord { row, col }: Coord) -> impl Iterator<Item = Coord> {
        let (rows, cols) = (self.rows, self.cols);
        let up = (row + rows - 1) % rows;
        let down = (row + 1) % rows;
        let left = (col + cols - 1) % cols;
        let right = (col + 1) % cols;
        [
            coord!(up, left),
            coord!(up, col),
            coord!(up, right),
            coord!(row, left),
            coord!(row, right),
            coord!(down, left),
            coord!(down, col),
            coord!(down, right),
        ]
        .into_iter()
    }

    pub fn count_live_neighbors(&self, coord: Coord) -> Result<usize> {
        self.index(coord)?;
        Ok(self.live_neighbors(coord))
    }

    fn is_alive(&self, Coord { row, col }: Coord) -> bool {
        self.cells[row * self.cols + col]
    }

    fn live_neighbors(&self, coord: Coord) -> usize {
        self.get_neighbors(coord)
            .filter(|&neighbor| self.is_alive(neighbor))
            .count()
    }

    /// Advances the board by one generation.
    ///
    /// Every cell is judged against the current state first; the collected
    /// changes are only flipped once the whole board has been read. Returns
    /// the number of cells that changed.
    pub fn apply_rules(&mut self) -> usize {
        let changes: Vec<Coord> = self
            .coords()
            .filter(|&coord| {
                match (self.is_alive(coord), self.live_neighbors(coord)) {
                    (true, count) if count < 2 || count > 3 => true, // dies
                    (false, 3) => true,                              // born
                    _ => false,                                      // unchanged
                }
            })
            .collect();

        for &Coord { row, col } in &changes {
            let index = row * self.cols + col;
            self.cells[index] = !self.cells[index];
        }
        changes.len()
    }

    pub fn clear(&mut self) {
        self.cells = vec![false; self.rows * self.cols];
    }

    /// Brings the listed cells to life, skipping any that fall off the board.
    pub fn seed(&mut self, coords: impl IntoIterator<Item = Coord>) -> usize {
        let mut placed = 0;
        for coord in coords {
            match self.set(coord, true) {
                Ok(()) => placed += 1,
                Err(err) => log::warn!("skipping seed cell: {err}"),
            }
        }
        placed
    }
}
