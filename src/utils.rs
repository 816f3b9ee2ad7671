use std::ops::Add;

/// A terminal character position, 0-based.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

#[macro_export]
macro_rules! pos {
    ($x:expr, $y:expr) => {
        Pos { x: $x, y: $y }
    };
}

impl Add for Pos {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        pos!(self.x + rhs.x, self.y + rhs.y)
    }
}

/// A logical board coordinate.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

#[macro_export]
macro_rules! coord {
    ($row:expr, $col:expr) => {
        Coord {
            row: $row,
            col: $col,
        }
    };
}
