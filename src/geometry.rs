use crate::{coord, error::Result, Coord, Error};

/// A rectangle in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Area {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Area {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// half-open: the right and bottom edges are outside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Maps logical rows and columns onto a play area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    rows: usize,
    cols: usize,
}

impl GridGeometry {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimension { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn square_size(&self, play_area_width: f64) -> f64 {
        play_area_width / self.cols as f64
    }

    pub fn col_width(&self, canvas_width: f64) -> f64 {
        canvas_width / self.cols as f64
    }

    pub fn row_height(&self, canvas_height: f64) -> f64 {
        canvas_height / self.rows as f64
    }

    pub fn cell_rect(&self, area: Area, Coord { row, col }: Coord) -> Area {
        let width = self.col_width(area.width);
        let height = self.row_height(area.height);
        Area::new(
            area.x + col as f64 * width,
            area.y + row as f64 * height,
            width,
            height,
        )
    }

    /// Inverse of [`GridGeometry::cell_rect`]: the cell under a canvas point.
    pub fn cell_at(&self, area: Area, x: f64, y: f64) -> Option<Coord> {
        if !area.contains(x, y) {
            return None;
        }
        let col = ((x - area.x) / self.col_width(area.width)).floor() as usize;
        let row = ((y - area.y) / self.row_height(area.height)).floor() as usize;
        Some(coord!(row.min(self.rows - 1), col.min(self.cols - 1)))
    }

    pub fn vertical_lines(&self, area: Area) -> impl Iterator<Item = f64> {
        let width = self.col_width(area.width);
        (0..=self.cols).map(move |i| area.x + i as f64 * width)
    }

    pub fn horizontal_lines(&self, area: Area) -> impl Iterator<Item = f64> {
        let height = self.row_height(area.height);
        (0..=self.rows).map(move |i| area.y + i as f64 * height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: Area = Area {
        x: 20.0,
        y: 20.0,
        width: 560.0,
        height: 560.0,
    };

    #[test]
    fn sizes() {
        let geometry = GridGeometry::new(20, 20).unwrap();
        assert_eq!(geometry.square_size(560.0), 28.0);
        let geometry = GridGeometry::new(4, 8).unwrap();
        assert_eq!(geometry.col_width(80.0), 10.0);
        assert_eq!(geometry.row_height(80.0), 20.0);
        assert!(GridGeometry::new(0, 8).is_err());
    }

    #[test]
    fn click_maps_back_to_drawn_cell() {
        let geometry = GridGeometry::new(20, 20).unwrap();
        let rect = geometry.cell_rect(AREA, coord!(3, 7));
        assert_eq!(rect, Area::new(216.0, 104.0, 28.0, 28.0));
        assert_eq!(geometry.cell_at(AREA, rect.x, rect.y), Some(coord!(3, 7)));
        assert_eq!(
            geometry.cell_at(AREA, rect.right() - 0.5, rect.bottom() - 0.5),
            Some(coord!(3, 7))
        );
        assert_eq!(geometry.cell_at(AREA, 20.0, 20.0), Some(coord!(0, 0)));
        assert_eq!(geometry.cell_at(AREA, 579.9, 579.9), Some(coord!(19, 19)));
    }

    #[test]
    fn clicks_outside_are_ignored() {
        let geometry = GridGeometry::new(20, 20).unwrap();
        assert_eq!(geometry.cell_at(AREA, 10.0, 100.0), None);
        assert_eq!(geometry.cell_at(AREA, 100.0, 19.9), None);
        assert_eq!(geometry.cell_at(AREA, 580.0, 100.0), None);
        assert_eq!(geometry.cell_at(AREA, 100.0, 700.0), None);
    }

    #[test]
    fn grid_lines() {
        let geometry = GridGeometry::new(2, 3).unwrap();
        let area = Area::new(1.0, 1.0, 9.0, 4.0);
        let xs: Vec<f64> = geometry.vertical_lines(area).collect();
        let ys: Vec<f64> = geometry.horizontal_lines(area).collect();
        assert_eq!(xs, vec![1.0, 4.0, 7.0, 10.0]);
        assert_eq!(ys, vec![1.0, 3.0, 5.0]);
    }
}
