use std::{fs, path::Path};

use crate::{coord, error::Result, Coord};

/// Reads a pattern where `#`, `O` or `*` mark a live cell. Line `n`, column
/// `m` of the text lands on row `n`, column `m` of the board.
pub fn deserialize(str: &str) -> Vec<Coord> {
    let mut result = vec![];
    for (row, line) in str.lines().enumerate() {
        for (col, c) in line.chars().enumerate() {
            if matches!(c, '#' | 'O' | '*') {
                result.push(coord!(row, col));
            }
        }
    }
    result
}

pub fn load(path: &Path) -> Result<Vec<Coord>> {
    let content = fs::read_to_string(path)?;
    let cells = deserialize(&content);
    log::info!("read {} live cells from {}", cells.len(), path.display());
    Ok(cells)
}

#[test]
fn test_deserialize() {
    let glider = ".#.\n..#\n###\n";
    assert_eq!(
        deserialize(glider),
        vec![
            coord!(0, 1),
            coord!(1, 2),
            coord!(2, 0),
            coord!(2, 1),
            coord!(2, 2)
        ]
    );
    assert_eq!(deserialize("O..*\r\n\n  #"), vec![coord!(0, 0), coord!(0, 3), coord!(2, 2)]);
    assert!(deserialize("").is_empty());
}

#[test]
fn test_load_missing_file() {
    assert!(matches!(
        load(Path::new("/definitely/not/a/pattern.txt")),
        Err(crate::Error::Io(_))
    ));
}
