use std::{collections::HashSet, io::Write};

use metrohash::MetroBuildHasher;
use termion::color;

use crate::{pos, Pos};

pub const FILL: char = '█';
const FILL_COLOR: color::Rgb = color::Rgb(0x49, 0x0b, 0xe6);

/// A character buffer that remembers which positions changed since the last
/// time it was displayed.
pub struct Canvas {
    lines: Vec<Vec<char>>,
    width: usize,
    height: usize,
    dirty: HashSet<Pos, MetroBuildHasher>,
    full_redraw: bool,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        let lines = (0..height).map(|_| vec![' '; width]).collect();
        Self {
            height,
            lines,
            width,
            dirty: HashSet::default(),
            full_redraw: true,
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn get(&self, Pos { x, y }: Pos) -> Option<char> {
        if x < 0 || y < 0 {
            return None;
        }
        self.lines.get(y as usize)?.get(x as usize).copied()
    }

    /// Writes one character; positions off the canvas are dropped.
    pub fn put(&mut self, pos: Pos, char: char) {
        let Pos { x, y } = pos;
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let slot = &mut self.lines[y as usize][x as usize];
        if *slot != char {
            *slot = char;
            self.dirty.insert(pos);
        }
    }

    pub fn text(&mut self, origin: Pos, text: &str) {
        for (offset, char) in text.chars().enumerate() {
            self.put(origin + pos!(offset as i32, 0), char);
        }
    }

    pub fn layer(&mut self, f: impl Fn(Pos) -> Option<char>) {
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = pos!(x as i32, y as i32);
                if let Some(char) = f(pos) {
                    self.put(pos, char);
                }
            }
        }
    }

    /// forces the next display to repaint everything.
    pub fn invalidate(&mut self) {
        self.full_redraw = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.full_redraw || !self.dirty.is_empty()
    }

    pub fn display(&mut self, out: &mut impl Write) -> std::io::Result<()> {
        if self.full_redraw {
            write!(out, "{}", termion::clear::All)?;
            for (index, line) in self.lines.iter().enumerate() {
                let goto = termion::cursor::Goto(1, index as u16 + 1);
                write!(out, "{goto}")?;
                for &char in line {
                    write_char(out, char)?;
                }
            }
        } else {
            for &Pos { x, y } in &self.dirty {
                let goto = termion::cursor::Goto(x as u16 + 1, y as u16 + 1);
                write!(out, "{goto}")?;
                write_char(out, self.lines[y as usize][x as usize])?;
            }
        }
        self.full_redraw = false;
        self.dirty.clear();
        out.flush()
    }
}

fn write_char(out: &mut impl Write, char: char) -> std::io::Result<()> {
    if char == FILL {
        let (fg, reset) = (color::Fg(FILL_COLOR), color::Fg(color::Reset));
        write!(out, "{fg}{char}{reset}")
    } else {
        write!(out, "{char}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display(canvas: &mut Canvas) -> String {
        let mut out = vec![];
        canvas.display(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn first_display_is_full() {
        let mut canvas = Canvas::new(4, 2);
        canvas.text(pos!(0, 1), "ab");
        let out = display(&mut canvas);
        assert!(out.contains(&termion::clear::All.to_string()));
        assert!(out.contains("ab  "));
        assert!(!canvas.is_dirty());
    }

    #[test]
    fn later_displays_write_changes_only() {
        let mut canvas = Canvas::new(4, 2);
        display(&mut canvas);

        canvas.put(pos!(2, 1), FILL);
        canvas.put(pos!(0, 0), ' ');
        let out = display(&mut canvas);
        assert!(!out.contains(&termion::clear::All.to_string()));
        assert_eq!(
            out,
            format!(
                "{}{}{FILL}{}",
                termion::cursor::Goto(3, 2),
                color::Fg(FILL_COLOR),
                color::Fg(color::Reset)
            )
        );
        assert_eq!(display(&mut canvas), "");
    }

    #[test]
    fn drops_writes_off_canvas() {
        let mut canvas = Canvas::new(2, 2);
        display(&mut canvas);
        canvas.put(pos!(-1, 0), 'x');
        canvas.put(pos!(2, 0), 'x');
        canvas.text(pos!(1, 1), "xyz");
        assert_eq!(canvas.get(pos!(1, 1)), Some('x'));
        assert_eq!(canvas.get(pos!(2, 1)), None);
        assert!(canvas.is_dirty());
    }
}
