use std::{
    io::{self, stdin, Write},
    sync::mpsc,
};

use termion::{
    event::{Event, Key, MouseButton, MouseEvent},
    input::TermRead,
};

use crate::{
    geometry::Area,
    pos,
    sim::{Control, Renderer, RunState},
    Board, Coord, GridGeometry, Pos,
};

pub use canvas::Canvas;
use canvas::FILL;
mod canvas;

const MARGIN_X: i32 = 1;
const MARGIN_Y: i32 = 1;
/// rows kept free under the grid for the buttons and the status line
const FOOTER_HEIGHT: i32 = 3;
const MIN_PITCH: i32 = 2;

#[derive(Debug)]
pub enum InputCmd {
    Exit,
    Click(Pos),
    Control(Control),
}

pub fn input_loop(sender: mpsc::Sender<InputCmd>) {
    for event in stdin().events() {
        let event = match event {
            Ok(event) => event,
            Err(err) => {
                log::error!("failed to read input: {err}");
                break;
            }
        };
        let command = match event {
            Event::Key(Key::Char('q') | Key::Esc | Key::Ctrl('c')) => InputCmd::Exit,
            Event::Key(Key::Char('s')) => InputCmd::Control(Control::Start),
            Event::Key(Key::Char('x')) => InputCmd::Control(Control::Stop),
            Event::Key(Key::Char('c')) => InputCmd::Control(Control::Clear),
            Event::Mouse(MouseEvent::Press(MouseButton::Left, x, y)) => {
                InputCmd::Click(pos!(x as i32 - 1, y as i32 - 1))
            }
            _ => continue,
        };

        if sender.send(command).is_err() {
            break;
        }
    }
}

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Cell(Coord),
    Button(Control),
}

#[derive(Debug, Clone, Copy)]
struct Button {
    control: Control,
    label: &'static str,
    origin: Pos,
}

impl Button {
    fn contains(&self, Pos { x, y }: Pos) -> bool {
        let width = self.label.chars().count() as i32;
        y == self.origin.y && x >= self.origin.x && x < self.origin.x + width
    }
}

const BUTTONS: [(Control, &str); 3] = [
    (Control::Start, "[ Start ]"),
    (Control::Stop, "[ Stop ]"),
    (Control::Clear, "[ Clear ]"),
];

/// Terminal renderer: a line grid with filled live cells, a button bar and a
/// status line underneath.
pub struct View<W>
where
    W: Write,
{
    out: W,
    canvas: Canvas,
    geometry: GridGeometry,
    area: Area,
    buttons: Vec<Button>,
    status_y: i32,
}

impl<W> View<W>
where
    W: Write,
{
    pub fn new(out: W, geometry: GridGeometry, size: (u16, u16)) -> Self {
        let mut view = Self {
            out,
            canvas: Canvas::new(size.0 as usize, size.1 as usize),
            geometry,
            area: Area::new(0.0, 0.0, 0.0, 0.0),
            buttons: vec![],
            status_y: 0,
        };
        view.relayout();
        view
    }

    pub fn size(&self) -> (u16, u16) {
        let (width, height) = self.canvas.size();
        (width as u16, height as u16)
    }

    /// Rebuilds the layout for a new terminal size and repaints the board.
    pub fn resize(&mut self, size: (u16, u16), board: &Board) {
        log::debug!("terminal resized to {}x{}", size.0, size.1);
        self.canvas = Canvas::new(size.0 as usize, size.1 as usize);
        self.relayout();
        self.draw_board(board);
    }

    fn relayout(&mut self) {
        let (width, height) = self.canvas.size();
        self.area = fit_area(self.geometry, width as i32, height as i32);
        self.draw_grid();

        let bar_y = self.area.bottom() as i32 + 2;
        let mut x = MARGIN_X;
        self.buttons = BUTTONS
            .iter()
            .map(|&(control, label)| {
                let button = Button {
                    control,
                    label,
                    origin: pos!(x, bar_y),
                };
                x += label.chars().count() as i32 + 2;
                button
            })
            .collect();
        for button in &self.buttons {
            self.canvas.text(button.origin, button.label);
        }
        self.status_y = bar_y + 1;
        self.canvas.invalidate();
    }

    fn draw_grid(&mut self) {
        let xs: Vec<i32> = self
            .geometry
            .vertical_lines(self.area)
            .map(|x| x.round() as i32)
            .collect();
        let ys: Vec<i32> = self
            .geometry
            .horizontal_lines(self.area)
            .map(|y| y.round() as i32)
            .collect();
        let (left, right) = (xs[0], xs[xs.len() - 1]);
        let (top, bottom) = (ys[0], ys[ys.len() - 1]);

        self.canvas.layer(|Pos { x, y }| {
            if x < left || x > right || y < top || y > bottom {
                return None;
            }
            match (xs.contains(&x), ys.contains(&y)) {
                (true, true) => Some('┼'),
                (true, false) => Some('│'),
                (false, true) => Some('─'),
                (false, false) => None,
            }
        });
    }

    pub fn locate(&self, pos: Pos) -> Option<Target> {
        if let Some(button) = self.buttons.iter().find(|button| button.contains(pos)) {
            return Some(Target::Button(button.control));
        }
        self.geometry
            .cell_at(self.area, pos.x as f64 + 0.5, pos.y as f64 + 0.5)
            .map(Target::Cell)
    }

    pub fn status(&mut self, state: RunState, generation: u64, population: usize) {
        let state = match state {
            RunState::Idle => "idle",
            RunState::Running => "running",
        };
        let line = format!(
            "{state} | generation {generation} | {population} alive | s start  x stop  c clear  q quit"
        );
        let width = self.canvas.size().0;
        let line = format!("{line:<width$}");
        self.canvas.text(pos!(MARGIN_X, self.status_y), &line);
    }

    pub fn present(&mut self) -> io::Result<()> {
        if self.canvas.is_dirty() {
            self.canvas.display(&mut self.out)?;
        }
        Ok(())
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W> Renderer for View<W>
where
    W: Write,
{
    fn draw_board(&mut self, board: &Board) {
        for coord in board.coords() {
            self.draw_cell(board, coord);
        }
    }

    fn draw_cell(&mut self, board: &Board, coord: Coord) {
        let alive = board.get(coord).unwrap_or(false);
        let rect = self.geometry.cell_rect(self.area, coord);
        let (x0, x1) = (rect.x.round() as i32, rect.right().round() as i32);
        let (y0, y1) = (rect.y.round() as i32, rect.bottom().round() as i32);
        let char = if alive { FILL } else { ' ' };
        for y in (y0 + 1)..y1 {
            for x in (x0 + 1)..x1 {
                self.canvas.put(pos!(x, y), char);
            }
        }
    }
}

/// Picks the largest whole-character cell pitch that fits, with cells twice
/// as wide as tall so they look square in a terminal.
fn fit_area(geometry: GridGeometry, width: i32, height: i32) -> Area {
    let (rows, cols) = (geometry.rows() as i32, geometry.cols() as i32);
    let fit_x = geometry
        .square_size((width - 2 * MARGIN_X - 1).max(0) as f64)
        .floor() as i32;
    let fit_y = geometry
        .row_height((height - MARGIN_Y - 1 - FOOTER_HEIGHT).max(0) as f64)
        .floor() as i32;
    let pitch_y = fit_y.min(fit_x / 2).max(MIN_PITCH);
    let pitch_x = pitch_y * 2;
    Area::new(
        MARGIN_X as f64,
        MARGIN_Y as f64,
        (cols * pitch_x) as f64,
        (rows * pitch_y) as f64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord;

    fn view() -> View<Vec<u8>> {
        View::new(vec![], GridGeometry::new(3, 3).unwrap(), (40, 20))
    }

    fn flush(view: &mut View<Vec<u8>>) -> String {
        view.present().unwrap();
        String::from_utf8(std::mem::take(view.out())).unwrap()
    }

    #[test]
    fn layout_fits_terminal() {
        let view = view();
        assert_eq!(view.area, Area::new(1.0, 1.0, 30.0, 15.0));
        assert_eq!(view.canvas.get(pos!(1, 1)), Some('┼'));
        assert_eq!(view.canvas.get(pos!(1, 3)), Some('│'));
        assert_eq!(view.canvas.get(pos!(5, 6)), Some('─'));
        assert_eq!(view.canvas.get(pos!(31, 16)), Some('┼'));
        assert_eq!(view.canvas.get(pos!(32, 16)), Some(' '));
    }

    #[test]
    fn small_terminal_keeps_minimum_pitch() {
        let view = View::new(vec![], GridGeometry::new(20, 20).unwrap(), (10, 5));
        assert_eq!(view.area.width, 80.0);
        assert_eq!(view.area.height, 40.0);
    }

    #[test]
    fn clicks_map_to_cells_and_buttons() {
        let view = view();
        assert_eq!(view.locate(pos!(14, 12)), Some(Target::Cell(coord!(2, 1))));
        assert_eq!(view.locate(pos!(1, 1)), Some(Target::Cell(coord!(0, 0))));
        assert_eq!(view.locate(pos!(0, 0)), None);
        assert_eq!(view.locate(pos!(35, 5)), None);
        assert_eq!(view.locate(pos!(2, 18)), Some(Target::Button(Control::Start)));
        assert_eq!(view.locate(pos!(12, 18)), Some(Target::Button(Control::Stop)));
        assert_eq!(view.locate(pos!(22, 18)), Some(Target::Button(Control::Clear)));
        assert_eq!(view.locate(pos!(10, 18)), None);
    }

    #[test]
    fn draw_cell_fills_only_its_interior() {
        let mut view = view();
        let mut board = Board::new(3, 3).unwrap();
        board.set(coord!(0, 0), true).unwrap();
        view.draw_cell(&board, coord!(0, 0));

        assert_eq!(view.canvas.get(pos!(2, 2)), Some(FILL));
        assert_eq!(view.canvas.get(pos!(10, 5)), Some(FILL));
        assert_eq!(view.canvas.get(pos!(11, 2)), Some('│'));
        assert_eq!(view.canvas.get(pos!(12, 2)), Some(' '));
        assert_eq!(view.canvas.get(pos!(2, 6)), Some('─'));
    }

    #[test]
    fn single_cell_redraw_is_partial() {
        let mut view = view();
        let mut board = Board::new(3, 3).unwrap();
        let first = flush(&mut view);
        assert!(first.contains(&termion::clear::All.to_string()));

        board.toggle(coord!(1, 1)).unwrap();
        view.draw_cell(&board, coord!(1, 1));
        let second = flush(&mut view);
        assert!(!second.contains(&termion::clear::All.to_string()));
        assert_eq!(second.matches(FILL).count(), 9 * 4);

        assert_eq!(flush(&mut view), "");
    }

    #[test]
    fn status_line() {
        let mut view = view();
        view.status(RunState::Running, 12, 5);
        let line: String = (1..40)
            .filter_map(|x| view.canvas.get(pos!(x, 19)))
            .collect();
        assert!(line.starts_with("running | generation 12 | 5 alive"));
    }

    #[test]
    fn resize_relayouts() {
        let mut view = view();
        let board = Board::new(3, 3).unwrap();
        view.resize((80, 40), &board);
        assert_eq!(view.size(), (80, 40));
        assert_eq!(view.area, Area::new(1.0, 1.0, 66.0, 33.0));
    }
}
