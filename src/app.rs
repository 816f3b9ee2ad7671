use std::{
    io::{stdout, Write},
    sync::mpsc::{self, RecvTimeoutError},
    thread,
    time::{Duration, Instant},
};

use termion::{input::MouseTerminal, raw::IntoRawMode, screen::AlternateScreen};

use crate::{
    config::Config,
    error::Result,
    pattern,
    sim::Renderer,
    view::{input_loop, InputCmd, Target},
    Sim, View,
};

const EVT_CHECK_TIMEOUT: Duration = Duration::from_millis(10);

pub fn run(config: &Config) -> Result<()> {
    let mut sim = Sim::new(config.rows as usize, config.cols as usize, config.interval())?;
    if let Some(path) = &config.pattern {
        sim.seed(pattern::load(path)?);
    }

    let out = AlternateScreen::from(MouseTerminal::from(stdout().into_raw_mode()?));
    let mut view = View::new(out, sim.geometry(), termion::terminal_size()?);
    write!(view.out(), "{}", termion::cursor::Hide)?;
    view.draw_board(sim.board());

    let (sender, receiver) = mpsc::channel();
    let _input_handle = thread::spawn(|| input_loop(sender));

    let result = event_loop(&mut sim, &mut view, &receiver);
    write!(view.out(), "{}", termion::cursor::Show)?;
    view.out().flush()?;
    result
}

fn event_loop<W: Write>(
    sim: &mut Sim,
    view: &mut View<W>,
    receiver: &mpsc::Receiver<InputCmd>,
) -> Result<()> {
    loop {
        let timeout = sim
            .time_until_tick(Instant::now())
            .map_or(EVT_CHECK_TIMEOUT, |until| until.min(EVT_CHECK_TIMEOUT));
        match receiver.recv_timeout(timeout) {
            Ok(InputCmd::Exit) | Err(RecvTimeoutError::Disconnected) => break,
            Ok(InputCmd::Control(control)) => sim.control(control, Instant::now(), view),
            Ok(InputCmd::Click(pos)) => match view.locate(pos) {
                Some(Target::Cell(coord)) => {
                    sim.toggle_cell(coord, view)?;
                }
                Some(Target::Button(control)) => sim.control(control, Instant::now(), view),
                None => (),
            },
            Err(RecvTimeoutError::Timeout) => (),
        }

        sim.poll(Instant::now(), view);

        let size = termion::terminal_size()?;
        if size != view.size() {
            view.resize(size, sim.board());
        }
        view.status(sim.state(), sim.generation(), sim.board().population());
        view.present()?;
    }
    log::info!("exiting at generation {}", sim.generation());
    Ok(())
}
