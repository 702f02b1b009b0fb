use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use engine_logging::engine_info;
use newsgrid_core::{update, AppState, Msg};
use newsgrid_engine::EngineHandle;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use throbber_widgets_tui::ThrobberState;

use super::config::{Cli, Settings};
use super::effects::EffectRunner;
use super::logging;
use super::ui;
use super::ui::constants::{FRAME_INTERVAL, INPUT_POLL_INTERVAL, SPINNER_INTERVAL};

pub fn run_app() -> Result<()> {
    // Resolve configuration before touching the terminal so errors stay readable.
    let settings = Settings::from_cli(Cli::parse())?;
    logging::initialize(&settings.log_file, settings.log_level);
    engine_info!(
        "Starting newsgrid endpoint={} debounce_ms={}",
        settings.fetch.endpoint,
        settings.debounce.as_millis()
    );

    let engine = EngineHandle::new(settings.fetch.clone()).context("failed to set up news client")?;
    let mut app = App::new(AppState::with_debounce(settings.debounce), EffectRunner::new(engine));
    app.run()
}

enum Control {
    Continue,
    Quit,
}

struct App {
    state: AppState,
    effects: EffectRunner,
    throbber: ThrobberState,
    columns: usize,
    needs_redraw: bool,
}

impl App {
    fn new(state: AppState, effects: EffectRunner) -> Self {
        Self {
            state,
            effects,
            throbber: ThrobberState::default(),
            columns: 1,
            needs_redraw: true,
        }
    }

    fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::init();
        let result = self.event_loop(&mut terminal);
        ratatui::restore();
        engine_info!("Exiting newsgrid");
        result
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let (event_tx, event_rx) = mpsc::channel();
        let input_running = Arc::new(AtomicBool::new(true));
        let input_flag = Arc::clone(&input_running);

        let input_thread = thread::spawn(move || -> Result<()> {
            while input_flag.load(Ordering::Relaxed) {
                if event::poll(INPUT_POLL_INTERVAL)? {
                    let event = event::read()?;
                    if event_tx.send(event).is_err() {
                        break;
                    }
                }
            }
            Ok(())
        });

        let mut pending_events = VecDeque::new();
        let mut last_spin = Instant::now();

        let result: Result<()> = 'event_loop: loop {
            for msg in self.effects.pump_events() {
                self.dispatch(msg);
            }

            loop {
                match event_rx.try_recv() {
                    Ok(event) => pending_events.push_back(event),
                    Err(mpsc::TryRecvError::Empty) => break,
                    Err(mpsc::TryRecvError::Disconnected) => {
                        break 'event_loop Err(anyhow!("input event channel disconnected"));
                    }
                }
            }

            while let Some(event) = pending_events.pop_front() {
                match event {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if let Control::Quit = self.handle_key(key) {
                            break 'event_loop Ok(());
                        }
                    }
                    Event::Resize(_, _) => self.needs_redraw = true,
                    _ => {}
                }
            }

            let view = self.state.view();
            if view.loading.is_some() && last_spin.elapsed() >= SPINNER_INTERVAL {
                self.throbber.calc_next();
                self.dispatch(Msg::Tick);
                last_spin = Instant::now();
                self.needs_redraw = true;
            }

            if self.state.consume_dirty() || self.needs_redraw {
                let view = self.state.view();
                let throbber = &mut self.throbber;
                let mut columns = self.columns;
                if let Err(err) = terminal.draw(|frame| columns = ui::render::render(frame, &view, throbber)) {
                    break 'event_loop Err(err.into());
                }
                self.columns = columns;
                self.needs_redraw = false;
            }

            thread::sleep(FRAME_INTERVAL);
        };

        input_running.store(false, Ordering::Relaxed);
        match input_thread.join() {
            Ok(join_result) => join_result?,
            Err(err) => std::panic::resume_unwind(err),
        }

        result
    }

    fn handle_key(&mut self, key: KeyEvent) -> Control {
        match key_action(key, self.state.query(), self.columns) {
            Some(msg) => {
                self.dispatch(msg);
                Control::Continue
            }
            None => Control::Quit,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.effects.run(effects);
    }
}

/// Maps a key press to a message; `None` means quit.
fn key_action(key: KeyEvent, query: &str, columns: usize) -> Option<Msg> {
    // AltGr arrives as CONTROL|ALT on Windows and still produces text.
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::ALT);
    let columns = columns.max(1) as isize;
    let msg = match key.code {
        KeyCode::Esc => return None,
        KeyCode::Char('c') if ctrl => return None,
        KeyCode::Char('u') if ctrl => Msg::QueryChanged(String::new()),
        KeyCode::Char(ch) if !ctrl => {
            let mut query = query.to_string();
            query.push(ch);
            Msg::QueryChanged(query)
        }
        KeyCode::Backspace => {
            let mut query = query.to_string();
            query.pop();
            Msg::QueryChanged(query)
        }
        KeyCode::Left => Msg::SelectionMoved { delta: -1 },
        KeyCode::Right => Msg::SelectionMoved { delta: 1 },
        KeyCode::Up => Msg::SelectionMoved { delta: -columns },
        KeyCode::Down => Msg::SelectionMoved { delta: columns },
        KeyCode::Enter => Msg::OpenSelected,
        _ => Msg::NoOp,
    };
    Some(msg)
}
