//! # TUI Adapter
//!
//! The ratatui-specific layer. Owns the terminal, reads key events, runs
//! probes and redraws the view.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Message Flow
//!
//! ```text
//!   input thread ──┐
//!                  ├──▶ mpsc ──▶ update(app, action) ──▶ Effect
//!   probe tasks ───┘                                       │
//!        ▲                                                 │
//!        └──────────────── tokio::spawn ◀── StartProbe ────┘
//! ```
//!
//! Every message goes through one channel, so the state machine sees key
//! presses and probe completions one at a time in the order they arrived.
//! The view is redrawn after each one. Probes are never cancelled; a probe
//! still running at quit simply has nowhere to report to.

mod event;
mod ui;
pub mod view;

use log::{debug, info, warn};
use std::io::{self, stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::probe::{HttpProbe, StatusProbe};
use crate::tui::event::{LoopEvent, spawn_input_reader};

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,
            SetCursorStyle::BlinkingBar
        )?;
        info!("Terminal modes enabled (bracketed paste, blinking bar cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape,
            Show
        );
    }
}

/// Build the HTTP probe from the resolved config.
pub fn build_probe(config: &ResolvedConfig) -> io::Result<Arc<dyn StatusProbe>> {
    let probe = HttpProbe::new(config.geocoding_url.clone(), config.probe_timeout)
        .map_err(io::Error::other)?;
    debug!("Forecast endpoint reserved: {}", config.forecast_url);
    Ok(Arc::new(probe))
}

pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let probe = build_probe(&config)?;
    let mut app = App::from_config(probe, &config);

    let mut terminal = ratatui::try_init()?;
    let result =
        TerminalModeGuard::new().and_then(|_guard| event_loop(&mut terminal, &mut app));
    ratatui::restore();

    match &result {
        Ok(()) => info!("Exited cleanly"),
        Err(e) => warn!("Event loop failed: {}", e),
    }
    result
}

fn event_loop(terminal: &mut DefaultTerminal, app: &mut App) -> io::Result<()> {
    let (tx, rx) = mpsc::channel();
    let stop = Arc::new(AtomicBool::new(false));
    let reader = spawn_input_reader(tx.clone(), Arc::clone(&stop))?;

    let result = drive(terminal, app, &tx, &rx);

    stop.store(true, Ordering::Relaxed);
    if reader.join().is_err() {
        warn!("Input reader thread panicked");
    }
    result
}

fn drive(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    tx: &mpsc::Sender<LoopEvent>,
    rx: &mpsc::Receiver<LoopEvent>,
) -> io::Result<()> {
    let mut probes_started = 0u64;
    terminal.draw(|f| ui::draw_ui(f, app))?;

    // The loop holds a sender itself, so recv() only fails if that is dropped.
    while let Ok(loop_event) = rx.recv() {
        match loop_event {
            LoopEvent::Action(action) => {
                if dispatch(app, action, tx, &mut probes_started) == Effect::Quit {
                    return Ok(());
                }
            }
            LoopEvent::Redraw => {}
            LoopEvent::Failed(e) => return Err(e),
        }
        terminal.draw(|f| ui::draw_ui(f, app))?;
    }
    Ok(())
}

/// Run one action through the state machine and carry out its effect.
fn dispatch(
    app: &mut App,
    action: Action,
    tx: &mpsc::Sender<LoopEvent>,
    probes_started: &mut u64,
) -> Effect {
    debug!("Event loop received: {:?}", action);
    let effect = update(app, action);
    if effect == Effect::StartProbe {
        *probes_started += 1;
        spawn_probe(Arc::clone(&app.probe), tx.clone(), *probes_started);
    }
    effect
}

fn spawn_probe(
    probe: Arc<dyn StatusProbe>,
    tx: mpsc::Sender<LoopEvent>,
    seq: u64,
) -> tokio::task::JoinHandle<()> {
    info!("Spawning probe #{} ({})", seq, probe.name());
    tokio::spawn(async move {
        let action = match probe.check().await {
            Ok(status) => Action::ProbeSucceeded { status },
            Err(error) => Action::ProbeFailed(error),
        };
        debug!("Probe #{} finished: {:?}", seq, action);
        if tx.send(LoopEvent::Action(action)).is_err() {
            warn!("Probe #{} finished after the event loop exited", seq);
        }
    })
}
