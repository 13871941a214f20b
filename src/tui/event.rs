use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, warn};

use crate::core::action::{Action, Key};

/// How long the reader blocks in `poll` before re-checking the stop flag.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Everything the event loop can receive, in arrival order.
#[derive(Debug)]
pub enum LoopEvent {
    /// A message for the state machine (key press or probe completion)
    Action(Action),
    /// The terminal changed size; only a redraw is needed
    Redraw,
    /// Reading from the terminal failed; fatal
    Failed(io::Error),
}

/// Translate a crossterm key event into a `Key`, dropping keys the app ignores.
pub fn translate_key(key_event: KeyEvent) -> Option<Key> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    match key_event.code {
        KeyCode::Char('c') if ctrl => Some(Key::Interrupt),
        KeyCode::Char('w') if ctrl => Some(Key::DeleteWordBackward),
        KeyCode::Char('u') if ctrl => Some(Key::DeleteToStart),
        KeyCode::Char('k') if ctrl => Some(Key::DeleteToEnd),
        KeyCode::Char('a') if ctrl => Some(Key::Home),
        KeyCode::Char('e') if ctrl => Some(Key::End),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Esc),
        KeyCode::Backspace if key_event.modifiers.contains(KeyModifiers::ALT) => {
            Some(Key::DeleteWordBackward)
        }
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        _ => None,
    }
}

/// Translate a terminal event into zero or more loop events.
///
/// A bracketed paste becomes one key press per printable character.
pub fn translate(event: Event) -> Vec<LoopEvent> {
    match event {
        Event::Key(key_event) => {
            debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code, key_event.modifiers
            );
            translate_key(key_event)
                .map(|key| LoopEvent::Action(Action::KeyPressed(key)))
                .into_iter()
                .collect()
        }
        Event::Paste(data) => data
            .chars()
            .filter(|c| !c.is_control())
            .map(|c| LoopEvent::Action(Action::KeyPressed(Key::Char(c))))
            .collect(),
        Event::Resize(..) => vec![LoopEvent::Redraw],
        _ => Vec::new(),
    }
}

/// Spawn the thread that reads terminal events and forwards them to `tx`.
///
/// The thread exits when `stop` is set, when the receiver is gone, or after
/// reporting a read failure.
pub fn spawn_input_reader(
    tx: Sender<LoopEvent>,
    stop: Arc<AtomicBool>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("meteo-input".to_string())
        .spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                let ready = match event::poll(POLL_INTERVAL) {
                    Ok(ready) => ready,
                    Err(e) => {
                        warn!("Terminal poll failed: {}", e);
                        let _ = tx.send(LoopEvent::Failed(e));
                        return;
                    }
                };
                if !ready {
                    continue;
                }

                match event::read() {
                    Ok(event) => {
                        for loop_event in translate(event) {
                            if tx.send(loop_event).is_err() {
                                debug!("Event loop gone, input reader exiting");
                                return;
                            }
                        }
                    }
                    Err(e) => {
                        warn!("Terminal read failed: {}", e);
                        let _ = tx.send(LoopEvent::Failed(e));
                        return;
                    }
                }
            }
            debug!("Input reader stopped");
        })
}
