//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.  A
//! `Tick` goes out every frame interval even while input keeps arriving, so
//! slider animations keep stepping during a drag.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// Roughly sixty frames a second.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// One display frame elapsed.
    Tick,
}

/// Map a crossterm event to the ones the app handles.
fn translate(ev: CtEvent) -> Option<AppEvent> {
    match ev {
        CtEvent::Key(k) => Some(AppEvent::Key(k)),
        CtEvent::Mouse(m) => Some(AppEvent::Mouse(m)),
        CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

/// Spawns a background task that polls the terminal for events and sends them
/// through the returned channel.
pub fn spawn_event_reader(frame: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut next_tick = Instant::now() + frame;
        loop {
            let wait = next_tick.saturating_duration_since(Instant::now());
            if event::poll(wait).unwrap_or(false) {
                // Focus and paste events are dropped; the tick check still runs.
                if let Some(app_event) = event::read().ok().and_then(translate) {
                    if tx.send(app_event).is_err() {
                        break; // receiver dropped
                    }
                }
            }
            let now = Instant::now();
            if now >= next_tick {
                next_tick = now + frame;
                if tx.send(AppEvent::Tick).is_err() {
                    break;
                }
            }
        }
    });

    rx
}
