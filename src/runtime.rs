use std::io::Write;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// How long `next_event` waits for input when no timer is pending.
const IDLE_WAIT: Duration = Duration::from_millis(250);

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum TimerKind {
    /// One-second countdown before typing starts
    Countdown,
    /// Fast tick that keeps the elapsed-time readout moving
    Clock,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledTimer {
    pub kind: TimerKind,
    pub after: Duration,
}

impl ScheduledTimer {
    pub fn new(kind: TimerKind, after: Duration) -> Self {
        Self { kind, after }
    }
}

/// Unified event type consumed by the game
#[derive(Clone, Debug)]
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    Timer(TimerKind),
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<Event, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<Event>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let ev = match event::read() {
                // Release/repeat events only show up with keyboard enhancement
                // enabled; a key counts once.
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => Event::Key(key),
                Ok(CtEvent::Resize(w, h)) => Event::Resize(w, h),
                Ok(_) => continue,
                Err(err) => {
                    tracing::warn!(error = %err, "terminal event reader stopped");
                    break;
                }
            };
            if tx.send(ev).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<Event, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<Event>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<Event>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<Event, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that hands the game one event at a time, turning due timers into
/// `Event::Timer`.
pub struct Runner<E: EventSource> {
    event_source: E,
    timers: Vec<(Instant, TimerKind)>,
}

impl<E: EventSource> Runner<E> {
    pub fn new(event_source: E) -> Self {
        Self {
            event_source,
            timers: Vec::new(),
        }
    }

    pub fn schedule(&mut self, timer: ScheduledTimer, now: Instant) {
        tracing::debug!(
            kind = %timer.kind,
            after_ms = timer.after.as_millis() as u64,
            "timer scheduled"
        );
        self.timers.push((now + timer.after, timer.kind));
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Blocks until an input event arrives or the earliest timer is due.
    ///
    /// Returns `None` once the event source is gone and no timer is left.
    pub fn next_event(&mut self) -> Option<Event> {
        loop {
            let now = Instant::now();
            let earliest = self
                .timers
                .iter()
                .enumerate()
                .min_by_key(|(_, (deadline, _))| *deadline)
                .map(|(idx, (deadline, _))| (idx, *deadline));

            if let Some((idx, deadline)) = earliest {
                if deadline <= now {
                    let (_, kind) = self.timers.remove(idx);
                    return Some(Event::Timer(kind));
                }
            }

            let wait = earliest.map_or(IDLE_WAIT, |(_, deadline)| deadline - now);
            match self.event_source.recv_timeout(wait) {
                Ok(ev) => return Some(ev),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    if earliest.is_none() {
                        return None;
                    }
                    std::thread::sleep(wait);
                }
            }
        }
    }
}

/// Rings the terminal bell. Failures are ignored.
pub fn ring_bell(out: &mut impl Write) {
    let _ = out.write_all(b"\x07").and_then(|()| out.flush());
}
