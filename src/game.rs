use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;

use crate::config::GameConfig;
use crate::keymap::{self, Action};
use crate::runtime::{Event, ScheduledTimer, TimerKind};
use crate::session::Session;
use crate::texts::TextSource;
use crate::typing_policy::{apply_keystroke, Outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    NotStarted,
    Countdown,
    Typing,
    ShowingResult,
}

/// Side effects requested by `Game::update`; the runtime carries them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Schedule(ScheduledTimer),
    Beep,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub countdown: Duration,
    pub clock: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            countdown: Duration::from_secs(1),
            clock: Duration::from_millis(10),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

/// One typing game: configuration, the round in progress and the view size.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    timings: Timings,
    source: Box<dyn TextSource>,
    pub session: Session,
    pub viewport: Viewport,
    /// Instant handed in with the most recent event.
    pub observed_at: Option<Instant>,
}

impl Game {
    pub fn new(config: GameConfig, source: Box<dyn TextSource>) -> Self {
        Self::with_timings(config, source, Timings::default())
    }

    pub fn with_timings(
        config: GameConfig,
        mut source: Box<dyn TextSource>,
        timings: Timings,
    ) -> Self {
        let texts = source.generate(config.text_count());
        tracing::info!(texts = texts.len(), beep = config.beep, "new session");
        Self {
            config,
            timings,
            source,
            session: Session::new(texts),
            viewport: Viewport::default(),
            observed_at: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        let s = &self.session;
        if !s.started {
            Phase::NotStarted
        } else if s.is_complete() {
            Phase::ShowingResult
        } else if s.is_running() {
            Phase::Typing
        } else {
            Phase::Countdown
        }
    }

    /// Draws fresh texts and clears the round. Configuration is kept.
    pub fn reset(&mut self) {
        let texts = self.source.generate(self.config.text_count());
        tracing::info!(texts = texts.len(), "session reset");
        self.session = Session::new(texts);
    }

    /// Whether a timer of `kind` should run in the current phase.
    pub fn continuation(&self, kind: TimerKind) -> Option<ScheduledTimer> {
        match (kind, self.phase()) {
            (TimerKind::Countdown, Phase::Countdown) => {
                Some(ScheduledTimer::new(kind, self.timings.countdown))
            }
            (TimerKind::Clock, Phase::Typing) => {
                Some(ScheduledTimer::new(kind, self.timings.clock))
            }
            _ => None,
        }
    }

    pub fn update(&mut self, event: Event, now: Instant) -> Vec<Effect> {
        self.observed_at = Some(now);
        let before = self.phase();

        let effects = match event {
            Event::Key(key) => self.on_key(key, now),
            Event::Resize(width, height) => {
                self.viewport = Viewport { width, height };
                vec![]
            }
            Event::Timer(kind) => self.on_timer(kind, now),
        };

        let after = self.phase();
        if before != after {
            tracing::debug!(from = %before, to = %after, "phase changed");
        }
        effects
    }

    fn on_key(&mut self, key: KeyEvent, now: Instant) -> Vec<Effect> {
        let phase = self.phase();
        match keymap::resolve(&key, phase) {
            Some(Action::Cancel) | Some(Action::Quit) => vec![Effect::Exit],
            Some(Action::Start) => {
                self.session.started = true;
                self.schedule(TimerKind::Countdown)
            }
            Some(Action::Retry) => {
                self.reset();
                vec![]
            }
            None if phase == Phase::Typing => self.on_keystroke(&key, now),
            None => vec![],
        }
    }

    fn on_keystroke(&mut self, key: &KeyEvent, now: Instant) -> Vec<Effect> {
        match apply_keystroke(&mut self.session, keymap::typed_char(key), now) {
            Outcome::Correct => {
                if self.session.is_complete() {
                    tracing::info!(
                        chars = self.session.total_chars(),
                        mistakes = self.session.mistakes,
                        wpm = self.session.wpm().unwrap_or_default(),
                        record_ms = self.session.record().unwrap_or_default().as_millis() as u64,
                        "session complete"
                    );
                }
                vec![]
            }
            Outcome::Incorrect => {
                tracing::trace!(
                    expected = ?self.session.current_char(),
                    got = ?key.code,
                    mistakes = self.session.mistakes,
                    "mistake"
                );
                if self.config.beep {
                    vec![Effect::Beep]
                } else {
                    vec![]
                }
            }
        }
    }

    fn on_timer(&mut self, kind: TimerKind, now: Instant) -> Vec<Effect> {
        match kind {
            TimerKind::Countdown if self.phase() == Phase::Countdown => {
                self.session.countdown -= 1;
                if self.session.countdown == 0 {
                    self.session.start_at = Some(now);
                    self.schedule(TimerKind::Clock)
                } else {
                    self.schedule(TimerKind::Countdown)
                }
            }
            TimerKind::Countdown => vec![],
            TimerKind::Clock => self.schedule(TimerKind::Clock),
        }
    }

    fn schedule(&self, kind: TimerKind) -> Vec<Effect> {
        self.continuation(kind).map(Effect::Schedule).into_iter().collect()
    }
}
