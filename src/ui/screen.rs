use ratatui::text::{Line, Span};

use crate::game::{Game, Phase};
use crate::ui::theme::Theme;
use crate::util::{format_record, pad_block};

const LOGO: &str = r" _                            _              _
| |_  _   _  _ __    ___   __| |  __ _  ___ | |__
| __|| | | || '_ \  / _ \ / _` | / _` |/ __|| '_ \
| |_ | |_| || |_) ||  __/| (_| || (_| |\__ \| | | |
 \__| \__, || .__/  \___| \__,_| \__,_||___/|_| |_|
      |___/ |_|";

/// One phase's content, top to bottom, before centering.
pub trait Screen {
    fn lines(&self, game: &Game, theme: &Theme) -> Vec<Line<'static>>;
}

/// Logo and start prompt
pub struct StartScreen;

impl Screen for StartScreen {
    fn lines(&self, _game: &Game, theme: &Theme) -> Vec<Line<'static>> {
        let logo: Vec<&str> = LOGO.lines().collect();
        let mut lines: Vec<Line> = pad_block(&logo)
            .into_iter()
            .map(|l| Line::styled(l, theme.heading()))
            .collect();
        lines.push(Line::default());
        lines.push(Line::styled("press space to start", theme.prompt()));
        lines
    }
}

pub struct CountdownScreen;

impl Screen for CountdownScreen {
    fn lines(&self, game: &Game, theme: &Theme) -> Vec<Line<'static>> {
        vec![Line::styled(game.session.countdown.to_string(), theme.bold())]
    }
}

/// Live record, the text being typed and progress
pub struct TypingScreen;

impl Screen for TypingScreen {
    fn lines(&self, game: &Game, theme: &Theme) -> Vec<Line<'static>> {
        let s = &game.session;
        let record = game
            .observed_at
            .map(|now| s.current_record(now))
            .unwrap_or_default();

        let (typed, current, remaining) = s.split_current();
        let text = Line::from(vec![
            Span::styled(typed, theme.typed()),
            Span::styled(
                current.map(String::from).unwrap_or_default(),
                theme.current(s.mistaking),
            ),
            Span::styled(remaining, theme.remaining()),
        ]);

        vec![
            Line::raw(format_record(record)),
            Line::default(),
            text,
            Line::default(),
            Line::raw(format!(
                "({}/{})",
                s.current_text_index + 1,
                s.texts.len()
            )),
        ]
    }
}

/// Final metrics and the retry/quit hints
pub struct ResultScreen;

impl Screen for ResultScreen {
    fn lines(&self, game: &Game, theme: &Theme) -> Vec<Line<'static>> {
        let s = &game.session;
        let record = format_record(s.record().unwrap_or_default());
        // inf from a zero-length round saturates instead of panicking
        let wpm = s.wpm().unwrap_or_default() as i64;

        let metrics = [
            format!("Record:     {}", record),
            format!("Characters: {}", s.total_chars()),
            format!("Mistakes:   {}", s.mistakes),
            format!("WPM:        {}", wpm),
        ];
        let metrics: Vec<&str> = metrics.iter().map(String::as_str).collect();

        let mut lines = vec![Line::styled("Result", theme.heading()), Line::default()];
        lines.extend(
            pad_block(&metrics)
                .into_iter()
                .map(|l| Line::styled(l, theme.bold())),
        );
        lines.push(Line::default());
        lines.extend(
            pad_block(&["[r] retry", "[q] quit"])
                .into_iter()
                .map(Line::raw),
        );
        lines
    }
}

/// Helper to construct the appropriate screen for the current phase
pub fn current_screen(phase: Phase) -> Box<dyn Screen> {
    match phase {
        Phase::NotStarted => Box::new(StartScreen),
        Phase::Countdown => Box::new(CountdownScreen),
        Phase::Typing => Box::new(TypingScreen),
        Phase::ShowingResult => Box::new(ResultScreen),
    }
}
