pub mod screen;
pub mod theme;

use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Text},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::game::Game;
use screen::current_screen;
use theme::Theme;

/// Builds the full frame for the current phase, centered in the viewport.
pub fn frame(game: &Game, theme: &Theme) -> Text<'static> {
    let lines = current_screen(game.phase()).lines(game, theme);
    let top = (game.viewport.height as usize).saturating_sub(lines.len()) / 2;

    let mut out = vec![Line::default(); top];
    out.extend(lines.into_iter().map(Line::centered));
    Text::from(out)
}

/// The frame as plain text, one terminal row per line.
pub fn plain(text: &Text) -> String {
    text.lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|s| s.content.as_ref())
                .collect::<String>()
        })
        .join("\n")
}

impl Widget for &Game {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(frame(self, &Theme::DEFAULT))
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
