use ratatui::style::{Color, Modifier, Style};

/// Colors used by every screen. Passed to the renderers explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub main: Color,
    pub error: Color,
}

impl Theme {
    pub const DEFAULT: Theme = Theme {
        main: Color::Rgb(0x00, 0xAD, 0xD8),
        error: Color::Rgb(0xFF, 0x00, 0x00),
    };

    pub fn bold(&self) -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    pub fn heading(&self) -> Style {
        self.bold().fg(self.main)
    }

    pub fn prompt(&self) -> Style {
        self.bold().add_modifier(Modifier::SLOW_BLINK)
    }

    pub fn typed(&self) -> Style {
        Style::default().add_modifier(Modifier::DIM)
    }

    pub fn current(&self, mistaking: bool) -> Style {
        let style = self.bold().add_modifier(Modifier::UNDERLINED);
        if mistaking {
            style.fg(self.error)
        } else {
            style
        }
    }

    pub fn remaining(&self) -> Style {
        self.bold()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_char_turns_red_on_mistake() {
        let theme = Theme::DEFAULT;
        assert_eq!(theme.current(false).fg, None);
        assert_eq!(theme.current(true).fg, Some(theme.error));
        assert!(theme.current(true).add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn typed_is_dim_and_remaining_bold() {
        let theme = Theme::default();
        assert!(theme.typed().add_modifier.contains(Modifier::DIM));
        assert!(theme.remaining().add_modifier.contains(Modifier::BOLD));
        assert_eq!(theme.heading().fg, Some(theme.main));
    }
}
