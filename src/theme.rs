use ratatui::style::{Color, Modifier, Style};

/// Color tokens shared by every screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub primary: Color,
    pub accent: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub border: Color,
    pub muted: Color,
    pub success: Color,
    pub danger: Color,
    pub warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            text: Color::White,
            text_secondary: Color::LightBlue,
            border: Color::Blue,
            muted: Color::DarkGray,
            success: Color::Green,
            danger: Color::Red,
            warning: Color::Yellow,
        }
    }
}

impl Theme {
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.primary)
        } else {
            Style::default().fg(self.muted)
        }
    }

    pub fn placeholder(&self) -> Style {
        Style::default()
            .fg(self.muted)
            .add_modifier(Modifier::ITALIC)
    }
}
