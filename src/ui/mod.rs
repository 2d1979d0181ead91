pub mod layout;
mod auth;
mod home;
mod leaderboard;
mod profile;
mod quiz;

pub use auth::draw_auth;
pub use home::draw_home;
pub use layout::{calculate_quiz_chunks, centered_rect};
pub use leaderboard::{LEADERBOARD, LeaderboardEntry, draw_leaderboard};
pub use profile::draw_profile;
pub use quiz::{draw_quit_confirmation, draw_quiz};

use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Renders a bordered, centered key-hint bar such as "Enter Select  Esc Back".
pub(crate) fn draw_help(f: &mut Frame, area: Rect, theme: &Theme, keys: &[(&str, &str)]) {
    let mut spans = Vec::with_capacity(keys.len() * 2);
    for (i, (key, label)) in keys.iter().enumerate() {
        spans.push(Span::styled(key.to_string(), theme.key()));
        let sep = if i + 1 < keys.len() { "  " } else { "" };
        spans.push(Span::from(format!(" {}{}", label, sep)));
    }

    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

pub(crate) fn draw_title(f: &mut Frame, area: Rect, theme: &Theme, title: &str) {
    let header = Paragraph::new(title.to_string())
        .style(theme.title())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}
