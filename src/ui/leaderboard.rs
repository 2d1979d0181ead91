use super::{draw_help, draw_title};
use crate::models::{AppContext, QuizResult};
use crate::stats::{Stats, best_category};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub name: &'static str,
    pub score: u32,
    pub category: &'static str,
}

const fn entry(name: &'static str, score: u32, category: &'static str) -> LeaderboardEntry {
    LeaderboardEntry {
        name,
        score,
        category,
    }
}

/// Fixed sample standings; there is no shared score service.
pub const LEADERBOARD: [LeaderboardEntry; 10] = [
    entry("John Doe", 95, "Science"),
    entry("Jane Smith", 92, "History"),
    entry("Mike Johnson", 90, "Sports"),
    entry("Sarah Wilson", 88, "General"),
    entry("Alex Brown", 85, "Science"),
    entry("Emma Davis", 82, "History"),
    entry("Tom Miller", 80, "Sports"),
    entry("Lisa Taylor", 78, "General"),
    entry("Chris White", 75, "Science"),
    entry("Anna Lee", 72, "History"),
];

fn rank_label(rank: usize) -> String {
    match rank {
        1 => "1st".to_string(),
        2 => "2nd".to_string(),
        3 => "3rd".to_string(),
        n => format!("{}th", n),
    }
}

pub fn draw_leaderboard(f: &mut Frame, ctx: &AppContext, results: &[QuizResult]) {
    let theme = &ctx.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(LEADERBOARD.len() as u16 + 3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_title(f, chunks[0], theme, "Leaderboard");

    let rows = LEADERBOARD.iter().enumerate().map(|(i, entry)| {
        let rank = i + 1;
        let style = match rank {
            1 => Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
            2 => Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            3 => Style::default()
                .fg(theme.warning)
                .add_modifier(Modifier::BOLD),
            _ => Style::default(),
        };
        Row::new(vec![
            Cell::from(rank_label(rank)),
            Cell::from(entry.name),
            Cell::from(entry.score.to_string()),
            Cell::from(entry.category),
        ])
        .style(style)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Percentage(40),
            Constraint::Length(8),
            Constraint::Percentage(30),
        ],
    )
    .header(
        Row::new(vec!["Rank", "Player", "Score", "Category"])
            .style(theme.title())
            .bottom_margin(1),
    )
    .block(Block::default().borders(Borders::ALL).title("Top Players"));
    f.render_widget(table, chunks[1]);

    let stats = Stats::from_results(results);
    let performance = vec![
        Line::from(vec![
            Span::from("Average Score: "),
            Span::styled(stats.average_score.to_string(), theme.highlight()),
        ]),
        Line::from(vec![
            Span::from("Total Quizzes: "),
            Span::styled(stats.total_quizzes.to_string(), theme.highlight()),
        ]),
        Line::from(vec![
            Span::from("Best Category: "),
            Span::styled(best_category(results), theme.highlight()),
        ]),
    ];
    let performance = Paragraph::new(performance)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Your Performance"),
        );
    f.render_widget(performance, chunks[2]);

    draw_help(f, chunks[3], theme, &[("Esc/m", "Home")]);
}
