use super::{draw_help, draw_title};
use crate::models::{AppContext, QuizConfig};
use crate::stats::{Achievement, Stats};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

pub fn draw_home(f: &mut Frame, ctx: &AppContext, stats: &Stats, achievements: &[Achievement]) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(4),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_title(f, chunks[0], &ctx.theme, "Flash Quiz");
    draw_welcome(f, chunks[1], ctx);
    draw_stats_grid(f, chunks[2], ctx, stats);
    draw_daily_challenge(f, chunks[3], ctx);
    draw_achievements(f, chunks[4], ctx, achievements);

    let account_key = if !ctx.accounts_enabled {
        None
    } else if ctx.user.is_some() {
        Some(("a", "Sign Out"))
    } else {
        Some(("a", "Log In"))
    };
    let mut keys = vec![
        ("Enter/q", "Start Quiz"),
        ("c", "Daily Challenge"),
        ("p", "Profile"),
        ("l", "Leaderboard"),
    ];
    keys.extend(account_key);
    keys.push(("Esc", "Quit"));
    draw_help(f, chunks[5], &ctx.theme, &keys);
}

fn draw_welcome(f: &mut Frame, area: Rect, ctx: &AppContext) {
    let line = match (&ctx.user, ctx.accounts_enabled) {
        (Some(user), _) => Line::from(vec![
            Span::from("Welcome back, "),
            Span::styled(user.display_name().to_string(), ctx.theme.highlight()),
            Span::from("!"),
        ]),
        (None, true) => Line::from(vec![
            Span::from("Welcome! "),
            Span::styled("Log in", ctx.theme.key()),
            Span::from(" to keep your profile in sync."),
        ]),
        (None, false) => Line::from(Span::styled(
            "Welcome! Accounts are disabled (no Firebase API key configured).",
            ctx.theme.placeholder(),
        )),
    };
    let welcome = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(welcome, area);
}

fn draw_stats_grid(f: &mut Frame, area: Rect, ctx: &AppContext, stats: &Stats) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
        ])
        .split(area);

    let values = [
        ("Quizzes", stats.total_quizzes.to_string()),
        ("Average Score", stats.average_score.to_string()),
        ("Highest Score", stats.highest_score.to_string()),
        ("Accuracy", format!("{}%", stats.accuracy())),
        ("Trophies", stats.total_trophies.to_string()),
    ];
    for ((label, value), cell) in values.into_iter().zip(cells.iter()) {
        let text = vec![
            Line::from(Span::styled(value, ctx.theme.highlight())),
            Line::from(Span::styled(label, Style::default().fg(ctx.theme.muted))),
        ];
        let widget = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(widget, *cell);
    }
}

fn draw_daily_challenge(f: &mut Frame, area: Rect, ctx: &AppContext) {
    let challenge = QuizConfig::daily_challenge();
    let text = vec![
        Line::from(format!(
            "{} questions - {} - {}s per question",
            challenge.amount,
            challenge.difficulty.label(),
            challenge.time_limit_secs
        )),
        Line::from(vec![
            Span::from("Category: "),
            Span::styled(challenge.category.name, ctx.theme.highlight()),
        ]),
    ];
    let widget = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ctx.theme.accent))
            .title("Daily Challenge"),
    );
    f.render_widget(widget, area);
}

fn draw_achievements(f: &mut Frame, area: Rect, ctx: &AppContext, achievements: &[Achievement]) {
    let items: Vec<ListItem> = achievements
        .iter()
        .map(|a| {
            let (mark, style) = if a.completed {
                (
                    "[x]",
                    Style::default()
                        .fg(ctx.theme.success)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("[ ]", Style::default().fg(ctx.theme.muted))
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} {}", mark, a.name), style),
                Span::styled(
                    format!("  {}", a.description),
                    Style::default().fg(ctx.theme.text_secondary),
                ),
            ]))
        })
        .collect();

    let list =
        List::new(items).block(Block::default().borders(Borders::ALL).title("Achievements"));
    f.render_widget(list, area);
}
