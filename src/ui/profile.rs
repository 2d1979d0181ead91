use super::{draw_help, draw_title};
use crate::models::{AppContext, QuizResult};
use crate::stats::{HeatmapDay, Stats};
use crate::theme::Theme;
use crate::utils::{format_result_date, truncate_string};
use chrono::NaiveDate;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

fn heat_color(day: &HeatmapDay, theme: &Theme) -> Color {
    match day.intensity {
        0 => theme.muted,
        1..=20 => Color::Rgb(14, 68, 41),
        21..=40 => Color::Rgb(0, 109, 50),
        41..=60 => Color::Rgb(38, 166, 65),
        _ => Color::Rgb(57, 211, 83),
    }
}

pub fn draw_profile(f: &mut Frame, ctx: &AppContext, results: &[QuizResult], today: NaiveDate) {
    let theme = &ctx.theme;
    let stats = Stats::from_results(results);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = match &ctx.user {
        Some(user) => format!("Profile - {}", user.display_name()),
        None => "Profile".to_string(),
    };
    draw_title(f, chunks[0], theme, &title);

    draw_totals(f, chunks[1], theme, &stats);
    draw_breakdown(f, chunks[2], theme, &stats);
    draw_heatmap(f, chunks[3], theme, &stats.heatmap(today));
    draw_history(f, chunks[4], theme, results);

    draw_help(f, chunks[5], theme, &[("q", "New Quiz"), ("Esc/m", "Home")]);
}

fn draw_totals(f: &mut Frame, area: Rect, theme: &Theme, stats: &Stats) {
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
        ("Average", stats.average_score.to_string()),
        ("Best", stats.highest_score.to_string()),
        ("Points", stats.total_points.to_string()),
        ("Trophies", stats.total_trophies.to_string()),
    ];
    for ((label, value), cell) in values.into_iter().zip(cells.iter()) {
        let text = vec![
            Line::from(Span::styled(value, theme.highlight())),
            Line::from(Span::styled(label, Style::default().fg(theme.muted))),
        ];
        let widget = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(widget, *cell);
    }
}

fn draw_breakdown(f: &mut Frame, area: Rect, theme: &Theme, stats: &Stats) {
    let categories: Vec<String> = stats
        .category_counts
        .iter()
        .map(|(name, count)| format!("{} {}", name, count))
        .collect();
    let difficulties: Vec<String> = stats
        .difficulty_counts
        .iter()
        .map(|(difficulty, count)| format!("{} {}", difficulty.label(), count))
        .collect();

    let join = |parts: Vec<String>| {
        if parts.is_empty() {
            "None yet".to_string()
        } else {
            parts.join("  ")
        }
    };

    let text = vec![
        Line::from(vec![
            Span::styled("Categories: ", theme.key()),
            Span::from(join(categories)),
        ]),
        Line::from(vec![
            Span::styled("Difficulty: ", theme.key()),
            Span::from(join(difficulties)),
            Span::from(format!(
                "   Accuracy: {}% ({}/{})",
                stats.accuracy(),
                stats.correct_answers,
                stats.total_questions
            )),
        ]),
    ];
    let widget =
        Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Breakdown"));
    f.render_widget(widget, area);
}

fn draw_heatmap(f: &mut Frame, area: Rect, theme: &Theme, days: &[HeatmapDay]) {
    let spans: Vec<Span> = days
        .iter()
        .map(|day| Span::styled("■ ", Style::default().fg(heat_color(day, theme))))
        .collect();
    let widget = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Activity (last 30 days)"),
        );
    f.render_widget(widget, area);
}

fn draw_history(f: &mut Frame, area: Rect, theme: &Theme, results: &[QuizResult]) {
    let block = Block::default().borders(Borders::ALL).title("Quiz History");

    if results.is_empty() {
        let empty = Paragraph::new("No quizzes yet. Press q to play your first one!")
            .style(theme.placeholder())
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = results
        .iter()
        .rev()
        .map(|r| {
            let percent = if r.total_questions == 0 {
                0
            } else {
                r.correct_answers * 100 / r.total_questions
            };
            let difficulty = r.difficulty.map(|d| d.label()).unwrap_or("-");
            let line = format!(
                "{}  Score: {}% • {} correct out of {}  {} / {}",
                format_result_date(&r.date),
                percent,
                r.correct_answers,
                r.total_questions,
                r.category,
                difficulty
            );
            ListItem::new(truncate_string(&line, width))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}
