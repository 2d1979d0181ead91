use super::{centered_rect, draw_help, draw_title};
use crate::models::{
    AnswerStatus, AppContext, CATEGORIES, Difficulty, POINTS_PER_TROPHY, QuizPhase, QuizSession,
};
use crate::theme::Theme;
use crate::ui::layout::calculate_quiz_chunks;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap},
};

const LOW_TIME_SECS: u32 = 10;

pub fn draw_quiz(f: &mut Frame, session: &QuizSession, ctx: &AppContext) {
    match &session.phase {
        QuizPhase::Configuring => draw_settings(f, session, &ctx.theme),
        QuizPhase::Loading => draw_message(
            f,
            &ctx.theme,
            "Loading questions...",
            ctx.theme.title(),
            &[("Esc", "Quit")],
        ),
        QuizPhase::Error(message) => draw_message(
            f,
            &ctx.theme,
            message,
            Style::default()
                .fg(ctx.theme.danger)
                .add_modifier(Modifier::BOLD),
            &[("Enter/r", "Try Again"), ("Esc", "Settings")],
        ),
        QuizPhase::Active | QuizPhase::AnswerLock => draw_question(f, session, &ctx.theme),
        QuizPhase::Summary => draw_summary(f, session, &ctx.theme),
    }
}

fn draw_settings(f: &mut Frame, session: &QuizSession, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(CATEGORIES.len() as u16 + 2),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_title(f, chunks[0], theme, "Quiz Settings");

    let mut difficulty_spans = Vec::new();
    for difficulty in Difficulty::ALL {
        let style = if difficulty == session.config.difficulty {
            theme.highlight().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        difficulty_spans.push(Span::styled(format!(" {} ", difficulty.label()), style));
        difficulty_spans.push(Span::from("  "));
    }
    let difficulty = Paragraph::new(Line::from(difficulty_spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Difficulty"));
    f.render_widget(difficulty, chunks[1]);

    let items: Vec<ListItem> = CATEGORIES
        .iter()
        .map(|category| {
            if category.id == session.config.category.id {
                ListItem::new(format!("> {}", category.name)).style(theme.highlight())
            } else {
                ListItem::new(format!("  {}", category.name))
            }
        })
        .collect();
    let categories = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(
                "Category ({} questions, {}s each)",
                session.config.amount, session.config.time_limit_secs
            )),
    );
    f.render_widget(categories, chunks[2]);

    draw_help(
        f,
        chunks[3],
        theme,
        &[
            ("←/→", "Difficulty"),
            ("↑/↓", "Category"),
            ("Enter", "Start Quiz"),
            ("Esc", "Back"),
        ],
    );
}

fn draw_message(f: &mut Frame, theme: &Theme, message: &str, style: Style, keys: &[(&str, &str)]) {
    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let body = centered_rect(80, 3, chunks[0]);
    let text = Paragraph::new(message.to_string())
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(text, body);

    draw_help(f, chunks[1], theme, keys);
}

fn draw_question(f: &mut Frame, session: &QuizSession, theme: &Theme) {
    let Some(question) = session.current_question() else {
        return;
    };
    let layout = calculate_quiz_chunks(f.area());

    let header = Line::from(vec![
        Span::styled(
            format!(
                "Question {} of {}",
                session.current_index + 1,
                session.questions.len()
            ),
            theme.title(),
        ),
        Span::from(format!("  -  {}  -  ", session.config.category.name)),
        Span::styled(
            format!("Time: {}s", session.time_left),
            if session.time_left <= LOW_TIME_SECS {
                Style::default()
                    .fg(theme.danger)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            },
        ),
        Span::from(format!("  -  Score: {}", session.score)),
    ]);
    let header = Paragraph::new(header)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let progress = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(theme.primary))
        .percent(session.progress_percent());
    f.render_widget(progress, layout.progress_area);

    let question_text = Paragraph::new(Text::from(question.question.as_str()))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(question_text, layout.question_area);

    let correct = session.correct_index();
    let locked = session.phase == QuizPhase::AnswerLock;
    let items: Vec<ListItem> = session
        .shuffled_answers
        .iter()
        .enumerate()
        .map(|(i, answer)| {
            let style = if locked && Some(i) == correct {
                Style::default()
                    .fg(theme.success)
                    .add_modifier(Modifier::BOLD)
            } else if locked
                && session.answer_status == Some(AnswerStatus::Incorrect)
                && session.selected_answer == Some(i)
            {
                Style::default()
                    .fg(theme.danger)
                    .add_modifier(Modifier::BOLD)
            } else if !locked && i == session.highlighted {
                theme.highlight()
            } else {
                Style::default()
            };
            let marker = if !locked && i == session.highlighted {
                ">"
            } else {
                " "
            };
            ListItem::new(format!("{} {}. {}", marker, i + 1, answer)).style(style)
        })
        .collect();

    let answers_title = match session.answer_status {
        Some(AnswerStatus::Correct) => "Correct!",
        Some(AnswerStatus::Incorrect) if session.selected_answer.is_none() => "Time's up!",
        Some(AnswerStatus::Incorrect) => "Incorrect",
        None => "Answers",
    };
    let answers = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(answers_title),
    );
    f.render_widget(answers, layout.answers_area);

    draw_help(
        f,
        layout.help_area,
        theme,
        &[
            ("↑/↓", "Navigate"),
            ("Enter/1-4", "Answer"),
            ("Esc", "Quit Quiz"),
        ],
    );
}

fn draw_summary(f: &mut Frame, session: &QuizSession, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_title(f, chunks[0], theme, "Quiz Complete!");

    let points = session.score;
    let mut summary_text = Text::default();
    summary_text.push_line(Line::from(""));
    summary_text.push_line(Line::from(Span::styled(
        format!("Your Score: {}", session.score),
        theme.highlight(),
    )));
    summary_text.push_line(Line::from(""));
    summary_text.push_line(Line::from(format!(
        "Correct Answers: {} out of {}",
        session.correct_answers(),
        session.questions.len()
    )));
    summary_text.push_line(Line::from(format!(
        "{} - {}",
        session.config.category.name,
        session.config.difficulty.label()
    )));
    summary_text.push_line(Line::from(""));
    summary_text.push_line(Line::from(format!(
        "Points: {}   Trophies: {}",
        points,
        points / POINTS_PER_TROPHY
    )));

    let summary = Paragraph::new(summary_text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(summary, chunks[1]);

    draw_help(
        f,
        chunks[2],
        theme,
        &[("r", "Play Again"), ("p", "View Profile"), ("m/Esc", "Home")],
    );
}

pub fn draw_quit_confirmation(f: &mut Frame, theme: &Theme) {
    let area = centered_rect(60, 7, f.area());
    f.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from("Are you sure you want to exit the quiz? Your progress will be lost."),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "y",
                Style::default()
                    .fg(theme.success)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::from(" Exit  "),
            Span::styled(
                "n",
                Style::default()
                    .fg(theme.danger)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::from(" Cancel"),
        ]),
    ];
    let dialog = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.warning))
                .title("Exit Quiz?"),
        );
    f.render_widget(dialog, area);
}
