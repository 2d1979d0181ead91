use super::{centered_rect, draw_help};
use crate::models::{AppContext, AuthField, AuthForm, AuthMode};
use crate::utils::mask;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

fn field_label(field: AuthField) -> &'static str {
    match field {
        AuthField::Username => "Username",
        AuthField::Email => "Email",
        AuthField::Password => "Password",
    }
}

pub fn draw_auth(f: &mut Frame, form: &AuthForm, ctx: &AppContext) {
    let theme = &ctx.theme;
    let fields = form.fields();
    let height = 3 + fields.len() as u16 * 3 + 3 + 3;
    let area = centered_rect(60, height, f.area());

    let mut constraints = vec![Constraint::Length(3)];
    constraints.extend(fields.iter().map(|_| Constraint::Length(3)));
    constraints.push(Constraint::Length(3));
    constraints.push(Constraint::Length(3));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let title = match form.mode {
        AuthMode::Login => "Log In",
        AuthMode::Signup => "Sign Up",
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(title, theme.title()),
        Span::styled("  Flash Quiz", Style::default().fg(theme.muted)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    for (i, field) in fields.iter().enumerate() {
        let focused = form.focused == *field && !form.in_progress;
        let value = form.field(*field);
        let shown = if *field == AuthField::Password {
            mask(value)
        } else {
            value.to_string()
        };
        let mut spans = vec![Span::from(shown)];
        if focused {
            spans.push(Span::styled("_", theme.key()));
        }
        let input = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border(focused))
                .title(field_label(*field)),
        );
        f.render_widget(input, chunks[1 + i]);
    }

    let status_area = chunks[1 + fields.len()];
    let status = if form.in_progress {
        Paragraph::new(match form.mode {
            AuthMode::Login => "Signing in...",
            AuthMode::Signup => "Creating account...",
        })
        .style(theme.placeholder())
    } else if let Some(error) = &form.error {
        Paragraph::new(error.as_str()).style(
            Style::default()
                .fg(theme.danger)
                .add_modifier(Modifier::BOLD),
        )
    } else if !ctx.accounts_enabled {
        Paragraph::new("Accounts are disabled").style(theme.placeholder())
    } else {
        Paragraph::new("")
    };
    f.render_widget(
        status.alignment(Alignment::Center).wrap(Wrap { trim: true }),
        status_area,
    );

    let switch = match form.mode {
        AuthMode::Login => "Need an account? Sign Up",
        AuthMode::Signup => "Have an account? Log In",
    };
    draw_help(
        f,
        chunks[2 + fields.len()],
        theme,
        &[
            ("Tab", "Next Field"),
            ("Enter", "Submit"),
            ("Ctrl+T", switch),
            ("Esc", "Back"),
        ],
    );
}
