#[cfg(test)]
mod ui_render_tests {
    use crate::models::{
        AppContext, AuthForm, AuthMode, Difficulty, NetResponse, QuizConfig, QuizPhase,
        QuizResult, QuizSession, UserIdentity,
    };
    use crate::net_worker::FETCH_ERROR_MESSAGE;
    use crate::net_worker::mock::question;
    use crate::stats::{Stats, achievements};
    use crate::ui::{
        draw_auth, draw_home, draw_leaderboard, draw_profile, draw_quit_confirmation, draw_quiz,
    };
    use chrono::{TimeZone, Utc};
    use crossbeam_channel::unbounded;
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Instant;

    fn render<F>(width: u16, height: u16, draw: F) -> String
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(draw).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for row in buffer.content().chunks(buffer.area.width as usize) {
            for cell in row {
                out.push_str(cell.symbol());
            }
            out.push('\n');
        }
        out
    }

    fn active_session(now: Instant) -> QuizSession {
        let (tx, rx) = unbounded();
        let mut session = QuizSession::new(QuizConfig::default(), Some(tx));
        session.start();
        let Ok(crate::models::NetRequest::FetchQuestions { request_id, .. }) = rx.try_recv()
        else {
            panic!("expected a fetch request");
        };
        session.apply_response(
            NetResponse::Questions {
                request_id,
                questions: (0..3).map(question).collect(),
            },
            now,
        );
        session
    }

    fn sample_results() -> Vec<QuizResult> {
        let day = |d| Utc.with_ymd_and_hms(2024, 5, d, 9, 0, 0).unwrap();
        vec![
            QuizResult::new(70, 10, "History", Difficulty::Easy, day(1), Some(200)),
            QuizResult::new(100, 10, "Sports", Difficulty::Hard, day(2), Some(90)),
        ]
    }

    #[test]
    fn test_settings_screen_lists_categories() {
        let session = QuizSession::new(QuizConfig::default(), None);
        let ctx = AppContext::default();
        let screen = render(80, 24, |f| draw_quiz(f, &session, &ctx));

        assert!(screen.contains("Quiz Settings"));
        assert!(screen.contains("> General Knowledge"));
        assert!(screen.contains("Science & Nature"));
        assert!(screen.contains("Medium"));
        assert!(screen.contains("Start Quiz"));
    }

    #[test]
    fn test_loading_and_error_screens() {
        let mut session = QuizSession::new(QuizConfig::default(), None);
        let ctx = AppContext::default();

        session.phase = QuizPhase::Loading;
        let screen = render(80, 24, |f| draw_quiz(f, &session, &ctx));
        assert!(screen.contains("Loading questions..."));

        session.phase = QuizPhase::Error(FETCH_ERROR_MESSAGE.to_string());
        let screen = render(80, 24, |f| draw_quiz(f, &session, &ctx));
        assert!(screen.contains("Failed to load questions. Please try again."));
        assert!(screen.contains("Try Again"));
    }

    #[test]
    fn test_question_screen_shows_progress_and_timer() {
        let now = Instant::now();
        let session = active_session(now);
        let ctx = AppContext::default();
        let screen = render(100, 30, |f| draw_quiz(f, &session, &ctx));

        assert!(screen.contains("Question 1 of 3"));
        assert!(screen.contains("Time: 30s"));
        assert!(screen.contains("Score: 0"));
        assert!(screen.contains("Question 0?"));
        assert!(screen.contains("right 0"));
        assert!(screen.contains("wrong 0a"));
    }

    #[test]
    fn test_answer_lock_title_reflects_outcome() {
        let now = Instant::now();
        let mut session = active_session(now);
        let correct = session.correct_index().unwrap();
        session.select_answer(correct, now);
        let ctx = AppContext::default();

        let screen = render(100, 30, |f| draw_quiz(f, &session, &ctx));
        assert!(screen.contains("Correct!"));
        assert!(screen.contains("Score: 10"));
    }

    #[test]
    fn test_summary_screen() {
        let now = Instant::now();
        let mut session = active_session(now);
        session.tick(now + std::time::Duration::from_secs(200));
        assert_eq!(session.phase, QuizPhase::Summary);
        let ctx = AppContext::default();

        let screen = render(80, 24, |f| draw_quiz(f, &session, &ctx));
        assert!(screen.contains("Quiz Complete!"));
        assert!(screen.contains("Correct Answers: 0 out of 3"));
        assert!(screen.contains("Trophies: 0"));
        assert!(screen.contains("Play Again"));
    }

    #[test]
    fn test_quit_confirmation_overlays_quiz() {
        let now = Instant::now();
        let session = active_session(now);
        let ctx = AppContext::default();

        let screen = render(100, 30, |f| {
            draw_quiz(f, &session, &ctx);
            draw_quit_confirmation(f, &ctx.theme);
        });
        assert!(screen.contains("Exit Quiz?"));
        assert!(screen.contains("Exit"));
        assert!(screen.contains("Cancel"));
    }

    #[test]
    fn test_home_shows_stats_and_achievements() {
        let results = sample_results();
        let ctx = AppContext::default();
        let stats = Stats::from_results(&results);
        let achieved = achievements(&results);

        let screen = render(100, 30, |f| draw_home(f, &ctx, &stats, &achieved));
        assert!(screen.contains("Flash Quiz"));
        assert!(screen.contains("Accounts are disabled"));
        assert!(screen.contains("85"));
        assert!(screen.contains("Highest Score"));
        assert!(screen.contains("100"));
        assert!(screen.contains("Daily Challenge"));
        assert!(screen.contains("[x] First Quiz"));
        assert!(screen.contains("[x] Perfect Score"));
        assert!(screen.contains("[x] Speed Demon"));
        assert!(screen.contains("[ ] Category Master"));
    }

    #[test]
    fn test_home_greets_signed_in_user() {
        let ctx = AppContext {
            accounts_enabled: true,
            user: Some(UserIdentity {
                uid: "u1".to_string(),
                email: "quiz@example.com".to_string(),
                username: Some("quizzer".to_string()),
                id_token: "t".to_string(),
            }),
            ..AppContext::default()
        };
        let screen = render(100, 30, |f| {
            draw_home(f, &ctx, &Stats::default(), &achievements(&[]))
        });
        assert!(screen.contains("Welcome back, quizzer!"));
        assert!(screen.contains("Sign Out"));
    }

    #[test]
    fn test_profile_lists_history_newest_first() {
        let results = sample_results();
        let ctx = AppContext::default();
        let today = Utc.with_ymd_and_hms(2024, 5, 3, 0, 0, 0).unwrap().date_naive();

        let screen = render(120, 30, |f| draw_profile(f, &ctx, &results, today));
        assert!(screen.contains("Quiz History"));
        let newest = screen.find("Score: 100%").unwrap();
        let oldest = screen.find("Score: 70%").unwrap();
        assert!(newest < oldest);
        assert!(screen.contains("7 correct out of 10"));
        assert!(screen.contains("Activity (last 30 days)"));
    }

    #[test]
    fn test_profile_without_history() {
        let ctx = AppContext::default();
        let today = Utc::now().date_naive();
        let screen = render(100, 30, |f| draw_profile(f, &ctx, &[], today));
        assert!(screen.contains("No quizzes yet"));
    }

    #[test]
    fn test_leaderboard_and_personal_performance() {
        let results = sample_results();
        let ctx = AppContext::default();

        let screen = render(100, 30, |f| draw_leaderboard(f, &ctx, &results));
        assert!(screen.contains("John Doe"));
        assert!(screen.contains("Anna Lee"));
        assert!(screen.contains("Your Performance"));
        assert!(screen.contains("Average Score: 85"));
        assert!(screen.contains("Total Quizzes: 2"));
        assert!(screen.contains("Best Category: Sports"));
    }

    #[test]
    fn test_auth_form_masks_password_and_shows_error() {
        let mut form = AuthForm::new(AuthMode::Signup);
        form.username = "quizzer".to_string();
        form.email = "quiz@example.com".to_string();
        form.password = "hunter2".to_string();
        form.error = Some("EMAIL_EXISTS".to_string());
        let ctx = AppContext {
            accounts_enabled: true,
            ..AppContext::default()
        };

        let screen = render(100, 30, |f| draw_auth(f, &form, &ctx));
        assert!(screen.contains("Sign Up"));
        assert!(screen.contains("quiz@example.com"));
        assert!(!screen.contains("hunter2"));
        assert!(screen.contains("•••••••"));
        assert!(screen.contains("EMAIL_EXISTS"));
    }
}
