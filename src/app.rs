use crate::account::{remember_user, sign_out};
use crate::auth_form::handle_auth_input;
use crate::db::results::{append_result, load_results};
use crate::db::user::load_current_user;
use crate::logger;
use crate::models::{
    AppContext, AppState, AuthForm, AuthMode, NetRequest, NetResponse, QuizConfig, QuizPhase,
    QuizResult, QuizSession,
};
use crate::session::handle_quiz_input;
use crate::stats::{Stats, achievements};
use crate::ui::{
    draw_auth, draw_home, draw_leaderboard, draw_profile, draw_quit_confirmation, draw_quiz,
};
use chrono::Utc;
use crossbeam_channel::Sender;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use rusqlite::Connection;
use std::time::{Duration, Instant};

const IDLE_POLL: Duration = Duration::from_millis(250);

/// Everything the event loop owns between frames.
pub struct App {
    pub conn: Connection,
    pub ctx: AppContext,
    pub state: AppState,
    pub session: Option<QuizSession>,
    pub auth_form: AuthForm,
    pub results: Vec<QuizResult>,
    time_limit_secs: u32,
    net_tx: Option<Sender<NetRequest>>,
    should_quit: bool,
}

impl App {
    pub fn new(
        conn: Connection,
        mut ctx: AppContext,
        time_limit_secs: u32,
        net_tx: Option<Sender<NetRequest>>,
    ) -> Self {
        let results = load_results(&conn);
        if ctx.accounts_enabled {
            ctx.user = load_current_user(&conn);
        }
        logger::log(&format!("Loaded {} stored results", results.len()));

        Self {
            conn,
            ctx,
            state: AppState::Home,
            session: None,
            auth_form: AuthForm::new(AuthMode::Login),
            results,
            time_limit_secs,
            net_tx,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn open_quiz(&mut self, config: QuizConfig, start: bool) {
        let mut session = QuizSession::new(config, self.net_tx.clone());
        if start {
            session.start();
        }
        self.session = Some(session);
        self.state = AppState::Quiz;
    }

    fn new_quiz(&mut self) {
        let config = QuizConfig {
            time_limit_secs: self.time_limit_secs,
            ..QuizConfig::default()
        };
        self.open_quiz(config, false);
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.state {
            AppState::Home => match key.code {
                KeyCode::Enter | KeyCode::Char('q') => self.new_quiz(),
                KeyCode::Char('c') => self.open_quiz(QuizConfig::daily_challenge(), true),
                KeyCode::Char('p') => self.state = AppState::Profile,
                KeyCode::Char('l') => self.state = AppState::Leaderboard,
                KeyCode::Char('a') if self.ctx.accounts_enabled => {
                    if self.ctx.user.is_some() {
                        if let Err(e) = sign_out(&self.conn, &mut self.ctx) {
                            logger::log(&format!("Sign out failed: {}", e));
                        }
                    } else {
                        self.auth_form = AuthForm::new(AuthMode::Login);
                        self.state = AppState::Auth;
                    }
                }
                KeyCode::Esc => self.should_quit = true,
                _ => {}
            },
            AppState::Quiz => {
                self.record_result();
                if let Some(session) = &mut self.session {
                    handle_quiz_input(session, key, &mut self.state, now);
                }
                if matches!(self.state, AppState::Home | AppState::Profile) {
                    self.session = None;
                }
            }
            AppState::QuizQuitConfirm => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    logger::log("Quiz abandoned");
                    self.session = None;
                    self.state = AppState::Home;
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.state = AppState::Quiz;
                    self.record_result();
                }
                _ => {}
            },
            AppState::Profile => match key.code {
                KeyCode::Char('q') => self.new_quiz(),
                KeyCode::Esc | KeyCode::Char('m') => self.state = AppState::Home,
                _ => {}
            },
            AppState::Leaderboard => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('m')) {
                    self.state = AppState::Home;
                }
            }
            AppState::Auth => {
                handle_auth_input(
                    &mut self.auth_form,
                    key,
                    &mut self.state,
                    self.net_tx.as_ref(),
                );
            }
        }
    }

    pub fn handle_net_response(&mut self, response: NetResponse, now: Instant) {
        match response {
            NetResponse::Questions { .. } | NetResponse::FetchFailed { .. } => {
                let applied = match &mut self.session {
                    Some(session) => session.apply_response(response, now),
                    None => false,
                };
                if !applied {
                    logger::log("Ignored a stale fetch response");
                }
            }
            NetResponse::SignedIn(_) | NetResponse::AuthFailed(_)
                if !self.auth_form.in_progress =>
            {
                logger::log("Ignored an auth response for an abandoned form");
            }
            NetResponse::SignedIn(user) => {
                let mode = self.auth_form.mode;
                self.auth_form.succeed(&user);
                remember_user(&self.conn, &mut self.ctx, user);
                if self.state == AppState::Auth {
                    self.state = match mode {
                        AuthMode::Login => AppState::Profile,
                        AuthMode::Signup => AppState::Home,
                    };
                }
            }
            NetResponse::AuthFailed(message) => self.auth_form.fail(message),
        }
    }

    /// Advances timers; the countdown keeps running behind the quit dialog.
    /// A session that finishes behind the dialog closes it and shows the summary.
    pub fn tick(&mut self, now: Instant) {
        let Some(session) = &mut self.session else {
            return;
        };
        session.tick(now);
        if session.phase == QuizPhase::Summary && self.state == AppState::QuizQuitConfirm {
            self.state = AppState::Quiz;
        }
        self.record_result();
    }

    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match &self.session {
            Some(session) => session.poll_timeout(now),
            None => IDLE_POLL,
        }
    }

    /// Persists the record of a completed session, whatever screen is showing.
    fn record_result(&mut self) {
        let Some(result) = self
            .session
            .as_mut()
            .and_then(|session| session.take_result(Utc::now()))
        else {
            return;
        };

        if let Err(e) = append_result(&self.conn, &result) {
            logger::log(&format!("Failed to save quiz result: {}", e));
        }
        logger::log(&format!(
            "Recorded result: {} points in {}",
            result.points, result.category
        ));
        self.results.push(result);
    }

    pub fn draw(&self, f: &mut Frame) {
        match self.state {
            AppState::Home => {
                let stats = Stats::from_results(&self.results);
                draw_home(f, &self.ctx, &stats, &achievements(&self.results));
            }
            AppState::Quiz => {
                if let Some(session) = &self.session {
                    draw_quiz(f, session, &self.ctx);
                }
            }
            AppState::QuizQuitConfirm => {
                if let Some(session) = &self.session {
                    draw_quiz(f, session, &self.ctx);
                }
                draw_quit_confirmation(f, &self.ctx.theme);
            }
            AppState::Profile => {
                draw_profile(f, &self.ctx, &self.results, Utc::now().date_naive());
            }
            AppState::Leaderboard => draw_leaderboard(f, &self.ctx, &self.results),
            AppState::Auth => draw_auth(f, &self.auth_form, &self.ctx),
        }
    }
}
