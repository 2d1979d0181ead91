use crate::logger;
use crate::models::{
    AnswerStatus, AppState, CATEGORIES, NetRequest, NetResponse, POINTS_PER_CORRECT, QuizConfig,
    QuizPhase, QuizResult, QuizSession, TriviaQuestion,
};
use crate::net_worker::FETCH_ERROR_MESSAGE;
use chrono::{DateTime, Utc};
use crossbeam_channel::Sender;
use crossterm::event::{KeyCode, KeyEvent};
use rand::seq::SliceRandom;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

pub const ANSWER_LOCK: Duration = Duration::from_secs(1);
const TICK: Duration = Duration::from_secs(1);
const MAX_POLL: Duration = Duration::from_millis(250);

// Shared across sessions so a late response can never match a newer session.
static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

pub fn handle_quiz_input(
    session: &mut QuizSession,
    key: KeyEvent,
    app_state: &mut AppState,
    now: Instant,
) {
    match session.phase {
        QuizPhase::Configuring => match key.code {
            KeyCode::Esc => *app_state = AppState::Home,
            KeyCode::Left | KeyCode::Char('h') => {
                session.config.difficulty = session.config.difficulty.prev();
            }
            KeyCode::Right | KeyCode::Char('l') => {
                session.config.difficulty = session.config.difficulty.next();
            }
            KeyCode::Up | KeyCode::Char('k') => session.cycle_category(false),
            KeyCode::Down | KeyCode::Char('j') => session.cycle_category(true),
            KeyCode::Enter => session.start(),
            _ => {}
        },
        QuizPhase::Loading | QuizPhase::AnswerLock => {
            if key.code == KeyCode::Esc {
                *app_state = AppState::QuizQuitConfirm;
            }
        }
        QuizPhase::Error(_) => match key.code {
            KeyCode::Enter | KeyCode::Char('r') => session.retry(),
            KeyCode::Esc => session.restart(),
            _ => {}
        },
        QuizPhase::Active => match key.code {
            KeyCode::Esc => *app_state = AppState::QuizQuitConfirm,
            KeyCode::Up | KeyCode::Char('k') => {
                session.highlighted = session.highlighted.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if session.highlighted + 1 < session.shuffled_answers.len() {
                    session.highlighted += 1;
                }
            }
            KeyCode::Enter => session.select_answer(session.highlighted, now),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                session.select_answer(index, now);
            }
            _ => {}
        },
        QuizPhase::Summary => match key.code {
            KeyCode::Char('r') => session.restart(),
            KeyCode::Char('p') => *app_state = AppState::Profile,
            KeyCode::Char('m') | KeyCode::Esc => *app_state = AppState::Home,
            _ => {}
        },
    }
}

impl QuizSession {
    pub fn new(config: QuizConfig, net_tx: Option<Sender<NetRequest>>) -> Self {
        Self {
            time_left: config.time_limit_secs,
            config,
            phase: QuizPhase::Configuring,
            questions: Vec::new(),
            current_index: 0,
            score: 0,
            shuffled_answers: Vec::new(),
            highlighted: 0,
            answer_status: None,
            selected_answer: None,
            next_tick_at: None,
            lock_until: None,
            started_at: None,
            finished_at: None,
            request_id: 0,
            result_recorded: false,
            net_tx,
        }
    }

    pub fn current_question(&self) -> Option<&TriviaQuestion> {
        self.questions.get(self.current_index)
    }

    /// Position of the correct answer within `shuffled_answers`.
    pub fn correct_index(&self) -> Option<usize> {
        let question = self.current_question()?;
        self.shuffled_answers
            .iter()
            .position(|a| *a == question.correct_answer)
    }

    pub fn correct_answers(&self) -> u32 {
        self.score / POINTS_PER_CORRECT
    }

    pub fn progress_percent(&self) -> u16 {
        if self.questions.is_empty() {
            return 0;
        }
        (((self.current_index + 1) * 100) / self.questions.len()) as u16
    }

    fn cycle_category(&mut self, forward: bool) {
        let pos = CATEGORIES
            .iter()
            .position(|c| c.id == self.config.category.id)
            .unwrap_or(0);
        let next = if forward {
            (pos + 1).min(CATEGORIES.len() - 1)
        } else {
            pos.saturating_sub(1)
        };
        self.config.category = CATEGORIES[next];
    }

    /// Configuring -> Loading.
    pub fn start(&mut self) {
        if self.phase == QuizPhase::Configuring {
            self.request_questions();
        }
    }

    /// Error -> Loading.
    pub fn retry(&mut self) {
        if matches!(self.phase, QuizPhase::Error(_)) {
            self.request_questions();
        }
    }

    fn request_questions(&mut self) {
        self.request_id = NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed);
        self.phase = QuizPhase::Loading;
        self.next_tick_at = None;

        let request = NetRequest::FetchQuestions {
            request_id: self.request_id,
            amount: self.config.amount,
            category_id: self.config.category.id,
            difficulty: self.config.difficulty,
        };
        logger::log(&format!("Requesting questions: {:?}", request));

        let sent = self
            .net_tx
            .as_ref()
            .is_some_and(|tx| tx.send(request).is_ok());
        if !sent {
            logger::log("Network worker unavailable");
            self.phase = QuizPhase::Error(FETCH_ERROR_MESSAGE.to_string());
        }
    }

    /// Applies a fetch response. Returns false when the response is not
    /// for the in-flight request and was ignored.
    pub fn apply_response(&mut self, response: NetResponse, now: Instant) -> bool {
        if self.phase != QuizPhase::Loading {
            return false;
        }

        match response {
            NetResponse::Questions {
                request_id,
                questions,
            } if request_id == self.request_id => {
                if questions.is_empty() {
                    self.phase = QuizPhase::Error(FETCH_ERROR_MESSAGE.to_string());
                    return true;
                }
                logger::log(&format!("Loaded {} questions", questions.len()));
                self.questions = questions;
                self.current_index = 0;
                self.score = 0;
                self.result_recorded = false;
                self.finished_at = None;
                self.started_at = Some(now);
                self.begin_question(now);
                true
            }
            NetResponse::FetchFailed { request_id, error } if request_id == self.request_id => {
                logger::log(&format!("Question fetch failed: {}", error));
                self.phase = QuizPhase::Error(FETCH_ERROR_MESSAGE.to_string());
                true
            }
            _ => false,
        }
    }

    fn begin_question(&mut self, at: Instant) {
        let mut answers = self
            .current_question()
            .map(TriviaQuestion::all_answers)
            .unwrap_or_default();
        answers.shuffle(&mut rand::thread_rng());

        self.shuffled_answers = answers;
        self.highlighted = 0;
        self.answer_status = None;
        self.selected_answer = None;
        self.lock_until = None;
        self.time_left = self.config.time_limit_secs;
        self.next_tick_at = Some(at + TICK);
        self.phase = QuizPhase::Active;
    }

    pub fn select_answer(&mut self, index: usize, now: Instant) {
        if self.phase == QuizPhase::Active && index < self.shuffled_answers.len() {
            self.highlighted = index;
            self.submit(Some(index), now);
        }
    }

    /// Running out of time scores exactly like a wrong answer.
    pub fn time_out(&mut self, now: Instant) {
        self.submit(None, now);
    }

    fn submit(&mut self, choice: Option<usize>, at: Instant) {
        if self.phase != QuizPhase::Active {
            return;
        }

        let correct = choice.is_some() && choice == self.correct_index();
        if correct {
            self.score += POINTS_PER_CORRECT;
        }

        self.answer_status = Some(if correct {
            AnswerStatus::Correct
        } else {
            AnswerStatus::Incorrect
        });
        self.selected_answer = choice;
        self.next_tick_at = None;
        self.lock_until = Some(at + ANSWER_LOCK);
        self.phase = QuizPhase::AnswerLock;

        logger::log(&format!(
            "Question {} answered {} (score {})",
            self.current_index + 1,
            if correct { "correctly" } else { "incorrectly" },
            self.score
        ));
    }

    fn advance(&mut self, at: Instant) {
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            self.begin_question(at);
        } else {
            self.lock_until = None;
            self.next_tick_at = None;
            self.finished_at = Some(at);
            self.phase = QuizPhase::Summary;
            logger::log(&format!("Quiz complete with score {}", self.score));
        }
    }

    /// Drives the countdown and the answer lock up to `now`.
    pub fn tick(&mut self, now: Instant) {
        while self.step(now) {}
    }

    fn step(&mut self, now: Instant) -> bool {
        match self.phase {
            QuizPhase::Active => {
                let Some(mut next) = self.next_tick_at else {
                    return false;
                };
                while now >= next {
                    self.time_left = self.time_left.saturating_sub(1);
                    if self.time_left == 0 {
                        self.time_out(next);
                        return true;
                    }
                    next += TICK;
                }
                self.next_tick_at = Some(next);
                false
            }
            QuizPhase::AnswerLock => match self.lock_until {
                Some(until) if now >= until => {
                    self.advance(until);
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }

    /// The next instant at which `tick` has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.phase {
            QuizPhase::Active => self.next_tick_at,
            QuizPhase::AnswerLock => self.lock_until,
            _ => None,
        }
    }

    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now).min(MAX_POLL))
            .unwrap_or(MAX_POLL)
    }

    /// The record for a completed session. Yields `Some` at most once.
    pub fn take_result(&mut self, date: DateTime<Utc>) -> Option<QuizResult> {
        if self.phase != QuizPhase::Summary || self.result_recorded {
            return None;
        }
        self.result_recorded = true;

        let duration_secs = match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => Some(end.saturating_duration_since(start).as_secs()),
            _ => None,
        };

        Some(QuizResult::new(
            self.score,
            self.questions.len() as u32,
            self.config.category.name,
            self.config.difficulty,
            date,
            duration_secs,
        ))
    }

    /// Back to Configuring with the same settings and cleared progress.
    pub fn restart(&mut self) {
        let net_tx = self.net_tx.take();
        *self = Self::new(self.config, net_tx);
    }
}
