use crate::theme::Theme;
use chrono::{DateTime, Utc};
use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

pub const POINTS_PER_CORRECT: u32 = 10;
pub const POINTS_PER_TROPHY: u32 = 50;
pub const DEFAULT_QUESTION_COUNT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Hard,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Easy,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: u32,
    pub name: &'static str,
}

pub const CATEGORIES: [Category; 5] = [
    Category {
        id: 9,
        name: "General Knowledge",
    },
    Category {
        id: 17,
        name: "Science & Nature",
    },
    Category {
        id: 21,
        name: "Sports",
    },
    Category {
        id: 23,
        name: "History",
    },
    Category {
        id: 27,
        name: "Animals",
    },
];

impl Category {
    pub fn by_id(id: u32) -> Option<Category> {
        CATEGORIES.iter().copied().find(|c| c.id == id)
    }
}

/// One multiple-choice question with entities already decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct TriviaQuestion {
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
    pub category: String,
    pub difficulty: Difficulty,
}

impl TriviaQuestion {
    pub fn all_answers(&self) -> Vec<String> {
        let mut answers = self.incorrect_answers.clone();
        answers.push(self.correct_answer.clone());
        answers
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizConfig {
    pub amount: u32,
    pub category: Category,
    pub difficulty: Difficulty,
    pub time_limit_secs: u32,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            amount: DEFAULT_QUESTION_COUNT,
            category: CATEGORIES[0],
            difficulty: Difficulty::Medium,
            time_limit_secs: crate::config::DEFAULT_TIME_LIMIT_SECS,
        }
    }
}

impl QuizConfig {
    pub fn daily_challenge() -> Self {
        Self {
            amount: 5,
            category: CATEGORIES[0],
            difficulty: Difficulty::Medium,
            time_limit_secs: 15,
        }
    }
}

/// Persisted outcome of one completed session. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub score: u32,
    pub total_questions: u32,
    pub correct_answers: u32,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub trophies: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u64>,
}

impl QuizResult {
    pub fn new(
        score: u32,
        total_questions: u32,
        category: &str,
        difficulty: Difficulty,
        date: DateTime<Utc>,
        duration_secs: Option<u64>,
    ) -> Self {
        let points = score;
        Self {
            score,
            total_questions,
            correct_answers: score / POINTS_PER_CORRECT,
            category: category.to_string(),
            difficulty: Some(difficulty),
            date,
            points,
            trophies: points / POINTS_PER_TROPHY,
            duration_secs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub uid: String,
    pub email: String,
    pub username: Option<String>,
    pub id_token: String,
}

impl UserIdentity {
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.email)
    }
}

/// Ambient state handed to every screen.
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    pub theme: Theme,
    pub user: Option<UserIdentity>,
    pub accounts_enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuizPhase {
    Configuring,
    Loading,
    Error(String),
    Active,
    AnswerLock,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerStatus {
    Correct,
    Incorrect,
}

#[derive(Debug)]
pub struct QuizSession {
    pub config: QuizConfig,
    pub phase: QuizPhase,
    pub questions: Vec<TriviaQuestion>,
    pub current_index: usize,
    pub score: u32,
    pub time_left: u32,
    pub shuffled_answers: Vec<String>,
    pub highlighted: usize,
    pub answer_status: Option<AnswerStatus>,
    /// Index into `shuffled_answers`; `None` after a timeout.
    pub selected_answer: Option<usize>,
    pub next_tick_at: Option<Instant>,
    pub lock_until: Option<Instant>,
    pub started_at: Option<Instant>,
    pub finished_at: Option<Instant>,
    pub request_id: u64,
    pub result_recorded: bool,
    pub net_tx: Option<Sender<NetRequest>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NetRequest {
    FetchQuestions {
        request_id: u64,
        amount: u32,
        category_id: u32,
        difficulty: Difficulty,
    },
    SignUp {
        email: String,
        password: String,
        username: String,
    },
    SignIn {
        email: String,
        password: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum NetResponse {
    Questions {
        request_id: u64,
        questions: Vec<TriviaQuestion>,
    },
    FetchFailed {
        request_id: u64,
        error: String,
    },
    SignedIn(UserIdentity),
    AuthFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Username,
    Email,
    Password,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub username: String,
    pub email: String,
    pub password: String,
    pub focused: AuthField,
    pub error: Option<String>,
    pub in_progress: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Home,
    Quiz,
    QuizQuitConfirm,
    Profile,
    Leaderboard,
    Auth,
}
