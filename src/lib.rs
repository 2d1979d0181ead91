pub mod account;
pub mod app;
pub mod auth_form;
pub mod config;
pub mod db;
pub mod error;
pub mod logger;
pub mod models;
pub mod net_worker;
pub mod session;
pub mod stats;
pub mod theme;
pub mod trivia;
pub mod ui;
pub mod utils;

#[cfg(test)]
mod ui_tests;

// Re-exports for convenience
pub use account::{AccountBackend, FirebaseClient};
pub use app::App;
pub use auth_form::handle_auth_input;
pub use config::Config;
pub use error::{QuizError, Result};
pub use models::{AppContext, AppState, QuizConfig, QuizResult, QuizSession};
pub use net_worker::spawn_net_worker;
pub use session::handle_quiz_input;
pub use stats::Stats;
pub use trivia::{OpenTdbClient, TriviaSource};
