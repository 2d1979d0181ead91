use crate::error::{QuizError, Result};
use std::path::PathBuf;

pub const DEFAULT_TRIVIA_URL: &str = "https://opentdb.com";
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub trivia_url: String,
    pub firebase_api_key: Option<String>,
    pub firebase_project_id: Option<String>,
    pub time_limit_secs: u32,
}

fn default_data_dir() -> PathBuf {
    if cfg!(target_os = "windows") {
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| "C:\\Users\\User".to_string());
        PathBuf::from(home).join(".local\\share\\flash-quiz")
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/home/user".to_string());
        PathBuf::from(home).join(".local/share/flash-quiz")
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let time_limit_secs = match get("FLASH_QUIZ_TIME_LIMIT") {
            Some(raw) => {
                let secs: u32 = raw.trim().parse().map_err(|_| {
                    QuizError::Config(format!("FLASH_QUIZ_TIME_LIMIT is not a number: {}", raw))
                })?;
                if secs == 0 {
                    return Err(QuizError::Config(
                        "FLASH_QUIZ_TIME_LIMIT must be at least 1".to_string(),
                    ));
                }
                secs
            }
            None => DEFAULT_TIME_LIMIT_SECS,
        };

        Ok(Self {
            data_dir: get("FLASH_QUIZ_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_data_dir),
            trivia_url: get("FLASH_QUIZ_TRIVIA_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_TRIVIA_URL.to_string()),
            firebase_api_key: get("FLASH_QUIZ_FIREBASE_API_KEY"),
            firebase_project_id: get("FLASH_QUIZ_FIREBASE_PROJECT_ID"),
            time_limit_secs,
        })
    }

    pub fn accounts_enabled(&self) -> bool {
        self.firebase_api_key.is_some()
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("flash-quiz.db")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("flash-quiz.log")
    }
}
