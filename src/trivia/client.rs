use crate::error::{QuizError, Result};
use crate::logger;
use crate::models::{Difficulty, TriviaQuestion};
use crate::utils::decode_html_entities;
use async_trait::async_trait;
use serde::Deserialize;

/// Anything that can hand out a batch of multiple-choice questions.
#[async_trait]
pub trait TriviaSource: Send + Sync {
    async fn fetch_questions(
        &self,
        amount: u32,
        category_id: u32,
        difficulty: Difficulty,
    ) -> Result<Vec<TriviaQuestion>>;
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    response_code: u32,
    #[serde(default)]
    results: Vec<ApiQuestion>,
}

#[derive(Debug, Deserialize)]
struct ApiQuestion {
    #[serde(default)]
    category: String,
    difficulty: Difficulty,
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

pub fn build_questions_url(
    base_url: &str,
    amount: u32,
    category_id: u32,
    difficulty: Difficulty,
) -> String {
    format!(
        "{}/api.php?amount={}&category={}&difficulty={}&type=multiple",
        base_url.trim_end_matches('/'),
        amount,
        category_id,
        difficulty.as_str()
    )
}

/// Parses an API body into decoded questions. An empty result set is an error.
pub fn parse_questions(body: &str) -> Result<Vec<TriviaQuestion>> {
    let response: ApiResponse = serde_json::from_str(body)?;

    if response.results.is_empty() {
        logger::log(&format!(
            "Trivia API returned no questions (response_code {})",
            response.response_code
        ));
        return Err(QuizError::NoQuestions);
    }

    Ok(response
        .results
        .into_iter()
        .map(|q| TriviaQuestion {
            question: decode_html_entities(&q.question),
            correct_answer: decode_html_entities(&q.correct_answer),
            incorrect_answers: q
                .incorrect_answers
                .iter()
                .map(|a| decode_html_entities(a))
                .collect(),
            category: decode_html_entities(&q.category),
            difficulty: q.difficulty,
        })
        .collect())
}

#[derive(Debug, Clone)]
pub struct OpenTdbClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenTdbClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }
}

#[async_trait]
impl TriviaSource for OpenTdbClient {
    async fn fetch_questions(
        &self,
        amount: u32,
        category_id: u32,
        difficulty: Difficulty,
    ) -> Result<Vec<TriviaQuestion>> {
        let url = build_questions_url(&self.base_url, amount, category_id, difficulty);
        logger::log(&format!("Fetching questions: {}", url));

        let body = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let questions = parse_questions(&body)?;
        logger::log(&format!("Fetched {} questions", questions.len()));
        Ok(questions)
    }
}
