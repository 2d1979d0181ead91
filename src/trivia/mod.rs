pub mod client;

pub use client::{OpenTdbClient, TriviaSource, build_questions_url, parse_questions};
