//! Summary metrics derived from the stored result history.

use crate::models::{CATEGORIES, Difficulty, QuizResult};
use chrono::{Duration, NaiveDate};
use std::collections::{BTreeMap, HashSet};

pub const HEATMAP_DAYS: i64 = 30;
const SPEED_DEMON_SECS: u64 = 120;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stats {
    pub total_quizzes: usize,
    pub average_score: u32,
    pub highest_score: u32,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub total_points: u32,
    pub total_trophies: u32,
    pub category_counts: BTreeMap<String, usize>,
    pub difficulty_counts: BTreeMap<Difficulty, usize>,
    pub activity: BTreeMap<NaiveDate, usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapDay {
    pub date: NaiveDate,
    pub count: usize,
    /// 0..=100, 20 per quiz played that day.
    pub intensity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementKind {
    FirstQuiz,
    PerfectScore,
    SpeedDemon,
    CategoryMaster,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Achievement {
    pub kind: AchievementKind,
    pub name: &'static str,
    pub description: &'static str,
    pub completed: bool,
}

impl Stats {
    pub fn from_results(results: &[QuizResult]) -> Self {
        if results.is_empty() {
            return Self::default();
        }

        let total_quizzes = results.len();
        let total_score: u64 = results.iter().map(|r| r.score as u64).sum();
        let mut stats = Self {
            total_quizzes,
            average_score: (total_score as f64 / total_quizzes as f64).round() as u32,
            highest_score: results.iter().map(|r| r.score).max().unwrap_or(0),
            total_questions: results.iter().map(|r| r.total_questions).sum(),
            correct_answers: results.iter().map(|r| r.correct_answers).sum(),
            total_points: results.iter().map(|r| r.points).sum(),
            total_trophies: results.iter().map(|r| r.trophies).sum(),
            ..Self::default()
        };

        for result in results {
            if !result.category.is_empty() {
                *stats
                    .category_counts
                    .entry(result.category.clone())
                    .or_insert(0) += 1;
            }
            if let Some(difficulty) = result.difficulty {
                *stats.difficulty_counts.entry(difficulty).or_insert(0) += 1;
            }
            *stats.activity.entry(result.date.date_naive()).or_insert(0) += 1;
        }

        stats
    }

    /// Percentage of correct answers over all questions, 0 with no questions.
    pub fn accuracy(&self) -> u32 {
        if self.total_questions == 0 {
            return 0;
        }
        (self.correct_answers as f64 / self.total_questions as f64 * 100.0).round() as u32
    }

    /// The last `HEATMAP_DAYS` days ending at `today`, oldest first.
    pub fn heatmap(&self, today: NaiveDate) -> Vec<HeatmapDay> {
        (0..HEATMAP_DAYS)
            .rev()
            .map(|offset| {
                let date = today - Duration::days(offset);
                let count = self.activity.get(&date).copied().unwrap_or(0);
                HeatmapDay {
                    date,
                    count,
                    intensity: (count as u32).saturating_mul(20).min(100),
                }
            })
            .collect()
    }
}

/// Category of the first result holding the maximum score.
pub fn best_category(results: &[QuizResult]) -> String {
    let mut best: Option<&QuizResult> = None;
    for result in results {
        match best {
            Some(b) if result.score <= b.score => {}
            _ => best = Some(result),
        }
    }
    match best {
        Some(r) if !r.category.is_empty() => r.category.clone(),
        _ => "N/A".to_string(),
    }
}

pub fn achievements(results: &[QuizResult]) -> Vec<Achievement> {
    let played: HashSet<&str> = results.iter().map(|r| r.category.as_str()).collect();

    vec![
        Achievement {
            kind: AchievementKind::FirstQuiz,
            name: "First Quiz",
            description: "Complete your first quiz",
            completed: !results.is_empty(),
        },
        Achievement {
            kind: AchievementKind::PerfectScore,
            name: "Perfect Score",
            description: "Get 100% on any quiz",
            completed: results
                .iter()
                .any(|r| r.total_questions > 0 && r.correct_answers == r.total_questions),
        },
        Achievement {
            kind: AchievementKind::SpeedDemon,
            name: "Speed Demon",
            description: "Complete a quiz in under 2 minutes",
            completed: results
                .iter()
                .any(|r| r.duration_secs.is_some_and(|d| d < SPEED_DEMON_SECS)),
        },
        Achievement {
            kind: AchievementKind::CategoryMaster,
            name: "Category Master",
            description: "Complete quizzes in all categories",
            completed: CATEGORIES.iter().all(|c| played.contains(c.name)),
        },
    ]
}
