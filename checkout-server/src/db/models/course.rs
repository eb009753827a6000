//! Course Model

use super::serde_thing;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

/// An explicit completion requirement declared by a course
///
/// When a course declares requirements, all of them must hold before a
/// certificate can be issued. Courses without explicit requirements fall
/// back to the default rule (at least 80% of sections completed).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompletionRequirement {
    /// Every section must be completed
    CompleteAllSections,
    /// Every quiz must be passed with at least `min_score`
    PassAllQuizzes { min_score: f64 },
    /// Every scheduled class must be attended
    AttendAllClasses,
}

/// Course entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<Thing>,
    pub title: String,
    pub price: f64,
    /// Number of confirmed enrollments; adjusted atomically at settlement
    #[serde(default)]
    pub enrolled_students: i64,
    #[serde(default)]
    pub total_sections: i64,
    #[serde(default)]
    pub total_quizzes: i64,
    #[serde(default)]
    pub total_classes: i64,
    /// Explicit completion requirements; empty = default 80% rule
    #[serde(default)]
    pub completion_requirements: Vec<CompletionRequirement>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}
