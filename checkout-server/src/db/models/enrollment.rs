//! Enrollment Model

use super::serde_thing;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use surrealdb::sql::Thing;

/// Enrollment status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    Active,
    Completed,
}

/// Progress tracked for one enrollment
///
/// All collections are idempotent sets: recording the same section, video,
/// assignment or class twice leaves the progress unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Progress {
    #[serde(default)]
    pub completed_sections: Vec<String>,
    #[serde(default)]
    pub completed_videos: Vec<String>,
    #[serde(default)]
    pub completed_assignments: Vec<String>,
    /// quiz id -> best score achieved
    #[serde(default)]
    pub quiz_results: HashMap<String, f64>,
    #[serde(default)]
    pub attended_classes: Vec<String>,
}

/// Certificate issued when a course's completion rule is satisfied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certificate {
    /// Issue timestamp (milliseconds since epoch)
    pub issued_at: i64,
    pub serial: String,
}

/// Payment details captured at settlement time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSnapshot {
    pub order_id: String,
    pub amount_paid: f64,
    /// Settlement timestamp (milliseconds since epoch)
    pub paid_at: i64,
}

/// Enrollment entity, unique per (student_id, course_id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<Thing>,
    pub student_id: String,
    pub course_id: String,
    pub status: EnrollmentStatus,
    #[serde(default)]
    pub progress: Progress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<Certificate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentSnapshot>,
    /// Enrollment timestamp (milliseconds since epoch)
    pub enrolled_at: i64,
}
