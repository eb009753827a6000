//! Enrollment API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{Certificate, Enrollment};
use crate::db::repository::{CourseRepository, EnrollmentRepository};
use crate::enrollment;
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Deserialize)]
pub struct StudentQuery {
    pub student_id: String,
}

/// GET /api/enrollments?student_id=... - a student's enrollments
pub async fn list_for_student(
    State(state): State<ServerState>,
    Query(query): Query<StudentQuery>,
) -> AppResult<Json<Vec<Enrollment>>> {
    let repo = EnrollmentRepository::new(state.db.clone());
    let enrollments = repo.find_by_student(&query.student_id).await?;
    Ok(Json(enrollments))
}

/// GET /api/enrollments/:id - a single enrollment
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Enrollment>> {
    let repo = EnrollmentRepository::new(state.db.clone());
    let enrollment = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EnrollmentNotFound))?;
    Ok(Json(enrollment))
}

/// A single progress event
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgressEvent {
    Section { id: String },
    Video { id: String },
    Assignment { id: String },
    Quiz { id: String, score: f64 },
    Class { id: String },
}

/// POST /api/enrollments/:id/progress - record a progress event
///
/// Idempotent: replaying the same event leaves the enrollment unchanged.
pub async fn record_progress(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(event): Json<ProgressEvent>,
) -> AppResult<Json<Enrollment>> {
    let repo = EnrollmentRepository::new(state.db.clone());
    let mut enrollment = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EnrollmentNotFound))?;

    let changed = match &event {
        ProgressEvent::Section { id } => enrollment.progress.record_section(id),
        ProgressEvent::Video { id } => enrollment.progress.record_video(id),
        ProgressEvent::Assignment { id } => enrollment.progress.record_assignment(id),
        ProgressEvent::Quiz { id, score } => enrollment.progress.record_quiz(id, *score),
        ProgressEvent::Class { id } => enrollment.progress.record_class(id),
    };

    if changed {
        enrollment = repo.save(&enrollment).await?;
    }
    Ok(Json(enrollment))
}

/// POST /api/enrollments/:id/certificate - issue the certificate
pub async fn issue_certificate(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Certificate>> {
    let enrollments = EnrollmentRepository::new(state.db.clone());
    let mut enrollment = enrollments
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EnrollmentNotFound))?;

    let courses = CourseRepository::new(state.db.clone());
    let course = courses
        .find_by_id(&enrollment.course_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CourseNotFound))?;

    let certificate = enrollment::issue_certificate(&course, &mut enrollment)?;
    enrollments.save(&enrollment).await?;
    Ok(Json(certificate))
}
