//! Certificate issuance rules

use crate::db::models::{Certificate, CompletionRequirement, Course, Enrollment};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::util::now_millis;
use uuid::Uuid;

/// Fraction of sections that must be complete when a course declares no
/// explicit requirements
const DEFAULT_SECTION_RATIO: f64 = 0.8;

/// Whether an enrollment satisfies its course's completion rule.
///
/// Courses with explicit requirements need all of them to hold; courses
/// without fall back to the default section ratio.
pub fn evaluate_completion(course: &Course, enrollment: &Enrollment) -> bool {
    let progress = &enrollment.progress;

    if course.completion_requirements.is_empty() {
        if course.total_sections == 0 {
            return false;
        }
        let completed = progress.completed_sections.len() as f64;
        return completed / course.total_sections as f64 >= DEFAULT_SECTION_RATIO;
    }

    course.completion_requirements.iter().all(|req| match req {
        CompletionRequirement::CompleteAllSections => {
            progress.completed_sections.len() as i64 >= course.total_sections
        }
        CompletionRequirement::PassAllQuizzes { min_score } => {
            progress.quiz_results.len() as i64 >= course.total_quizzes
                && progress.quiz_results.values().all(|&score| score >= *min_score)
        }
        CompletionRequirement::AttendAllClasses => {
            progress.attended_classes.len() as i64 >= course.total_classes
        }
    })
}

/// Issue a certificate for a completed enrollment.
///
/// Fails when one has already been issued or the completion rule is not
/// yet satisfied. The caller persists the updated enrollment.
pub fn issue_certificate(course: &Course, enrollment: &mut Enrollment) -> AppResult<Certificate> {
    if enrollment.certificate.is_some() {
        return Err(AppError::new(ErrorCode::CertificateAlreadyIssued));
    }
    if !evaluate_completion(course, enrollment) {
        return Err(AppError::new(ErrorCode::RequirementsNotMet));
    }

    let certificate = Certificate {
        issued_at: now_millis(),
        serial: Uuid::new_v4().to_string(),
    };
    enrollment.certificate = Some(certificate.clone());

    tracing::info!(
        student_id = %enrollment.student_id,
        course_id = %enrollment.course_id,
        serial = %certificate.serial,
        "Certificate issued"
    );
    Ok(certificate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{EnrollmentStatus, Progress};

    fn course(total_sections: i64) -> Course {
        Course {
            id: None,
            title: "Rust 101".to_string(),
            price: 49.0,
            enrolled_students: 0,
            total_sections,
            total_quizzes: 0,
            total_classes: 0,
            completion_requirements: vec![],
            is_active: true,
        }
    }

    fn enrollment() -> Enrollment {
        Enrollment {
            id: None,
            student_id: "user:alice".to_string(),
            course_id: "course:rust101".to_string(),
            status: EnrollmentStatus::Active,
            progress: Progress::default(),
            certificate: None,
            payment: None,
            enrolled_at: 0,
        }
    }

    #[test]
    fn default_rule_requires_80_percent_of_sections() {
        let course = course(10);
        let mut e = enrollment();
        for i in 0..7 {
            e.progress.record_section(&format!("s{i}"));
        }
        assert!(!evaluate_completion(&course, &e));

        e.progress.record_section("s7");
        assert!(evaluate_completion(&course, &e));
    }

    #[test]
    fn default_rule_never_satisfied_with_zero_sections() {
        let course = course(0);
        let e = enrollment();
        assert!(!evaluate_completion(&course, &e));
    }

    #[test]
    fn explicit_requirements_all_must_hold() {
        let mut course = course(2);
        course.total_quizzes = 1;
        course.completion_requirements = vec![
            CompletionRequirement::CompleteAllSections,
            CompletionRequirement::PassAllQuizzes { min_score: 60.0 },
        ];

        let mut e = enrollment();
        e.progress.record_section("s0");
        e.progress.record_section("s1");
        assert!(!evaluate_completion(&course, &e));

        e.progress.record_quiz("q0", 55.0);
        assert!(!evaluate_completion(&course, &e));

        e.progress.record_quiz("q0", 75.0);
        assert!(evaluate_completion(&course, &e));
    }

    #[test]
    fn attendance_requirement() {
        let mut course = course(0);
        course.total_classes = 2;
        course.completion_requirements = vec![CompletionRequirement::AttendAllClasses];

        let mut e = enrollment();
        e.progress.record_class("c0");
        assert!(!evaluate_completion(&course, &e));
        e.progress.record_class("c1");
        assert!(evaluate_completion(&course, &e));
    }

    #[test]
    fn certificate_issued_once() {
        let course = course(1);
        let mut e = enrollment();
        e.progress.record_section("s0");

        let first = issue_certificate(&course, &mut e).unwrap();
        assert!(!first.serial.is_empty());

        let second = issue_certificate(&course, &mut e);
        assert_eq!(
            second.unwrap_err().code,
            ErrorCode::CertificateAlreadyIssued
        );
    }

    #[test]
    fn certificate_requires_completion() {
        let course = course(10);
        let mut e = enrollment();
        let err = issue_certificate(&course, &mut e).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequirementsNotMet);
        assert!(e.certificate.is_none());
    }
}
