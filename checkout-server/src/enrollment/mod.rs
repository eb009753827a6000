//! Enrollment Progress
//!
//! Idempotent progress recording and certificate issuance.

pub mod certificate;

pub use certificate::{evaluate_completion, issue_certificate};

use crate::db::models::Progress;

/// Insert into an idempotent set; returns whether anything changed
fn record_once(set: &mut Vec<String>, id: &str) -> bool {
    if set.iter().any(|s| s == id) {
        false
    } else {
        set.push(id.to_string());
        true
    }
}

impl Progress {
    /// Mark a section complete; repeated calls are no-ops
    pub fn record_section(&mut self, section_id: &str) -> bool {
        record_once(&mut self.completed_sections, section_id)
    }

    /// Mark a video watched; repeated calls are no-ops
    pub fn record_video(&mut self, video_id: &str) -> bool {
        record_once(&mut self.completed_videos, video_id)
    }

    /// Mark an assignment submitted; repeated calls are no-ops
    pub fn record_assignment(&mut self, assignment_id: &str) -> bool {
        record_once(&mut self.completed_assignments, assignment_id)
    }

    /// Record a quiz score, keeping the best attempt
    pub fn record_quiz(&mut self, quiz_id: &str, score: f64) -> bool {
        match self.quiz_results.get(quiz_id) {
            Some(&best) if best >= score => false,
            _ => {
                self.quiz_results.insert(quiz_id.to_string(), score);
                true
            }
        }
    }

    /// Mark a class attended; repeated calls are no-ops
    pub fn record_class(&mut self, class_id: &str) -> bool {
        record_once(&mut self.attended_classes, class_id)
    }
}

#[cfg(test)]
mod tests {
    use crate::db::models::Progress;

    #[test]
    fn section_recording_is_idempotent() {
        let mut progress = Progress::default();
        assert!(progress.record_section("s1"));
        assert!(!progress.record_section("s1"));
        assert_eq!(progress.completed_sections, vec!["s1"]);
    }

    #[test]
    fn quiz_keeps_best_score() {
        let mut progress = Progress::default();
        assert!(progress.record_quiz("q1", 70.0));
        assert!(progress.record_quiz("q1", 85.0));
        assert!(!progress.record_quiz("q1", 60.0));
        assert_eq!(progress.quiz_results["q1"], 85.0);
    }

    #[test]
    fn class_attendance_is_idempotent() {
        let mut progress = Progress::default();
        assert!(progress.record_class("c1"));
        assert!(!progress.record_class("c1"));
        assert_eq!(progress.attended_classes.len(), 1);
    }
}
