//! Enrollment Repository

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::Enrollment;
use crate::settlement::EnrollmentStore;
use crate::utils::AppResult;
use async_trait::async_trait;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "enrollment";

#[derive(Clone)]
pub struct EnrollmentRepository {
    base: BaseRepository,
}

impl EnrollmentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find an enrollment by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Enrollment>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let enrollment: Option<Enrollment> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(enrollment)
    }

    /// Find the enrollment for a (student, course) pair
    pub async fn find_by_student_course(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> RepoResult<Option<Enrollment>> {
        let student_owned = student_id.to_string();
        let course_owned = course_id.to_string();
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM enrollment \
                 WHERE student_id = $student AND course_id = $course LIMIT 1",
            )
            .bind(("student", student_owned))
            .bind(("course", course_owned))
            .await?;
        let enrollments: Vec<Enrollment> = result.take(0)?;
        Ok(enrollments.into_iter().next())
    }

    /// Find all enrollments for a student
    pub async fn find_by_student(&self, student_id: &str) -> RepoResult<Vec<Enrollment>> {
        let student_owned = student_id.to_string();
        let enrollments: Vec<Enrollment> = self
            .base
            .db()
            .query("SELECT * FROM enrollment WHERE student_id = $student ORDER BY enrolled_at DESC")
            .bind(("student", student_owned))
            .await?
            .take(0)?;
        Ok(enrollments)
    }

    /// Create an enrollment; the unique (student_id, course_id) index
    /// rejects duplicates
    pub async fn create(&self, enrollment: Enrollment) -> RepoResult<Enrollment> {
        let created: Option<Enrollment> =
            self.base.db().create(TABLE).content(enrollment).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create enrollment".to_string()))
    }

    /// Persist progress/certificate changes to an existing enrollment
    pub async fn save(&self, enrollment: &Enrollment) -> RepoResult<Enrollment> {
        let id = enrollment
            .id
            .as_ref()
            .ok_or_else(|| RepoError::Validation("Enrollment has no id".to_string()))?;
        let thing = make_thing(TABLE, &id.to_string());
        let data = enrollment.clone();
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing CONTENT $data RETURN AFTER")
            .bind(("thing", thing))
            .bind(("data", data))
            .await?;
        let updated: Vec<Enrollment> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound("Enrollment not found".to_string()))
    }
}

#[async_trait]
impl EnrollmentStore for EnrollmentRepository {
    async fn find_by_student_course(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> AppResult<Option<Enrollment>> {
        Ok(EnrollmentRepository::find_by_student_course(self, student_id, course_id).await?)
    }

    async fn create(&self, enrollment: Enrollment) -> AppResult<Enrollment> {
        Ok(EnrollmentRepository::create(self, enrollment).await?)
    }
}
