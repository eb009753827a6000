//! Course Repository

use super::{BaseRepository, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::Course;
use crate::settlement::CourseStore;
use crate::utils::AppResult;
use async_trait::async_trait;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "course";

#[derive(Clone)]
pub struct CourseRepository {
    base: BaseRepository,
}

impl CourseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a course by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Course>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let course: Option<Course> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(course)
    }

    /// Atomically bump the enrolled-students counter
    pub async fn increment_enrollment_atomic(&self, id: &str) -> RepoResult<()> {
        let thing = make_thing(TABLE, id);
        self.base
            .db()
            .query("UPDATE $thing SET enrolled_students += 1")
            .bind(("thing", thing))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl CourseStore for CourseRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Course>> {
        Ok(CourseRepository::find_by_id(self, id).await?)
    }

    async fn increment_enrollment(&self, course_id: &str) -> AppResult<()> {
        Ok(self.increment_enrollment_atomic(course_id).await?)
    }
}
