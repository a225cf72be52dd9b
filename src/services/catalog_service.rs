//! Catalog service - Degree, course, and test lookups and management.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Course, Degree, DegreeChanges, NewDegree, Test, TestSummary};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// A test found in the catalog, with where it lives.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TestLookup {
    pub degree_id: Uuid,
    pub course_id: Uuid,
    pub lesson_title: String,
    pub test: Test,
}

/// Catalog service trait for dependency injection.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Create a new degree
    async fn create_degree(&self, degree: NewDegree) -> AppResult<Degree>;

    /// List all degrees
    async fn list_degrees(&self) -> AppResult<Vec<Degree>>;

    /// Get degree by ID
    async fn get_degree(&self, id: Uuid) -> AppResult<Degree>;

    /// Update degree fields
    async fn update_degree(&self, id: Uuid, changes: DegreeChanges) -> AppResult<Degree>;

    /// Delete degree by ID
    async fn delete_degree(&self, id: Uuid) -> AppResult<()>;

    /// List the courses of a degree
    async fn list_courses(&self, degree_id: Uuid) -> AppResult<Vec<Course>>;

    /// Get a course by id within a degree
    async fn get_course(&self, degree_id: Uuid, course_id: Uuid) -> AppResult<Course>;

    /// Find a test by id anywhere in the catalog
    async fn find_test(&self, test_id: Uuid) -> AppResult<TestLookup>;

    /// List every test in the catalog with its location
    async fn list_tests(&self) -> AppResult<Vec<TestSummary>>;
}

/// Concrete implementation of CatalogService using Unit of Work.
pub struct Catalog<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Catalog<U> {
    /// Create new catalog service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CatalogService for Catalog<U> {
    async fn create_degree(&self, degree: NewDegree) -> AppResult<Degree> {
        let degree = self.uow.degrees().create(degree).await?;
        tracing::info!(degree_id = %degree.id, "degree created");
        Ok(degree)
    }

    async fn list_degrees(&self) -> AppResult<Vec<Degree>> {
        self.uow.degrees().list().await
    }

    async fn get_degree(&self, id: Uuid) -> AppResult<Degree> {
        self.uow.degrees().find_by_id(id).await?.ok_or_not_found()
    }

    async fn update_degree(&self, id: Uuid, changes: DegreeChanges) -> AppResult<Degree> {
        self.uow.degrees().update(id, changes).await
    }

    async fn delete_degree(&self, id: Uuid) -> AppResult<()> {
        self.uow.degrees().delete(id).await
    }

    async fn list_courses(&self, degree_id: Uuid) -> AppResult<Vec<Course>> {
        Ok(self.get_degree(degree_id).await?.courses)
    }

    async fn get_course(&self, degree_id: Uuid, course_id: Uuid) -> AppResult<Course> {
        let degree = self.get_degree(degree_id).await?;
        degree.course(course_id).cloned().ok_or_not_found()
    }

    async fn find_test(&self, test_id: Uuid) -> AppResult<TestLookup> {
        // The catalog is small enough to scan every degree's course tree
        let degrees = self.uow.degrees().list().await?;

        degrees
            .iter()
            .find_map(|degree| {
                degree.find_test(test_id).map(|(course, lesson, test)| TestLookup {
                    degree_id: degree.id,
                    course_id: course.course_id,
                    lesson_title: lesson.title.clone(),
                    test: test.clone(),
                })
            })
            .ok_or_not_found()
    }

    async fn list_tests(&self) -> AppResult<Vec<TestSummary>> {
        let degrees = self.uow.degrees().list().await?;

        let mut tests = Vec::new();
        for degree in &degrees {
            for course in &degree.courses {
                for lesson in &course.lessons {
                    if let Some(test) = &lesson.test {
                        tests.push(TestSummary {
                            test_id: test.test_id,
                            title: test.title.clone(),
                            question_count: test.questions.len(),
                            time_limit_secs: test.time_limit_secs,
                            degree_id: degree.id,
                            degree_title: degree.title.clone(),
                            course_id: course.course_id,
                            course_title: course.title.clone(),
                            lesson_title: lesson.title.clone(),
                        });
                    }
                }
            }
        }

        Ok(tests)
    }
}
