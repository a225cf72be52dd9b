//! Catalog service unit tests.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;
use uuid::Uuid;

use campus_api::domain::{Chapter, ChapterKind, Course, Degree, Lesson, Question, Test};
use campus_api::errors::AppError;
use campus_api::infra::{
    DegreeRepository, MockDegreeRepository, MockUserRepository, UnitOfWork, UserRepository,
};
use campus_api::services::{Catalog, CatalogService};

fn chapter(title: &str) -> Chapter {
    Chapter {
        title: title.to_string(),
        kind: ChapterKind::Video,
        link: "https://example.com/v/1".to_string(),
        duration_secs: 90,
    }
}

fn test_with_id(test_id: Uuid) -> Test {
    Test {
        test_id,
        title: "Checkpoint".to_string(),
        time_limit_secs: 300,
        questions: vec![Question {
            prompt: "2 + 2?".to_string(),
            options: vec!["3".to_string(), "4".to_string()],
            correct_answer: 1,
        }],
    }
}

fn degree_with_test(course_id: Uuid, test_id: Uuid) -> Degree {
    Degree {
        id: Uuid::new_v4(),
        title: "Bachelor of Theology".to_string(),
        description: None,
        courses: vec![Course {
            course_id,
            title: "Old Testament Survey".to_string(),
            description: None,
            image: None,
            video_url: None,
            lessons: vec![Lesson {
                title: "Introduction".to_string(),
                description: None,
                chapters: vec![chapter("Overview")],
                test: Some(test_with_id(test_id)),
            }],
        }],
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Test mock for UnitOfWork that wraps mock repositories
struct TestUnitOfWork {
    user_repo: Arc<MockUserRepository>,
    degree_repo: Arc<MockDegreeRepository>,
}

impl TestUnitOfWork {
    fn new(degree_repo: MockDegreeRepository) -> Self {
        Self {
            user_repo: Arc::new(MockUserRepository::new()),
            degree_repo: Arc::new(degree_repo),
        }
    }
}

impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn degrees(&self) -> Arc<dyn DegreeRepository> {
        self.degree_repo.clone()
    }
}

fn service_with(repo: MockDegreeRepository) -> Catalog<TestUnitOfWork> {
    Catalog::new(Arc::new(TestUnitOfWork::new(repo)))
}

#[tokio::test]
async fn test_find_test_locates_nested_test() {
    let course_id = Uuid::new_v4();
    let test_id = Uuid::new_v4();

    let mut repo = MockDegreeRepository::new();
    repo.expect_list()
        .returning(move || Ok(vec![degree_with_test(course_id, test_id)]));

    let service = service_with(repo);
    let lookup = service.find_test(test_id).await.unwrap();

    assert_eq!(lookup.course_id, course_id);
    assert_eq!(lookup.lesson_title, "Introduction");
    assert_eq!(lookup.test.test_id, test_id);
}

#[tokio::test]
async fn test_find_test_not_found() {
    let mut repo = MockDegreeRepository::new();
    repo.expect_list()
        .returning(|| Ok(vec![degree_with_test(Uuid::new_v4(), Uuid::new_v4())]));

    let service = service_with(repo);
    let result = service.find_test(Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_list_tests_carries_catalog_context() {
    let course_id = Uuid::new_v4();
    let test_id = Uuid::new_v4();

    let mut repo = MockDegreeRepository::new();
    repo.expect_list()
        .returning(move || Ok(vec![degree_with_test(course_id, test_id)]));

    let service = service_with(repo);
    let tests = service.list_tests().await.unwrap();

    assert_eq!(tests.len(), 1);
    let summary = &tests[0];
    assert_eq!(summary.test_id, test_id);
    assert_eq!(summary.course_id, course_id);
    assert_eq!(summary.degree_title, "Bachelor of Theology");
    assert_eq!(summary.course_title, "Old Testament Survey");
    assert_eq!(summary.lesson_title, "Introduction");
    assert_eq!(summary.question_count, 1);
}

#[tokio::test]
async fn test_get_course_from_degree() {
    let course_id = Uuid::new_v4();
    let degree_id = Uuid::new_v4();

    let mut repo = MockDegreeRepository::new();
    repo.expect_find_by_id()
        .with(eq(degree_id))
        .returning(move |_| Ok(Some(degree_with_test(course_id, Uuid::new_v4()))));

    let service = service_with(repo);
    let course = service.get_course(degree_id, course_id).await.unwrap();

    assert_eq!(course.course_id, course_id);
    assert_eq!(course.total_chapters(), 1);
}

#[tokio::test]
async fn test_get_course_unknown_course_id() {
    let degree_id = Uuid::new_v4();

    let mut repo = MockDegreeRepository::new();
    repo.expect_find_by_id()
        .returning(move |_| Ok(Some(degree_with_test(Uuid::new_v4(), Uuid::new_v4()))));

    let service = service_with(repo);
    let result = service.get_course(degree_id, Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_list_courses_of_missing_degree() {
    let mut repo = MockDegreeRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let service = service_with(repo);
    let result = service.list_courses(Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}
