//! Catalog handlers: admin degree/test management and learner browsing.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{
    Advance, Course, CourseProgress, Degree, DegreeChanges, NewDegree, TestScore, TestSummary,
    TestView,
};
use crate::errors::{AppError, AppResult};
use crate::services::TestLookup;
use crate::types::{ApiResponse, Created, NoContent};

/// Degree creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDegreeRequest {
    /// Degree title
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Bachelor of Theology")]
    pub title: String,
    pub description: Option<String>,
    /// Nested course tree
    #[serde(default)]
    pub courses: Vec<Course>,
}

/// Degree update request; absent fields keep their stored values
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDegreeRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub courses: Option<Vec<Course>>,
}

/// Test answer sheet: one selected option index per question
#[derive(Debug, Deserialize, ToSchema)]
pub struct TestSubmission {
    pub answers: Vec<Option<usize>>,
}

/// Reference to a chapter by (lesson, chapter) indices
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct ChapterRef {
    pub lesson: usize,
    pub chapter: usize,
}

/// Client-held navigation snapshot for a course
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProgressSnapshot {
    /// Chapters completed so far
    #[serde(default)]
    pub completed: Vec<ChapterRef>,
    /// Chapter currently open, if any
    #[serde(default)]
    pub position: Option<ChapterRef>,
}

/// Where "Next" goes, plus overall course progress
#[derive(Debug, Serialize, ToSchema)]
pub struct NextContent {
    pub outcome: Advance,
    /// Completed share of the course, scaled to 100
    pub percent: f64,
    pub completed: usize,
    pub total: usize,
}

/// Create admin degree management routes
pub fn degree_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_degrees).post(create_degree))
        .route(
            "/:id",
            get(get_degree).put(update_degree).delete(delete_degree),
        )
}

/// Create admin test overview routes
pub fn test_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tests))
        .route("/:id", get(get_test))
}

/// Create learner catalog routes
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_my_courses))
        .route("/courses/:course_id", get(get_my_course))
        .route("/courses/:course_id/next", post(next_content))
        .route("/enrolled", get(list_enrolled_degrees))
        .route("/tests/:test_id", get(view_test))
        .route("/tests/:test_id/submissions", post(submit_test))
}

// =============================================================================
// Admin: degrees
// =============================================================================

/// List all degrees (admin only)
#[utoipa::path(
    get,
    path = "/degrees",
    tag = "Degrees",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of all degrees", body = Vec<Degree>),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_degrees(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Degree>>> {
    require_admin(&current_user)?;
    Ok(Json(state.catalog_service.list_degrees().await?))
}

/// Create a degree (admin only)
#[utoipa::path(
    post,
    path = "/degrees",
    tag = "Degrees",
    security(("bearer_auth" = [])),
    request_body = CreateDegreeRequest,
    responses(
        (status = 201, description = "Degree created successfully", body = Degree),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn create_degree(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateDegreeRequest>,
) -> AppResult<Created<Degree>> {
    require_admin(&current_user)?;

    let degree = state
        .catalog_service
        .create_degree(NewDegree {
            title: payload.title,
            description: payload.description,
            courses: payload.courses,
        })
        .await?;

    Ok(Created(degree))
}

/// Get degree by ID (admin only)
#[utoipa::path(
    get,
    path = "/degrees/{id}",
    tag = "Degrees",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Degree ID")
    ),
    responses(
        (status = 200, description = "Degree", body = Degree),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Degree not found")
    )
)]
pub async fn get_degree(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Degree>> {
    require_admin(&current_user)?;
    Ok(Json(state.catalog_service.get_degree(id).await?))
}

/// Update a degree (admin only)
#[utoipa::path(
    put,
    path = "/degrees/{id}",
    tag = "Degrees",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Degree ID")
    ),
    request_body = UpdateDegreeRequest,
    responses(
        (status = 200, description = "Degree updated successfully", body = Degree),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Degree not found")
    )
)]
pub async fn update_degree(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateDegreeRequest>,
) -> AppResult<Json<Degree>> {
    require_admin(&current_user)?;

    let degree = state
        .catalog_service
        .update_degree(
            id,
            DegreeChanges {
                title: payload.title,
                description: payload.description,
                courses: payload.courses,
            },
        )
        .await?;

    Ok(Json(degree))
}

/// Delete a degree (admin only)
#[utoipa::path(
    delete,
    path = "/degrees/{id}",
    tag = "Degrees",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Degree ID")
    ),
    responses(
        (status = 204, description = "Degree deleted successfully"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Degree not found")
    )
)]
pub async fn delete_degree(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    require_admin(&current_user)?;
    state.catalog_service.delete_degree(id).await?;
    Ok(NoContent)
}

// =============================================================================
// Admin: tests
// =============================================================================

/// List every test in the catalog (admin only)
#[utoipa::path(
    get,
    path = "/tests",
    tag = "Tests",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All tests with their catalog location", body = Vec<TestSummary>),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_tests(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<TestSummary>>> {
    require_admin(&current_user)?;
    Ok(Json(state.catalog_service.list_tests().await?))
}

/// Get a test with its questions and answers (admin only)
#[utoipa::path(
    get,
    path = "/tests/{id}",
    tag = "Tests",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Test ID")
    ),
    responses(
        (status = 200, description = "Test detail", body = TestLookup),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Test not found")
    )
)]
pub async fn get_test(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<TestLookup>> {
    require_admin(&current_user)?;
    Ok(Json(state.catalog_service.find_test(id).await?))
}

// =============================================================================
// Learner: catalog browsing and tests
// =============================================================================

/// Degree id the learner is studying, from their profile.
async fn applied_degree(state: &AppState, current_user: &CurrentUser) -> AppResult<Uuid> {
    let user = state.user_service.get_user(current_user.id).await?;
    user.profile
        .applying_for
        .ok_or_else(|| AppError::validation("No degree selected for this account"))
}

/// List the courses of the learner's degree
#[utoipa::path(
    get,
    path = "/catalog/courses",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Courses of the learner's degree", body = Vec<Course>),
        (status = 400, description = "No degree selected"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_my_courses(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Course>>> {
    let degree_id = applied_degree(&state, &current_user).await?;
    Ok(Json(state.catalog_service.list_courses(degree_id).await?))
}

/// Get one course of the learner's degree
#[utoipa::path(
    get,
    path = "/catalog/courses/{course_id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(
        ("course_id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course detail", body = Course),
        (status = 400, description = "No degree selected"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn get_my_course(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> AppResult<Json<Course>> {
    let degree_id = applied_degree(&state, &current_user).await?;
    Ok(Json(
        state.catalog_service.get_course(degree_id, course_id).await?,
    ))
}

/// Advance the learner's position within a course.
///
/// The navigation state lives with the client; each call replays the
/// snapshot against the course and reports where "Next" lands.
#[utoipa::path(
    post,
    path = "/catalog/courses/{course_id}/next",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(
        ("course_id" = Uuid, Path, description = "Course ID")
    ),
    request_body = ProgressSnapshot,
    responses(
        (status = 200, description = "Next chapter or completion state", body = NextContent),
        (status = 400, description = "No degree selected"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn next_content(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
    Json(snapshot): Json<ProgressSnapshot>,
) -> AppResult<Json<NextContent>> {
    let degree_id = applied_degree(&state, &current_user).await?;
    let course = state.catalog_service.get_course(degree_id, course_id).await?;

    let completed: Vec<(usize, usize)> = snapshot
        .completed
        .iter()
        .map(|r| (r.lesson, r.chapter))
        .collect();
    let position = snapshot.position.map(|r| (r.lesson, r.chapter));

    let mut progress = CourseProgress::resume(&course, position, &completed);
    let outcome = progress.advance(&course);

    Ok(Json(NextContent {
        outcome,
        percent: progress.percent(&course),
        completed: progress.completed_count(),
        total: course.total_chapters(),
    }))
}

/// List the degrees granted to the learner
#[utoipa::path(
    get,
    path = "/catalog/enrolled",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Degrees in the learner's purchased list", body = Vec<Degree>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_enrolled_degrees(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Degree>>> {
    let user = state.user_service.get_user(current_user.id).await?;

    // Granted degrees that have since been deleted are skipped
    let mut degrees = Vec::new();
    for degree_id in user.purchased_degrees {
        match state.catalog_service.get_degree(degree_id).await {
            Ok(degree) => degrees.push(degree),
            Err(AppError::NotFound) => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(Json(degrees))
}

/// Get a test for taking, with correct answers removed
#[utoipa::path(
    get,
    path = "/catalog/tests/{test_id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(
        ("test_id" = Uuid, Path, description = "Test ID")
    ),
    responses(
        (status = 200, description = "Test without answers", body = TestView),
        (status = 404, description = "Test not found")
    )
)]
pub async fn view_test(
    Extension(_current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(test_id): Path<Uuid>,
) -> AppResult<Json<TestView>> {
    let lookup = state.catalog_service.find_test(test_id).await?;
    Ok(Json(TestView::from(&lookup.test)))
}

/// Grade a submitted answer sheet
#[utoipa::path(
    post,
    path = "/catalog/tests/{test_id}/submissions",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(
        ("test_id" = Uuid, Path, description = "Test ID")
    ),
    request_body = TestSubmission,
    responses(
        (status = 200, description = "Graded score", body = TestScore),
        (status = 404, description = "Test not found")
    )
)]
pub async fn submit_test(
    Extension(_current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(test_id): Path<Uuid>,
    Json(payload): Json<TestSubmission>,
) -> AppResult<Json<ApiResponse<TestScore>>> {
    let lookup = state.catalog_service.find_test(test_id).await?;
    let score = lookup.test.score(&payload.answers);

    Ok(Json(ApiResponse::success(score)))
}
