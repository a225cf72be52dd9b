//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, catalog_handler, user_handler};
use crate::domain::{
    Advance, Chapter, ChapterKind, Course, Degree, DocumentUrls, Lesson, Profile, Question,
    QuestionView, Test, TestScore, TestSummary, TestView, UserResponse, UserRole,
};
use crate::services::{TestLookup, TokenResponse};

/// OpenAPI documentation for the Campus API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campus API",
        version = "0.1.0",
        description = "Learning-management API: admin console and learner portal backend",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        // User endpoints
        user_handler::get_current_user,
        user_handler::list_users,
        user_handler::create_user,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
        user_handler::grant_degree,
        // Degree endpoints
        catalog_handler::list_degrees,
        catalog_handler::create_degree,
        catalog_handler::get_degree,
        catalog_handler::update_degree,
        catalog_handler::delete_degree,
        // Test endpoints
        catalog_handler::list_tests,
        catalog_handler::get_test,
        // Learner catalog endpoints
        catalog_handler::list_my_courses,
        catalog_handler::get_my_course,
        catalog_handler::next_content,
        catalog_handler::list_enrolled_degrees,
        catalog_handler::view_test,
        catalog_handler::submit_test,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            Profile,
            DocumentUrls,
            Degree,
            Course,
            Lesson,
            Chapter,
            ChapterKind,
            Test,
            Question,
            TestView,
            QuestionView,
            TestScore,
            TestSummary,
            TestLookup,
            // Auth types
            auth_handler::LoginRequest,
            TokenResponse,
            // Request types
            user_handler::GrantDegreeRequest,
            catalog_handler::CreateDegreeRequest,
            catalog_handler::UpdateDegreeRequest,
            catalog_handler::TestSubmission,
            catalog_handler::ChapterRef,
            catalog_handler::ProgressSnapshot,
            catalog_handler::NextContent,
            Advance,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Users", description = "User management operations"),
        (name = "Degrees", description = "Degree and course catalog management"),
        (name = "Tests", description = "Test management"),
        (name = "Catalog", description = "Learner-facing catalog browsing")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
