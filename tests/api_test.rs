//! Integration tests for API-facing types.
//!
//! These tests use mock services to exercise API contracts without
//! requiring a database connection.

use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::Utc;
use uuid::Uuid;

use campus_api::domain::{
    DocumentUrls, NewUser, Profile, User, UserChanges, UserResponse, UserRole,
};
use campus_api::errors::{AppError, AppResult};
use campus_api::services::{
    AdmissionFiles, AuthService, Claims, DocumentUpdates, TokenResponse, UserService,
};

// =============================================================================
// Mock Services for Testing
// =============================================================================

fn test_user(id: Uuid) -> User {
    User {
        id,
        username: "jdoe".to_string(),
        email: "test@example.com".to_string(),
        password_hash: "hashed".to_string(),
        role: UserRole::User,
        profile: Profile {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            ..Profile::default()
        },
        documents: DocumentUrls::default(),
        purchased_degrees: vec![],
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Mock auth service that returns predefined responses
struct MockAuthService;

#[async_trait]
impl AuthService for MockAuthService {
    async fn login(&self, _username: String, _password: String) -> AppResult<TokenResponse> {
        Ok(TokenResponse {
            access_token: "mock-token".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 86400,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        if token == "valid-test-token" {
            Ok(Claims {
                sub: Uuid::new_v4(),
                username: "jdoe".to_string(),
                role: "user".to_string(),
                exp: Utc::now().timestamp() + 3600,
                iat: Utc::now().timestamp(),
            })
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

/// Mock user service for testing
struct MockUserService;

#[async_trait]
impl UserService for MockUserService {
    async fn create_user(
        &self,
        new: NewUser,
        _files: Option<AdmissionFiles>,
    ) -> AppResult<User> {
        let mut user = test_user(Uuid::new_v4());
        user.username = new.username;
        user.email = new.email;
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        Ok(test_user(id))
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(vec![test_user(Uuid::new_v4()), test_user(Uuid::new_v4())])
    }

    async fn update_user(
        &self,
        id: Uuid,
        _changes: UserChanges,
        _files: DocumentUpdates,
    ) -> AppResult<User> {
        Ok(test_user(id))
    }

    async fn delete_user(&self, _id: Uuid) -> AppResult<()> {
        Ok(())
    }

    async fn grant_degree(&self, user_id: Uuid, degree_id: Uuid) -> AppResult<User> {
        let mut user = test_user(user_id);
        user.purchased_degrees.push(degree_id);
        Ok(user)
    }
}

// =============================================================================
// Response Type Tests
// =============================================================================

#[tokio::test]
async fn test_api_response_structure() {
    use campus_api::types::ApiResponse;

    let response: ApiResponse<String> = ApiResponse::success("test data".to_string());
    assert!(response.success);
    assert_eq!(response.data.unwrap(), "test data");
    assert!(response.message.is_none());
}

#[tokio::test]
async fn test_api_response_with_message() {
    use campus_api::types::ApiResponse;

    let response: ApiResponse<i32> = ApiResponse::with_message(42, "Degree added to user");
    assert!(response.success);
    assert_eq!(response.data.unwrap(), 42);
    assert_eq!(response.message.unwrap(), "Degree added to user");
}

// =============================================================================
// Domain Model Tests
// =============================================================================

#[tokio::test]
async fn test_user_role_display() {
    assert_eq!(UserRole::User.to_string(), "user");
    assert_eq!(UserRole::Admin.to_string(), "admin");
}

#[tokio::test]
async fn test_user_role_from_str() {
    assert_eq!(UserRole::from("user"), UserRole::User);
    assert_eq!(UserRole::from("admin"), UserRole::Admin);
    // Unknown values default to User
    assert_eq!(UserRole::from("invalid"), UserRole::User);
}

#[tokio::test]
async fn test_user_response_hides_credentials() {
    let user = test_user(Uuid::new_v4());
    let response = UserResponse::from(user.clone());

    let json = serde_json::to_value(&response).unwrap();
    assert!(json.get("password_hash").is_none());
    assert_eq!(json["username"], "jdoe");
    assert_eq!(json["first_name"], "John");
}

#[tokio::test]
async fn test_user_has_degree() {
    let degree_id = Uuid::new_v4();
    let mut user = test_user(Uuid::new_v4());

    assert!(!user.has_degree(degree_id));
    user.purchased_degrees.push(degree_id);
    assert!(user.has_degree(degree_id));
}

// =============================================================================
// Error Type Tests
// =============================================================================

#[tokio::test]
async fn test_app_error_status_codes() {
    use axum::response::IntoResponse;

    let cases = [
        (AppError::NotFound, StatusCode::NOT_FOUND),
        (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
        (AppError::Forbidden, StatusCode::FORBIDDEN),
        (
            AppError::conflict("Username already exists"),
            StatusCode::CONFLICT,
        ),
        (
            AppError::validation("invalid field"),
            StatusCode::BAD_REQUEST,
        ),
        (
            AppError::internal("server error"),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (error, expected) in cases {
        let response = error.into_response();
        assert_eq!(response.status(), expected);
    }
}

#[tokio::test]
async fn test_conflict_keeps_its_message() {
    let error = AppError::conflict("Degree already purchased");
    assert_eq!(error.to_string(), "Degree already purchased");

    let error = AppError::conflict("Username already exists");
    assert_eq!(error.to_string(), "Username already exists");
}

// =============================================================================
// Mock Service Tests
// =============================================================================

#[tokio::test]
async fn test_mock_auth_service_login() {
    let service = MockAuthService;
    let token = service
        .login("jdoe".to_string(), "password123".to_string())
        .await
        .unwrap();

    assert_eq!(token.access_token, "mock-token");
    assert_eq!(token.token_type, "Bearer");
}

#[tokio::test]
async fn test_mock_auth_service_verify() {
    let service = MockAuthService;

    assert!(service.verify_token("valid-test-token").is_ok());
    assert!(matches!(
        service.verify_token("bogus").unwrap_err(),
        AppError::Unauthorized
    ));
}

#[tokio::test]
async fn test_mock_user_service_grant_degree() {
    let service = MockUserService;
    let degree_id = Uuid::new_v4();

    let user = service.grant_degree(Uuid::new_v4(), degree_id).await.unwrap();
    assert!(user.has_degree(degree_id));
}

#[tokio::test]
async fn test_mock_user_service_create() {
    let service = MockUserService;

    let user = service
        .create_user(
            NewUser {
                username: "newuser".to_string(),
                email: "new@example.com".to_string(),
                password: "password123".to_string(),
                role: UserRole::User,
                profile: Profile::default(),
            },
            None,
        )
        .await
        .unwrap();

    assert_eq!(user.username, "newuser");
    assert_eq!(user.email, "new@example.com");
}
