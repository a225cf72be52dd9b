//! Authentication service unit tests.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use campus_api::config::Config;
use campus_api::domain::{DocumentUrls, Password, Profile, User, UserRole};
use campus_api::errors::AppError;
use campus_api::infra::{
    DegreeRepository, MockDegreeRepository, MockUserRepository, UnitOfWork, UserRepository,
};
use campus_api::services::{AuthService, Authenticator};

fn user_with_password(username: &str, password: &str) -> User {
    User {
        id: Uuid::new_v4(),
        username: username.to_string(),
        email: "test@example.com".to_string(),
        password_hash: Password::new(password).unwrap().into_string(),
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

struct TestUnitOfWork {
    user_repo: Arc<MockUserRepository>,
    degree_repo: Arc<MockDegreeRepository>,
}

impl TestUnitOfWork {
    fn new(user_repo: MockUserRepository) -> Self {
        Self {
            user_repo: Arc::new(user_repo),
            degree_repo: Arc::new(MockDegreeRepository::new()),
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

fn authenticator(repo: MockUserRepository) -> Authenticator<TestUnitOfWork> {
    Authenticator::new(Arc::new(TestUnitOfWork::new(repo)), Config::from_env())
}

#[tokio::test]
async fn test_login_success_returns_verifiable_token() {
    let user = user_with_password("jdoe", "password123");
    let user_id = user.id;

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .returning(move |_| Ok(Some(user.clone())));

    let service = authenticator(repo);
    let token = service
        .login("jdoe".to_string(), "password123".to_string())
        .await
        .unwrap();

    assert_eq!(token.token_type, "Bearer");
    assert!(token.expires_in > 0);

    let claims = service.verify_token(&token.access_token).unwrap();
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.username, "jdoe");
    assert_eq!(claims.role, "user");
    assert!(claims.exp > claims.iat);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let user = user_with_password("jdoe", "password123");

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .returning(move |_| Ok(Some(user.clone())));

    let service = authenticator(repo);
    let result = service
        .login("jdoe".to_string(), "wrong-password".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn test_login_unknown_user_fails_closed() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username().returning(|_| Ok(None));

    let service = authenticator(repo);
    let result = service
        .login("nobody".to_string(), "password123".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn test_verify_token_rejects_garbage() {
    let service = authenticator(MockUserRepository::new());
    assert!(service.verify_token("not-a-jwt").is_err());
}
