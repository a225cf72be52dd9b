//! User domain entity and related types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_ADMIN, ROLE_USER};

/// User roles enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::User => write!(f, "{}", ROLE_USER),
        }
    }
}

/// Admission profile captured from the application form.
///
/// Everything beyond the applicant's name is optional: administrator
/// accounts created from the CLI carry none of it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    /// Applicant first name
    #[schema(example = "John")]
    pub first_name: String,
    /// Applicant last name
    #[schema(example = "Doe")]
    pub last_name: String,
    pub mobile_no: Option<String>,
    pub marital_status: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    /// Degree the applicant is applying for
    pub applying_for: Option<Uuid>,
    pub educational_qualification: Option<String>,
    pub theological_qualification: Option<String>,
    pub present_address: Option<String>,
    pub ministry_experience: Option<String>,
    pub salvation_experience: Option<String>,
}

/// Download URLs of the documents uploaded with the admission form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DocumentUrls {
    pub signature_url: Option<String>,
    pub photo_url: Option<String>,
    pub certificate_url: Option<String>,
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub profile: Profile,
    pub documents: DocumentUrls,
    /// Degrees granted to this user
    pub purchased_degrees: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Check if the degree has already been granted to this user
    pub fn has_degree(&self, degree_id: Uuid) -> bool {
        self.purchased_degrees.contains(&degree_id)
    }
}

/// Data required to create a new user account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    /// Plain-text password, hashed by the user service
    pub password: String,
    pub role: UserRole,
    pub profile: Profile,
}

/// Field changes applied by a user update.
///
/// `None` keeps the stored value; the password is rehashed only when a
/// new one is provided.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    /// Replaces the stored profile wholesale (the edit form posts every field)
    pub profile: Option<Profile>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "jdoe")]
    pub username: String,
    #[schema(example = "user@example.com")]
    pub email: String,
    #[schema(example = "user")]
    pub role: String,
    #[serde(flatten)]
    pub profile: Profile,
    #[serde(flatten)]
    pub documents: DocumentUrls,
    pub purchased_degrees: Vec<Uuid>,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role.to_string(),
            profile: user.profile,
            documents: user.documents,
            purchased_degrees: user.purchased_degrees,
            created_at: user.created_at,
        }
    }
}
