//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{DocumentUrls, Profile, User, UserRole};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Column values for a new user row.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub profile: Profile,
    pub documents: DocumentUrls,
}

/// Column changes for a user update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UserRecordChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<UserRole>,
    pub profile: Option<Profile>,
    pub signature_url: Option<String>,
    pub photo_url: Option<String>,
    pub certificate_url: Option<String>,
}

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a new user
    async fn create(&self, record: NewUserRecord) -> AppResult<User>;

    /// Update user fields
    async fn update(&self, id: Uuid, changes: UserRecordChanges) -> AppResult<User>;

    /// Replace the purchased-degrees list
    async fn set_purchased_degrees(&self, id: Uuid, degrees: Vec<Uuid>) -> AppResult<User>;

    /// Delete user by ID
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// List all users
    async fn list(&self) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Write profile fields into an active model.
fn apply_profile(active: &mut ActiveModel, profile: Profile) {
    active.first_name = Set(profile.first_name);
    active.last_name = Set(profile.last_name);
    active.mobile_no = Set(profile.mobile_no);
    active.marital_status = Set(profile.marital_status);
    active.date_of_birth = Set(profile.date_of_birth);
    active.gender = Set(profile.gender);
    active.applying_for = Set(profile.applying_for);
    active.educational_qualification = Set(profile.educational_qualification);
    active.theological_qualification = Set(profile.theological_qualification);
    active.present_address = Set(profile.present_address);
    active.ministry_experience = Set(profile.ministry_experience);
    active.salvation_experience = Set(profile.salvation_experience);
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result.map(User::try_from).transpose()
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result.map(User::try_from).transpose()
    }

    async fn create(&self, record: NewUserRecord) -> AppResult<User> {
        let now = chrono::Utc::now();
        let mut active = ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(record.username),
            email: Set(record.email),
            password_hash: Set(record.password_hash),
            role: Set(record.role.to_string()),
            signature_url: Set(record.documents.signature_url),
            photo_url: Set(record.documents.photo_url),
            certificate_url: Set(record.documents.certificate_url),
            purchased_degrees: Set(serde_json::json!([])),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        apply_profile(&mut active, record.profile);

        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        User::try_from(model)
    }

    async fn update(&self, id: Uuid, changes: UserRecordChanges) -> AppResult<User> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = user.into();

        if let Some(username) = changes.username {
            active.username = Set(username);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(password_hash);
        }
        if let Some(role) = changes.role {
            active.role = Set(role.to_string());
        }
        if let Some(profile) = changes.profile {
            apply_profile(&mut active, profile);
        }
        if let Some(url) = changes.signature_url {
            active.signature_url = Set(Some(url));
        }
        if let Some(url) = changes.photo_url {
            active.photo_url = Set(Some(url));
        }
        if let Some(url) = changes.certificate_url {
            active.certificate_url = Set(Some(url));
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        User::try_from(model)
    }

    async fn set_purchased_degrees(&self, id: Uuid, degrees: Vec<Uuid>) -> AppResult<User> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = user.into();
        active.purchased_degrees = Set(serde_json::json!(degrees));
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        User::try_from(model)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        models.into_iter().map(User::try_from).collect()
    }
}
