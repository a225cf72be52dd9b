//! User service - Handles user-related business logic.
//!
//! User creation and update own the whole admission flow: uniqueness
//! checks, password hashing, and sequential document uploads.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{
    STORAGE_PREFIX_CERTIFICATES, STORAGE_PREFIX_PHOTOS, STORAGE_PREFIX_SIGNATURES,
};
use crate::domain::{DocumentUrls, NewUser, Password, User, UserChanges};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{FileUpload, NewUserRecord, ObjectStorage, UnitOfWork, UserRecordChanges};

/// The three documents required by the admission form.
#[derive(Debug, Clone)]
pub struct AdmissionFiles {
    pub signature: FileUpload,
    pub photo: FileUpload,
    pub certificate: FileUpload,
}

/// Replacement documents supplied with an update; absent files keep
/// their stored URLs.
#[derive(Debug, Clone, Default)]
pub struct DocumentUpdates {
    pub signature: Option<FileUpload>,
    pub photo: Option<FileUpload>,
    pub certificate: Option<FileUpload>,
}

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a user, rejecting duplicate usernames and emails.
    ///
    /// Admission documents are uploaded when provided (the registration
    /// path); CLI-created administrators carry none.
    async fn create_user(&self, new: NewUser, files: Option<AdmissionFiles>) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Update user details, re-uploading only the documents provided
    async fn update_user(
        &self,
        id: Uuid,
        changes: UserChanges,
        files: DocumentUpdates,
    ) -> AppResult<User>;

    /// Delete user by ID
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;

    /// Grant a degree to a user; granting an already-held degree is a
    /// no-op that reports a conflict
    async fn grant_degree(&self, user_id: Uuid, degree_id: Uuid) -> AppResult<User>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
    storage: Arc<dyn ObjectStorage>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work and storage
    pub fn new(uow: Arc<U>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self { uow, storage }
    }

    /// Upload the three admission documents, one after another.
    ///
    /// There is no rollback: a failure part-way leaves the earlier
    /// uploads in place, and their URLs are simply never recorded.
    async fn upload_admission_files(&self, files: AdmissionFiles) -> AppResult<DocumentUrls> {
        let signature_url = self
            .storage
            .store(STORAGE_PREFIX_SIGNATURES, &files.signature)
            .await?;
        let photo_url = self
            .storage
            .store(STORAGE_PREFIX_PHOTOS, &files.photo)
            .await?;
        let certificate_url = self
            .storage
            .store(STORAGE_PREFIX_CERTIFICATES, &files.certificate)
            .await?;

        Ok(DocumentUrls {
            signature_url: Some(signature_url),
            photo_url: Some(photo_url),
            certificate_url: Some(certificate_url),
        })
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn create_user(&self, new: NewUser, files: Option<AdmissionFiles>) -> AppResult<User> {
        // Sequential existence checks, username first; the unique
        // indexes on both columns catch whatever races past these.
        if self.uow.users().find_by_username(&new.username).await?.is_some() {
            return Err(AppError::conflict("Username already exists"));
        }
        if self.uow.users().find_by_email(&new.email).await?.is_some() {
            return Err(AppError::conflict("Email already exists"));
        }

        let password_hash = Password::new(&new.password)?.into_string();

        let documents = match files {
            Some(files) => self.upload_admission_files(files).await?,
            None => DocumentUrls::default(),
        };

        let user = self
            .uow
            .users()
            .create(NewUserRecord {
                username: new.username,
                email: new.email,
                password_hash,
                role: new.role,
                profile: new.profile,
                documents,
            })
            .await?;

        tracing::info!(user_id = %user.id, "user created");
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.uow.users().find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.uow.users().list().await
    }

    async fn update_user(
        &self,
        id: Uuid,
        changes: UserChanges,
        files: DocumentUpdates,
    ) -> AppResult<User> {
        // Rehash only when a new password was provided
        let password_hash = match changes.password {
            Some(password) => Some(Password::new(&password)?.into_string()),
            None => None,
        };

        // Re-upload only the documents that changed, one after another
        let signature_url = match files.signature {
            Some(file) => Some(self.storage.store(STORAGE_PREFIX_SIGNATURES, &file).await?),
            None => None,
        };
        let photo_url = match files.photo {
            Some(file) => Some(self.storage.store(STORAGE_PREFIX_PHOTOS, &file).await?),
            None => None,
        };
        let certificate_url = match files.certificate {
            Some(file) => {
                Some(
                    self.storage
                        .store(STORAGE_PREFIX_CERTIFICATES, &file)
                        .await?,
                )
            }
            None => None,
        };

        self.uow
            .users()
            .update(
                id,
                UserRecordChanges {
                    username: changes.username,
                    email: changes.email,
                    password_hash,
                    role: changes.role,
                    profile: changes.profile,
                    signature_url,
                    photo_url,
                    certificate_url,
                },
            )
            .await
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.uow.users().delete(id).await
    }

    async fn grant_degree(&self, user_id: Uuid, degree_id: Uuid) -> AppResult<User> {
        let user = self.uow.users().find_by_id(user_id).await?.ok_or_not_found()?;

        if user.has_degree(degree_id) {
            return Err(AppError::conflict("Degree already purchased"));
        }

        let mut degrees = user.purchased_degrees;
        degrees.push(degree_id);
        self.uow.users().set_purchased_degrees(user_id, degrees).await
    }
}
