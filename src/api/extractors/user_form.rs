//! Multipart extractor for the admission/user-edit form.
//!
//! The form posts the profile as text fields plus up to three file
//! parts (signature, photo, certificate). Every field is optional at
//! the extraction layer; the conversion helpers decide what a given
//! operation requires.

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
};
use chrono::NaiveDate;
use uuid::Uuid;
use validator::ValidateEmail;

use crate::config::is_valid_role;
use crate::domain::{NewUser, Profile, UserChanges, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::FileUpload;
use crate::services::{AdmissionFiles, DocumentUpdates};

/// Parsed admission/user-edit form.
#[derive(Debug, Default)]
pub struct UserForm {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub mobile_no: Option<String>,
    pub marital_status: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub applying_for: Option<Uuid>,
    pub educational_qualification: Option<String>,
    pub theological_qualification: Option<String>,
    pub present_address: Option<String>,
    pub ministry_experience: Option<String>,
    pub salvation_experience: Option<String>,
    pub signature: Option<FileUpload>,
    pub photo: Option<FileUpload>,
    pub certificate: Option<FileUpload>,
}

#[async_trait]
impl<S> FromRequest<S> for UserForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.to_string()))?;

        let mut form = UserForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::bad_request(e.to_string()))?
        {
            let name = field.name().unwrap_or_default().to_string();

            match name.as_str() {
                "signature" | "photo" | "certificate" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::bad_request(e.to_string()))?
                        .to_vec();

                    // A file input left empty still posts an empty part
                    if file_name.is_empty() || bytes.is_empty() {
                        continue;
                    }

                    let upload = FileUpload { file_name, bytes };
                    match name.as_str() {
                        "signature" => form.signature = Some(upload),
                        "photo" => form.photo = Some(upload),
                        _ => form.certificate = Some(upload),
                    }
                }
                _ => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| AppError::bad_request(e.to_string()))?;
                    let value = value.trim().to_string();
                    if value.is_empty() {
                        continue;
                    }
                    form.set_text_field(&name, value)?;
                }
            }
        }

        Ok(form)
    }
}

impl UserForm {
    fn set_text_field(&mut self, name: &str, value: String) -> AppResult<()> {
        match name {
            "username" => self.username = Some(value),
            "email" => self.email = Some(value),
            "password" => self.password = Some(value),
            "role" => {
                if !is_valid_role(&value) {
                    return Err(AppError::validation(
                        "Invalid role. Must be 'user' or 'admin'",
                    ));
                }
                self.role = Some(UserRole::from(value.as_str()));
            }
            "first_name" => self.first_name = Some(value),
            "last_name" => self.last_name = Some(value),
            "mobile_no" => self.mobile_no = Some(value),
            "marital_status" => self.marital_status = Some(value),
            "date_of_birth" => {
                let date = value
                    .parse()
                    .map_err(|_| AppError::validation("Invalid date of birth"))?;
                self.date_of_birth = Some(date);
            }
            "gender" => self.gender = Some(value),
            "applying_for" => {
                let id = value
                    .parse()
                    .map_err(|_| AppError::validation("Invalid degree id"))?;
                self.applying_for = Some(id);
            }
            "educational_qualification" => self.educational_qualification = Some(value),
            "theological_qualification" => self.theological_qualification = Some(value),
            "present_address" => self.present_address = Some(value),
            "ministry_experience" => self.ministry_experience = Some(value),
            "salvation_experience" => self.salvation_experience = Some(value),
            // Unknown fields are ignored
            _ => {}
        }
        Ok(())
    }

    fn build_profile(&mut self) -> Profile {
        Profile {
            first_name: self.first_name.take().unwrap_or_default(),
            last_name: self.last_name.take().unwrap_or_default(),
            mobile_no: self.mobile_no.take(),
            marital_status: self.marital_status.take(),
            date_of_birth: self.date_of_birth.take(),
            gender: self.gender.take(),
            applying_for: self.applying_for.take(),
            educational_qualification: self.educational_qualification.take(),
            theological_qualification: self.theological_qualification.take(),
            present_address: self.present_address.take(),
            ministry_experience: self.ministry_experience.take(),
            salvation_experience: self.salvation_experience.take(),
        }
    }

    /// Convert into a registration payload.
    ///
    /// Requires username, a well-formed email, password, both names, and
    /// all three admission documents. The role field is ignored; new
    /// accounts always start as plain users.
    pub fn into_registration(mut self) -> AppResult<(NewUser, AdmissionFiles)> {
        let username = self
            .username
            .take()
            .ok_or_else(|| AppError::validation("Username is required"))?;
        let email = self
            .email
            .take()
            .ok_or_else(|| AppError::validation("Email is required"))?;
        if !email.validate_email() {
            return Err(AppError::validation("Invalid email format"));
        }
        let password = self
            .password
            .take()
            .ok_or_else(|| AppError::validation("Password is required"))?;
        if self.first_name.is_none() || self.last_name.is_none() {
            return Err(AppError::validation("First and last name are required"));
        }

        let files = AdmissionFiles {
            signature: self
                .signature
                .take()
                .ok_or_else(|| AppError::validation("Signature upload is required"))?,
            photo: self
                .photo
                .take()
                .ok_or_else(|| AppError::validation("Passport photo upload is required"))?,
            certificate: self
                .certificate
                .take()
                .ok_or_else(|| AppError::validation("Education certificate upload is required"))?,
        };

        let profile = self.build_profile();
        let new_user = NewUser {
            username,
            email,
            password,
            role: UserRole::User,
            profile,
        };

        Ok((new_user, files))
    }

    /// Convert into an update payload.
    ///
    /// The profile is replaced only when the form carries names (the edit
    /// form posts every field); absent files keep their stored URLs.
    pub fn into_changes(mut self) -> AppResult<(UserChanges, DocumentUpdates)> {
        if let Some(email) = &self.email {
            if !email.validate_email() {
                return Err(AppError::validation("Invalid email format"));
            }
        }

        let files = DocumentUpdates {
            signature: self.signature.take(),
            photo: self.photo.take(),
            certificate: self.certificate.take(),
        };

        let changes = UserChanges {
            username: self.username.take(),
            email: self.email.take(),
            password: self.password.take(),
            role: self.role.take(),
            profile: if self.first_name.is_some() && self.last_name.is_some() {
                Some(self.build_profile())
            } else {
                None
            },
        };

        Ok((changes, files))
    }
}
