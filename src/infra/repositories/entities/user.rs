//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{DocumentUrls, Profile, User, UserRole};
use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub mobile_no: Option<String>,
    pub marital_status: Option<String>,
    pub date_of_birth: Option<Date>,
    pub gender: Option<String>,
    pub applying_for: Option<Uuid>,
    pub educational_qualification: Option<String>,
    pub theological_qualification: Option<String>,
    pub present_address: Option<String>,
    pub ministry_experience: Option<String>,
    pub salvation_experience: Option<String>,
    pub signature_url: Option<String>,
    pub photo_url: Option<String>,
    pub certificate_url: Option<String>,
    /// JSON array of degree ids granted to this user
    pub purchased_degrees: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl TryFrom<Model> for User {
    type Error = AppError;

    fn try_from(model: Model) -> AppResult<Self> {
        let purchased_degrees: Vec<Uuid> = serde_json::from_value(model.purchased_degrees)
            .map_err(|e| AppError::internal(format!("Corrupt purchased_degrees column: {}", e)))?;

        Ok(User {
            id: model.id,
            username: model.username,
            email: model.email,
            password_hash: model.password_hash,
            role: UserRole::from(model.role.as_str()),
            profile: Profile {
                first_name: model.first_name,
                last_name: model.last_name,
                mobile_no: model.mobile_no,
                marital_status: model.marital_status,
                date_of_birth: model.date_of_birth,
                gender: model.gender,
                applying_for: model.applying_for,
                educational_qualification: model.educational_qualification,
                theological_qualification: model.theological_qualification,
                present_address: model.present_address,
                ministry_experience: model.ministry_experience,
                salvation_experience: model.salvation_experience,
            },
            documents: DocumentUrls {
                signature_url: model.signature_url,
                photo_url: model.photo_url,
                certificate_url: model.certificate_url,
            },
            purchased_degrees,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
