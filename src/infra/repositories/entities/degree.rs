//! Degree database entity for SeaORM.
//!
//! The course tree is stored as one JSON document per degree, mirroring
//! the nested shape the catalog editor works with.

use sea_orm::entity::prelude::*;

use crate::domain::{Course, Degree};
use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "degrees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Nested course/lesson/chapter/test document
    pub courses: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl TryFrom<Model> for Degree {
    type Error = AppError;

    fn try_from(model: Model) -> AppResult<Self> {
        let courses: Vec<Course> = serde_json::from_value(model.courses)
            .map_err(|e| AppError::internal(format!("Corrupt courses column: {}", e)))?;

        Ok(Degree {
            id: model.id,
            title: model.title,
            description: model.description,
            courses,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
