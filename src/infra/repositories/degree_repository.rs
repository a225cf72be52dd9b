//! Degree repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use super::entities::degree::{ActiveModel, Entity as DegreeEntity};
use crate::domain::{Course, Degree, DegreeChanges, NewDegree};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Degree repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DegreeRepository: Send + Sync {
    /// Find degree by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Degree>>;

    /// List all degrees
    async fn list(&self) -> AppResult<Vec<Degree>>;

    /// Create a new degree
    async fn create(&self, degree: NewDegree) -> AppResult<Degree>;

    /// Update degree fields
    async fn update(&self, id: Uuid, changes: DegreeChanges) -> AppResult<Degree>;

    /// Delete degree by ID
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of DegreeRepository
pub struct DegreeStore {
    db: DatabaseConnection,
}

impl DegreeStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn courses_json(courses: &[Course]) -> AppResult<serde_json::Value> {
    serde_json::to_value(courses)
        .map_err(|e| AppError::internal(format!("Course tree serialization failed: {}", e)))
}

#[async_trait]
impl DegreeRepository for DegreeStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Degree>> {
        let result = DegreeEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result.map(Degree::try_from).transpose()
    }

    async fn list(&self) -> AppResult<Vec<Degree>> {
        let models = DegreeEntity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        models.into_iter().map(Degree::try_from).collect()
    }

    async fn create(&self, degree: NewDegree) -> AppResult<Degree> {
        let now = chrono::Utc::now();
        let active = ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(degree.title),
            description: Set(degree.description),
            courses: Set(courses_json(&degree.courses)?),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        Degree::try_from(model)
    }

    async fn update(&self, id: Uuid, changes: DegreeChanges) -> AppResult<Degree> {
        let degree = DegreeEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = degree.into();

        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }
        if let Some(courses) = changes.courses {
            active.courses = Set(courses_json(&courses)?);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Degree::try_from(model)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = DegreeEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
