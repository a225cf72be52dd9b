//! Unit of Work: centralized repository access.
//!
//! Bundles the repositories behind one injectable handle so services
//! depend on a single seam instead of individual stores.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{DegreeRepository, DegreeStore, UserRepository, UserStore};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get degree repository
    fn degrees(&self) -> Arc<dyn DegreeRepository>;
}

/// Concrete implementation of UnitOfWork backed by the database stores.
pub struct Persistence {
    user_repo: Arc<UserStore>,
    degree_repo: Arc<DegreeStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            degree_repo: Arc::new(DegreeStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn degrees(&self) -> Arc<dyn DegreeRepository> {
        self.degree_repo.clone()
    }
}
