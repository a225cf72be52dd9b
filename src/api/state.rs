//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::path::PathBuf;
use std::sync::Arc;

use crate::infra::{Database, FsStore, ObjectStorage};
use crate::services::{AuthService, CatalogService, ServiceContainer, Services, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Catalog service
    pub catalog_service: Arc<dyn CatalogService>,
    /// Database connection
    pub database: Arc<Database>,
    /// Directory served under the static files route
    pub files_root: PathBuf,
}

impl AppState {
    /// Create application state from database connection, storage, and config.
    pub fn from_config(
        database: Arc<Database>,
        storage: Arc<FsStore>,
        config: crate::config::Config,
    ) -> Self {
        let files_root = storage.root().to_path_buf();
        let container = Services::from_connection(
            database.get_connection(),
            storage as Arc<dyn ObjectStorage>,
            config,
        );

        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            catalog_service: container.catalog(),
            database,
            files_root,
        }
    }

    /// Create new application state with manually injected services
    /// (used by tests).
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        catalog_service: Arc<dyn CatalogService>,
        database: Arc<Database>,
        files_root: PathBuf,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            catalog_service,
            database,
            files_root,
        }
    }
}
