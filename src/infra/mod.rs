//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Object storage for uploaded documents
//! - Unit of Work bundling repository access

pub mod db;
pub mod repositories;
pub mod storage;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    DegreeRepository, DegreeStore, NewUserRecord, UserRecordChanges, UserRepository, UserStore,
};
pub use storage::{FileUpload, FsStore, ObjectStorage};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockDegreeRepository, MockUserRepository};
#[cfg(any(test, feature = "test-utils"))]
pub use storage::MockObjectStorage;
