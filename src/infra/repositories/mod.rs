//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod degree_repository;
pub(crate) mod entities;
mod user_repository;

pub use degree_repository::{DegreeRepository, DegreeStore};
pub use user_repository::{NewUserRecord, UserRecordChanges, UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use degree_repository::MockDegreeRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
