//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod catalog;
pub mod password;
pub mod progress;
pub mod user;

pub use catalog::{
    Chapter, ChapterKind, Course, Degree, DegreeChanges, Lesson, NewDegree, Question,
    QuestionView, Test, TestScore, TestSummary, TestView,
};
pub use password::Password;
pub use progress::{Advance, CourseProgress};
pub use user::{
    DocumentUrls, NewUser, Profile, User, UserChanges, UserResponse, UserRole,
};
