//! Data models for the homepage

pub mod profile;
pub mod publication;
pub mod student;

// Re-export commonly used types
pub use profile::Profile;
pub use publication::{DocType, PublicationRecord};
pub use student::{Student, StudentKind};
