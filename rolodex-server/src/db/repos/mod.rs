//! Repository implementations for database access

pub mod persons;

pub use persons::{Person, PersonRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("email already registered: {email}")]
    DuplicateEmail { email: String },
}
