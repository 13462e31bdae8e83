//! Core of the roster manager: a persisted list of members and their birthdays,
//! ranked by how soon each birthday comes around.

use thiserror::Error;

pub mod fs;
pub mod locale;
pub mod notice;
pub mod ranker;
pub mod repository;
pub mod sanitize;
pub mod validation;

pub use repository::{EditContext, Member, MemberId, Repository};

use crate::{
    repository::{LoadWarning, config::ConfigError, storage::StorageError},
    validation::ValidationError,
};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("A member named {name} born on {day}/{month} already exists")]
    Duplicate { name: String, day: u8, month: u8 },
    #[error("No member with id {0}")]
    NotFound(MemberId),
    #[error(transparent)]
    Load(#[from] LoadWarning),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Failed to serialize members: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
