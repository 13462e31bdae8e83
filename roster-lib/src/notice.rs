//! Transient, user-facing notifications for the outcome of every operation.
//!
//! How long a notice stays on screen is up to whoever shows it.

use strum::Display;

use crate::{
    Error,
    repository::{LoadWarning, Member, storage::StorageError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn added(member: &Member) -> Self {
        Self::new(
            NoticeLevel::Success,
            format!("{} added successfully!", member.name()),
        )
    }

    pub fn updated(member: &Member) -> Self {
        Self::new(
            NoticeLevel::Success,
            format!("{} updated successfully!", member.name()),
        )
    }

    pub fn deleted(member: &Member) -> Self {
        Self::new(
            NoticeLevel::Info,
            format!("{} deleted successfully", member.name()),
        )
    }

    pub fn cleared() -> Self {
        Self::new(NoticeLevel::Info, "All members deleted")
    }

    /// Malformed stored data was overwritten by the latest save.
    pub fn replaced() -> Self {
        Self::new(
            NoticeLevel::Warning,
            "Stored members data was unreadable and has been replaced",
        )
    }

    pub fn exported() -> Self {
        Self::new(NoticeLevel::Success, "Data exported successfully")
    }

    /// Announce today's birthdays, or nothing if there are none.
    pub fn todays_birthdays(members: &[Member]) -> Option<Self> {
        if members.is_empty() {
            return None;
        }

        let names = members
            .iter()
            .map(|m| m.name().as_str())
            .collect::<Vec<_>>()
            .join(", ");

        Some(Self::new(
            NoticeLevel::Success,
            format!("Today's birthdays: {names}!"),
        ))
    }
}

impl From<&Error> for Notice {
    fn from(err: &Error) -> Self {
        match err {
            Error::Validation(e) => Self::new(NoticeLevel::Error, e.to_string()),
            Error::Duplicate { .. } => {
                Self::new(NoticeLevel::Warning, "This member already exists!")
            }
            Error::NotFound(_) => Self::new(NoticeLevel::Error, "Member not found"),
            Error::Load(warning) => Self::from(warning),
            Error::Storage(StorageError::QuotaExceeded) => Self::new(
                NoticeLevel::Error,
                "Storage quota exceeded. Please delete some entries.",
            ),
            Error::Storage(_) | Error::Serialization(_) => {
                Self::new(NoticeLevel::Error, "Error saving data")
            }
            Error::Config(e) => Self::new(NoticeLevel::Error, e.to_string()),
        }
    }
}

impl From<&LoadWarning> for Notice {
    fn from(_: &LoadWarning) -> Self {
        Self::new(NoticeLevel::Error, "Error loading members data")
    }
}
