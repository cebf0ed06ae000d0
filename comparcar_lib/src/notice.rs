//! User-facing outcome messages.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A short message announcing the outcome of a user action.
///
/// Backend and network failures are not distinguished here: every failure
/// produces the same generic message for its action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: &str) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.to_string(),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }

    pub fn car_deleted() -> Self {
        Self::success("Car deleted successfully")
    }

    pub fn delete_failed() -> Self {
        Self::error("Failed to delete car")
    }

    pub fn car_created() -> Self {
        Self::success("Car created successfully!")
    }

    pub fn create_failed() -> Self {
        Self::error("Failed to create car")
    }

    pub fn car_updated() -> Self {
        Self::success("Car updated successfully!")
    }

    pub fn update_failed() -> Self {
        Self::error("Failed to update car")
    }

    pub fn list_failed() -> Self {
        Self::error("Error loading cars. Please try again.")
    }

    pub fn car_load_failed() -> Self {
        Self::error("Error loading car. Please retry or go back.")
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
