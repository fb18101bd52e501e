//! Contract error types for the badge settings service
//!
//! These errors are transport-agnostic and used for inter-module communication.
//! Feed and missing-settings failures never surface here; they degrade to
//! display strings and defaults inside the domain.

/// Badge settings domain errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// Actor lacks the capability required for the operation
    Forbidden {
        /// Capability that was required
        capability: String,
    },
    /// Options store failed to persist the record
    Storage {
        /// Store error message
        message: String,
    },
    /// Template rendering failed
    Render {
        /// Template error message
        message: String,
    },
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forbidden { capability } => {
                write!(f, "Missing required capability: {}", capability)
            }
            Self::Storage { message } => {
                write!(f, "Storage error: {}", message)
            }
            Self::Render { message } => {
                write!(f, "Render error: {}", message)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
