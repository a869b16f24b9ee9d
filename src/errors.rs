//! Error handling for the ballot index

/// Result type alias for the ballot index
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the ballot index
///
/// Missing keys are never errors: lookups return `Option` and deletes
/// return `bool`. Only caller contract violations end up here.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Point index outside the structure's logical length
    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Inclusive range that is inverted or exceeds the logical length
    #[error("Invalid range [{left}, {right}] for length {len}")]
    InvalidRange { left: usize, right: usize, len: usize },

    /// Validation errors
    #[error("Validation failed: {field}")]
    Validation { field: String },

    /// Registry rule violations (duplicates, unknown ids, double votes)
    #[error("Registry error: {message}")]
    Registry { message: String },

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl Error {
    /// Create a new out-of-bounds error
    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds { index, len }
    }

    /// Create a new invalid range error
    pub fn invalid_range(left: usize, right: usize, len: usize) -> Self {
        Self::InvalidRange { left, right, len }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
        }
    }

    /// Create a new registry error
    pub fn registry(message: impl Into<String>) -> Self {
        Self::Registry {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Convenience macros for creating specific error types
#[macro_export]
macro_rules! registry_error {
    ($msg:expr) => {
        $crate::Error::registry($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::registry(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! validation_error {
    ($msg:expr) => {
        $crate::Error::validation($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::validation(format!($fmt, $($arg)*))
    };
}
