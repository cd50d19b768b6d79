//! Error types for logger setup

/// Result type for logging operations
pub type LogResult<T> = Result<T, LogError>;

/// Errors raised while installing a logger
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum LogError {
    /// The level directive could not be parsed
    #[error("invalid filter '{filter}': {reason}")]
    Filter {
        /// Directive as given
        filter: String,
        /// Parser message
        reason: String,
    },

    /// A global subscriber was installed before this one
    #[error("a global logger is already installed")]
    AlreadyInitialized,
}

impl LogError {
    /// Create a filter parsing error
    pub fn filter(filter: impl Into<String>, reason: impl ToString) -> Self {
        Self::Filter {
            filter: filter.into(),
            reason: reason.to_string(),
        }
    }
}
