/// Errors that can occur while building a risk assessor.
#[derive(Debug, thiserror::Error)]
pub enum ApprovalError {
    /// A policy pattern is not a valid regular expression.
    #[error("invalid policy pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Compilation failure.
        #[source]
        source: regex::Error,
    },
}

/// Result type for approval operations.
pub type ApprovalResult<T> = Result<T, ApprovalError>;
