//! Error types for building select statements.

/// Misuse of the fluent builder API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// `on` or `using` was called without a join waiting for a constraint.
    #[error("`{call}` called with no pending join")]
    NoPendingJoin {
        /// The offending builder call.
        call: &'static str,
    },

    /// The pending join entry cannot carry an ON or USING constraint.
    #[error("`{call}` cannot constrain a {kind} join")]
    UnsupportedJoin {
        /// The offending builder call.
        call: &'static str,
        /// The kind of join entry found.
        kind: &'static str,
    },
}

/// Result type for builder operations.
pub type Result<T> = std::result::Result<T, BuildError>;
