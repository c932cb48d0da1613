use thiserror::Error;

/// All errors returned by `joinery-core`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    /// A dimension set could not be built from the given sizes or sources.
    #[error("invalid join construction: {reason}")]
    Construction { reason: &'static str },

    /// A linear index is outside `[0, count)`.
    #[error("index {index} out of range for join of {count} tuples")]
    IndexOutOfRange { index: u64, count: u64 },

    /// A tuple does not satisfy the dimension bounds or the policy ordering.
    #[error("invalid tuple: {reason}")]
    InvalidTuple { reason: &'static str },

    /// The closed-form cardinality does not fit in a `u64`.
    #[error("tuple count overflows u64")]
    Overflow,

    /// A policy name could not be parsed.
    #[error("unknown policy {input:?}")]
    ParsePolicy { input: String },
}

/// Convenience alias used throughout `joinery-core`.
pub type Result<T> = std::result::Result<T, JoinError>;
