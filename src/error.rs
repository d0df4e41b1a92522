//! Error types for splitting and combining

/// Malformed parameters or share shapes, detected before any field arithmetic runs
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("threshold must be at least 2 (got {0})")]
    ThresholdTooLow(usize),

    #[error("threshold cannot exceed 255 (got {0})")]
    ThresholdTooHigh(usize),

    #[error("parts cannot exceed 255 (got {0})")]
    TooManyParts(usize),

    #[error("parts ({parts}) cannot be less than threshold ({threshold})")]
    PartsBelowThreshold { parts: usize, threshold: usize },

    #[error("cannot split an empty secret")]
    EmptySecret,

    #[error("cannot combine without shares")]
    NoShares,

    #[error("cannot combine less than 2 shares (got {0})")]
    TooFewShares(usize),

    #[error("share #{party} is empty")]
    EmptyShare { party: usize },

    #[error("length of secret mismatch: share #{party} has {got} rows, expected {expected}")]
    SecretLengthMismatch {
        party: usize,
        expected: usize,
        got: usize,
    },

    #[error("shares mismatch: share #{party} row {row} has width {got}, expected {expected}")]
    SharesMismatch {
        party: usize,
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("share rows must hold at least 2 coordinates (got {0})")]
    InvalidShareWidth(usize),

    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
}

/// Everything that can go wrong inside the field, the solver or the scheme
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// No non-zero pivot exists in `column`: the supplied hyperplanes are not independent
    #[error("singular system: no pivot in column {column}")]
    SingularSystem { column: usize },

    #[error("division by zero in GF(256)")]
    DivisionByZero,

    #[error("secure random source failed: {0}")]
    RandomSource(#[from] rand::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
