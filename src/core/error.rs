use thiserror::Error;

/// Errors raised by the analog search engine.
///
/// Insufficient history is not an error: searches over a series that is too
/// short return an empty result instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalogError {
    /// A value handed to one of the building blocks violates its domain
    /// (empty-vs-nonempty DTW, zero window length, bad dates or prices).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A caller-supplied search parameter is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AnalogError>;
