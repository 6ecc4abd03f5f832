//! Error types for the SigStack core.

/// Core error type for SigStack infrastructure.
#[derive(Debug, thiserror::Error)]
pub enum SigStackError {
    /// Unknown signature-version name in catalog data.
    #[error("invalid signing method: {0} (expected v4, v2, s3, or s3v4)")]
    InvalidSigningMethod(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience result type for SigStack operations.
pub type SigStackResult<T> = Result<T, SigStackError>;
