use std::path::PathBuf;
use std::time::Duration;

use kart_core::ErrorKind;
use thiserror::Error;

use crate::format::{MAX_CODE_LEN, MIN_CODE_LEN};

/// Why a coupon code failed the local format check.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum FormatRejection {
    #[error("promo code cannot be empty or whitespace only")]
    Empty,

    #[error("promo code must be at least {MIN_CODE_LEN} characters")]
    TooShort,

    #[error("promo code must be at most {MAX_CODE_LEN} characters")]
    TooLong,

    #[error("promo code must contain only uppercase letters (no numbers or special characters)")]
    BadFormat,
}

/// Failure scanning a single coupon file.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The file could not be opened, or a read failed part way through
    /// (including bytes that are not valid UTF-8 and over-long lines).
    #[error("failed to read coupon file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scan observed its cancellation token and stopped early.
    #[error("scan of {} cancelled", path.display())]
    Cancelled { path: PathBuf },
}

impl ScanError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            ScanError::Io { path, .. } | ScanError::Cancelled { path } => path,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ScanError::Io { .. } => ErrorKind::Io,
            ScanError::Cancelled { .. } => ErrorKind::Cancelled,
        }
    }
}

/// Failure of a whole quorum validation.
///
/// Per-file scan failures never show up here; they only cost that file its vote.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PromoError {
    #[error("at least {required} coupon files required for validation, {configured} configured")]
    Config { required: usize, configured: usize },

    #[error("promo code validation cancelled")]
    Cancelled,

    #[error("promo code validation did not finish within {timeout:?}")]
    DeadlineExceeded { timeout: Duration },
}

impl PromoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PromoError::Config { .. } => ErrorKind::Config,
            PromoError::Cancelled => ErrorKind::Cancelled,
            PromoError::DeadlineExceeded { .. } => ErrorKind::DeadlineExceeded,
        }
    }
}
