//! Promo code validation.
//!
//! A coupon code is accepted when it passes a cheap local format check and is
//! then found in at least two independent coupon files. The files are scanned
//! concurrently and scanning stops as soon as the answer is known.

pub mod error;
pub mod format;
pub mod quorum;
pub mod scanner;

pub use error::{FormatRejection, PromoError, ScanError};
pub use format::{is_well_formed, PromoCode, MAX_CODE_LEN, MIN_CODE_LEN};
pub use quorum::{PromoValidator, QuorumPromoValidator, QUORUM};
pub use scanner::{CodeScanner, FileScanner, CANCEL_CHECK_INTERVAL, MAX_LINE_BYTES};
