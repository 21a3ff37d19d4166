//! Local shape check for coupon codes.
//!
//! Runs before any coupon file is touched, so malformed input never costs IO.

use core::str::FromStr;

use crate::error::FormatRejection;

pub const MIN_CODE_LEN: usize = 8;
pub const MAX_CODE_LEN: usize = 10;

/// A coupon code that passed the format check: 8 to 10 characters, `A`–`Z` only.
///
/// Holding a `PromoCode` says nothing about whether the code exists; that is
/// decided by the quorum validator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PromoCode(String);

impl PromoCode {
    /// Trim `raw` and check its shape.
    ///
    /// Length is checked before content, so `"ab1"` is `TooShort` rather than
    /// `BadFormat`.
    pub fn parse(raw: &str) -> Result<Self, FormatRejection> {
        let code = raw.trim();
        if code.is_empty() {
            return Err(FormatRejection::Empty);
        }

        let len = code.chars().count();
        if len < MIN_CODE_LEN {
            return Err(FormatRejection::TooShort);
        }
        if len > MAX_CODE_LEN {
            return Err(FormatRejection::TooLong);
        }

        if !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(FormatRejection::BadFormat);
        }

        Ok(Self(code.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `true` when `raw` would parse as a [`PromoCode`].
pub fn is_well_formed(raw: &str) -> bool {
    PromoCode::parse(raw).is_ok()
}

impl FromStr for PromoCode {
    type Err = FormatRejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for PromoCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for PromoCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
