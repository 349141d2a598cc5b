use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// US zip codes are exactly five digits.
const ZIP_LEN: usize = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZipCodeError {
    #[error("must be exactly {ZIP_LEN} digits, got {0} characters")]
    WrongLength(usize),
    #[error("may contain digits only")]
    NonDigit,
}

/// A validated US zip code. Constructing one is the only way a location key
/// reaches the cache or the provider, so anything downstream can treat the
/// inner string as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZipCode(String);

impl ZipCode {
    pub fn new(raw: &str) -> Result<Self, ZipCodeError> {
        let trimmed = raw.trim();
        let len = trimmed.chars().count();
        if len != ZIP_LEN {
            return Err(ZipCodeError::WrongLength(len));
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ZipCodeError::NonDigit);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ZipCode {
    type Err = ZipCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
