//! Core type definitions with validation.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Client names are lowercase ASCII letters, digits and underscores.
static CLIENT_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_]+$").unwrap());

/// Validation errors for core types.
///
/// The messages are part of the tool's user-facing output.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The client name contains characters outside `[a-z0-9_]` or is empty.
    #[error("invalid client name")]
    InvalidClientName { name: String },

    /// A count, price or table number was zero or negative.
    #[error("value must be more than zero")]
    NotPositive { value: i64 },

    /// A number exceeded its upper bound.
    #[error("value is too big")]
    TooBig { value: i64, max: i64 },
}

/// A validated client identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientName(String);

impl ClientName {
    /// Creates a new name after validation.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if !CLIENT_NAME_RE.is_match(&name) {
            return Err(ValidationError::InvalidClientName { name });
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ClientName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClientName> for String {
    fn from(name: ClientName) -> Self {
        name.0
    }
}

impl fmt::Display for ClientName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ClientName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A table number, `1..=table_count` once validated against a [`ClubConfig`](crate::ClubConfig).
pub type TableNumber = u32;

/// Checks that `value` is strictly positive and fits in `T`.
pub fn positive<T: TryFrom<i64>>(value: i64) -> Result<T, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NotPositive { value });
    }
    T::try_from(value).map_err(|_| ValidationError::TooBig {
        value,
        max: i64::MAX,
    })
}

/// Checks that `value` is in `1..=max`.
pub fn bounded(value: i64, max: TableNumber) -> Result<TableNumber, ValidationError> {
    let table: TableNumber = positive(value)?;
    if table > max {
        return Err(ValidationError::TooBig {
            value,
            max: i64::from(max),
        });
    }
    Ok(table)
}
