//! Chart ids and submission tokens. Validated once at construction, never on use.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::IdentifierError;

/// Pattern every chart id must fully match.
pub const CHART_ID_PATTERN: &str = "[a-z_]+";

/// Pattern every submission token must fully match.
pub const TOKEN_PATTERN: &str = "[a-z0-9]{30}";

static CHART_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{CHART_ID_PATTERN}$")).expect("chart id pattern is valid")
});

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{TOKEN_PATTERN}$")).expect("token pattern is valid")
});

/// Identity key of a chart inside a registry and inside the payload's `data` object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChartId(String);

impl ChartId {
    pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
        let value = value.into();
        if !CHART_ID_RE.is_match(&value) {
            return Err(IdentifierError::InvalidChartId {
                value,
                pattern: CHART_ID_PATTERN,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ChartId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for ChartId {
    type Error = IdentifierError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Bearer credential sent with every submission.
///
/// `Debug` redacts the value so tokens never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
        let value = value.into();
        if !TOKEN_RE.is_match(&value) {
            return Err(IdentifierError::InvalidToken {
                length: value.len(),
                pattern: TOKEN_PATTERN,
            });
        }
        Ok(Self(value))
    }

    /// The raw token, for the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

impl TryFrom<&str> for Token {
    type Error = IdentifierError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
