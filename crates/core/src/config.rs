//! Runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the
//! server or CLI; nothing reads environment variables while handling requests.

use crate::constants::{DEFAULT_REST_ADDR, DEFAULT_SOURCE_URL};
use crate::{DirectoryError, DirectoryResult};
use std::fmt;
use std::path::PathBuf;

/// Where the doctor data set is loaded from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceLocation {
    /// Fetched with a single GET request.
    Url(String),
    /// Read from a local JSON file.
    File(PathBuf),
}

impl SourceLocation {
    /// Parse a source location from an optional string value.
    ///
    /// `None` or blank gives the default URL; `http://` and `https://` values are
    /// URLs; anything else is treated as a file path.
    pub fn from_env_value(value: Option<String>) -> Self {
        let value = value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        match value {
            None => SourceLocation::Url(DEFAULT_SOURCE_URL.into()),
            Some(v) if v.starts_with("http://") || v.starts_with("https://") => {
                SourceLocation::Url(v)
            }
            Some(v) => SourceLocation::File(PathBuf::from(v)),
        }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        SourceLocation::Url(DEFAULT_SOURCE_URL.into())
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::Url(url) => f.write_str(url),
            SourceLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Directory configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct DirectoryConfig {
    source: SourceLocation,
    rest_addr: String,
}

impl DirectoryConfig {
    /// Create a new `DirectoryConfig`.
    pub fn new(source: SourceLocation, rest_addr: String) -> DirectoryResult<Self> {
        if rest_addr.trim().is_empty() {
            return Err(DirectoryError::InvalidInput(
                "rest address cannot be empty".into(),
            ));
        }

        Ok(Self { source, rest_addr })
    }

    /// Build a config from raw environment values (`DOCTORS_SOURCE`,
    /// `DIRECTORY_REST_ADDR`), applying defaults for absent ones.
    pub fn from_env_values(
        source: Option<String>,
        rest_addr: Option<String>,
    ) -> DirectoryResult<Self> {
        Self::new(
            SourceLocation::from_env_value(source),
            rest_addr.unwrap_or_else(|| DEFAULT_REST_ADDR.into()),
        )
    }

    pub fn source(&self) -> &SourceLocation {
        &self.source
    }

    pub fn rest_addr(&self) -> &str {
        &self.rest_addr
    }
}
