// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

pub const SOURCE_URL_MAX_LEN: usize = 512;
pub const SOURCE_URL_SCHEMES: [&str; 4] = ["wss://", "ws://", "https://", "http://"];

pub fn parse_source_url(input: &str) -> Result<SourceUrl, ValidationError> {
    SourceUrl::parse(input)
}

/// Endpoint of one independent source (relay or gateway). Trailing slashes
/// are stripped so the same endpoint spelled two ways stays one identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct SourceUrl(String);

impl SourceUrl {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError("source url must not be empty".to_string()));
        }
        if trimmed.len() > SOURCE_URL_MAX_LEN {
            return Err(ValidationError(format!(
                "source url exceeds max length {SOURCE_URL_MAX_LEN}"
            )));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(ValidationError(
                "source url must not contain whitespace".to_string(),
            ));
        }
        let Some(rest) = SOURCE_URL_SCHEMES
            .iter()
            .find_map(|scheme| trimmed.strip_prefix(scheme))
        else {
            return Err(ValidationError(
                "source url scheme must be one of wss, ws, https, http".to_string(),
            ));
        };
        let host = rest.split('/').next().unwrap_or_default();
        if host.is_empty() {
            return Err(ValidationError(
                "source url must include a host".to_string(),
            ));
        }
        Ok(Self(trimmed.trim_end_matches('/').to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for SourceUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
