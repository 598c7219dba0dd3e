// SPDX-License-Identifier: Apache-2.0

use crate::canonical;
use crate::manifest::ContentLocator;
use crate::source::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const RECORD_ID_LEN: usize = 64;
pub const PUBLISHER_KEY_LEN: usize = 64;
pub const REPO_NAME_MAX_LEN: usize = 256;
pub const SUMMARY_MAX_LEN: usize = 1024;

pub fn parse_record_id(input: &str) -> Result<RecordId, ValidationError> {
    RecordId::parse(input)
}

pub fn parse_publisher_key(input: &str) -> Result<PublisherKey, ValidationError> {
    PublisherKey::parse(input)
}

fn check_hex_exact(input: &str, expected_len: usize, what: &str) -> Result<(), ValidationError> {
    if input.len() != expected_len {
        return Err(ValidationError(format!(
            "{what} must be exactly {expected_len} characters"
        )));
    }
    if !input.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')) {
        return Err(ValidationError(format!("{what} must be lowercase hex")));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct RecordId(String);

impl RecordId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        check_hex_exact(input, RECORD_ID_LEN, "record id")?;
        Ok(Self(input.to_string()))
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

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct PublisherKey(String);

impl PublisherKey {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        check_hex_exact(input, PUBLISHER_KEY_LEN, "publisher key")?;
        Ok(Self(input.to_string()))
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

impl Display for PublisherKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity and ordering keys used by the merge step. Identity recognizes
/// the same logical record across sources; the record with the highest
/// ordering key wins among duplicates.
pub trait RecordIdentity {
    fn identity_key(&self) -> &str;
    fn ordering_key(&self) -> i64;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct RepoAnnouncement {
    pub id: RecordId,
    pub publisher: PublisherKey,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub published_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_locator: Option<ContentLocator>,
}

impl RepoAnnouncement {
    #[must_use]
    pub fn new(id: RecordId, publisher: PublisherKey, name: &str, published_at: i64) -> Self {
        Self {
            id,
            publisher,
            name: name.to_string(),
            summary: None,
            published_at,
            manifest_locator: None,
        }
    }

    #[must_use]
    pub fn with_summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }

    #[must_use]
    pub fn with_manifest_locator(mut self, locator: ContentLocator) -> Self {
        self.manifest_locator = Some(locator);
        self
    }

    pub fn validate_strict(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError(
                "announcement name must not be empty".to_string(),
            ));
        }
        if self.name.len() > REPO_NAME_MAX_LEN {
            return Err(ValidationError(format!(
                "announcement name exceeds max length {REPO_NAME_MAX_LEN}"
            )));
        }
        if let Some(summary) = &self.summary {
            if summary.len() > SUMMARY_MAX_LEN {
                return Err(ValidationError(format!(
                    "announcement summary exceeds max length {SUMMARY_MAX_LEN}"
                )));
            }
        }
        if self.published_at < 0 {
            return Err(ValidationError(
                "announcement published_at must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Digest of everything except `id`, over canonical JSON. A record whose
    /// id does not equal this digest was not produced from its own content.
    pub fn content_digest(&self) -> Result<String, ValidationError> {
        let mut value = serde_json::to_value(self)
            .map_err(|err| ValidationError(format!("announcement encoding failed: {err}")))?;
        if let Some(fields) = value.as_object_mut() {
            fields.remove("id");
        }
        canonical::stable_json_hash_hex(&value)
            .map_err(|err| ValidationError(format!("announcement digest failed: {err}")))
    }
}

impl RecordIdentity for RepoAnnouncement {
    fn identity_key(&self) -> &str {
        self.id.as_str()
    }

    fn ordering_key(&self) -> i64 {
        self.published_at
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct RecordQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<PublisherKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl RecordQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_kind(mut self, kind: u32) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn with_author(mut self, author: PublisherKey) -> Self {
        self.authors.push(author);
        self
    }

    #[must_use]
    pub fn with_identifier(mut self, identifier: &str) -> Self {
        self.identifier = Some(identifier.to_string());
        self
    }

    #[must_use]
    pub fn with_since(mut self, since: i64) -> Self {
        self.since = Some(since);
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Display for RecordQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(kind) = self.kind {
            parts.push(format!("kind={kind}"));
        }
        if !self.authors.is_empty() {
            parts.push(format!("authors={}", self.authors.len()));
        }
        if let Some(identifier) = &self.identifier {
            parts.push(format!("identifier={identifier}"));
        }
        if let Some(since) = self.since {
            parts.push(format!("since={since}"));
        }
        if let Some(limit) = self.limit {
            parts.push(format!("limit={limit}"));
        }
        if parts.is_empty() {
            write!(f, "unfiltered")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}
