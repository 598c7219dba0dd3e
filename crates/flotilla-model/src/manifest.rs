// SPDX-License-Identifier: Apache-2.0

use crate::source::ValidationError;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};

pub const MANIFEST_TAG: &str = "flotilla/paths";
pub const MANIFEST_VERSION: &str = "0.1.0";
pub const MANIFEST_MAX_PATHS: usize = 65_536;
pub const CONTENT_LOCATOR_MAX_LEN: usize = 128;

pub fn parse_content_locator(input: &str) -> Result<ContentLocator, ValidationError> {
    ContentLocator::parse(input)
}

/// Opaque reference used to fetch a file's bytes from the content network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct ContentLocator(String);

impl ContentLocator {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.is_empty() {
            return Err(ValidationError(
                "content locator must not be empty".to_string(),
            ));
        }
        if input.len() > CONTENT_LOCATOR_MAX_LEN {
            return Err(ValidationError(format!(
                "content locator exceeds max length {CONTENT_LOCATOR_MAX_LEN}"
            )));
        }
        if URL_SAFE_NO_PAD.decode(input).is_err() {
            return Err(ValidationError(
                "content locator must be base64url without padding".to_string(),
            ));
        }
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

impl Display for ContentLocator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ManifestEntry {
    pub path: String,
    pub id: String,
}

impl ManifestEntry {
    #[must_use]
    pub fn new(path: &str, id: &str) -> Self {
        Self {
            path: path.to_string(),
            id: id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PathTarget {
    id: String,
}

/// The `paths` object of a path manifest. Document order is preserved so
/// first-occurrence-wins policies downstream stay well defined; duplicate
/// keys in malformed input are kept, not collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestPaths(Vec<ManifestEntry>);

impl ManifestPaths {
    #[must_use]
    pub fn from_entries(entries: Vec<ManifestEntry>) -> Self {
        Self(entries)
    }

    #[must_use]
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ManifestPaths {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in &self.0 {
            map.serialize_entry(&entry.path, &PathTarget { id: entry.id.clone() })?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ManifestPaths {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PathsVisitor;

        impl<'de> Visitor<'de> for PathsVisitor {
            type Value = ManifestPaths;

            fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write!(f, "a map of path strings to locator objects")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((path, target)) = access.next_entry::<String, PathTarget>()? {
                    entries.push(ManifestEntry {
                        path,
                        id: target.id,
                    });
                }
                Ok(ManifestPaths(entries))
            }
        }

        deserializer.deserialize_map(PathsVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct ManifestIndex {
    pub path: String,
}

impl ManifestIndex {
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
        }
    }
}

/// Flat untrusted index mapping relative file paths to content locators.
/// Deserialization accepts any map shape; `validate_strict` is where locator
/// syntax and the manifest tag are enforced, so callers can report every
/// offending path instead of failing on the first malformed byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct PathManifest {
    pub manifest: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<ManifestIndex>,
    pub paths: ManifestPaths,
}

impl PathManifest {
    #[must_use]
    pub fn new(entries: Vec<ManifestEntry>) -> Self {
        Self {
            manifest: MANIFEST_TAG.to_string(),
            version: MANIFEST_VERSION.to_string(),
            index: None,
            paths: ManifestPaths::from_entries(entries),
        }
    }

    #[must_use]
    pub fn with_index(mut self, path: &str) -> Self {
        self.index = Some(ManifestIndex::new(path));
        self
    }

    pub fn validate_strict(&self) -> Result<(), ValidationError> {
        if self.manifest != MANIFEST_TAG {
            return Err(ValidationError(format!(
                "manifest tag must be {MANIFEST_TAG}, got {}",
                self.manifest
            )));
        }
        if self.version.trim().is_empty() {
            return Err(ValidationError(
                "manifest version must not be empty".to_string(),
            ));
        }
        if self.paths.len() > MANIFEST_MAX_PATHS {
            return Err(ValidationError(format!(
                "manifest exceeds max path count {MANIFEST_MAX_PATHS}"
            )));
        }
        for entry in self.paths.entries() {
            ContentLocator::parse(&entry.id)
                .map_err(|err| ValidationError(format!("manifest path {}: {err}", entry.path)))?;
        }
        if let Some(index) = &self.index {
            if index.path.trim().is_empty() {
                return Err(ValidationError(
                    "manifest index path must not be empty".to_string(),
                ));
            }
            if !self
                .paths
                .entries()
                .iter()
                .any(|entry| entry.path == index.path)
            {
                return Err(ValidationError(format!(
                    "manifest index path {} must appear in paths",
                    index.path
                )));
            }
        }
        Ok(())
    }

    /// Entries with parsed locators, in document order. Fails on the first
    /// malformed locator; run `validate_strict` first for a full check.
    pub fn locator_entries(&self) -> Result<Vec<(String, ContentLocator)>, ValidationError> {
        self.paths
            .entries()
            .iter()
            .map(|entry| Ok((entry.path.clone(), ContentLocator::parse(&entry.id)?)))
            .collect()
    }
}
