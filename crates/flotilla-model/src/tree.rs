// SPDX-License-Identifier: Apache-2.0

use crate::manifest::ContentLocator;
use crate::source::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const ROOT_NAME: &str = "root";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

impl NodeKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Folder => "folder",
        }
    }
}

/// Lowercase suffix after the last `.`, when non-empty. Dotfiles like
/// `.gitignore` do carry one; `Makefile` and `name.` do not.
#[must_use]
pub fn file_extension(name: &str) -> Option<String> {
    let (_, suffix) = name.rsplit_once('.')?;
    if suffix.is_empty() {
        return None;
    }
    Some(suffix.to_lowercase())
}

/// One node of a parsed manifest tree. Folders carry `children` (possibly
/// empty); files carry `locator` and maybe `extension`; the absent side is
/// omitted from JSON rather than serialized as an empty collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct TreeNode {
    pub name: String,
    pub path: String,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locator: Option<ContentLocator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

impl TreeNode {
    /// The synthetic root every tree hangs off: `name = "root"`, empty path.
    #[must_use]
    pub fn root() -> Self {
        Self {
            name: ROOT_NAME.to_string(),
            path: String::new(),
            kind: NodeKind::Folder,
            children: Some(Vec::new()),
            locator: None,
            extension: None,
        }
    }

    #[must_use]
    pub fn folder(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            kind: NodeKind::Folder,
            children: Some(Vec::new()),
            locator: None,
            extension: None,
        }
    }

    #[must_use]
    pub fn file(name: &str, path: &str, locator: ContentLocator) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            kind: NodeKind::File,
            children: None,
            locator: Some(locator),
            extension: file_extension(name),
        }
    }

    #[must_use]
    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    #[must_use]
    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children
            .as_ref()
            .and_then(|children| children.iter().find(|child| child.name == name))
    }

    /// Recursive structural check: field pairing per kind, parent/child path
    /// composition, unique child names, no traversal patterns anywhere.
    pub fn validate_strict(&self) -> Result<(), ValidationError> {
        if self.path.is_empty() {
            if self.name != ROOT_NAME || self.kind != NodeKind::Folder {
                return Err(ValidationError(
                    "only the synthetic root folder may have an empty path".to_string(),
                ));
            }
        } else {
            if self.name.is_empty() {
                return Err(ValidationError(format!(
                    "node at {} must have a name",
                    self.path
                )));
            }
            if self.name.contains('/') || self.name == ".." {
                return Err(ValidationError(format!(
                    "node name {} is not a valid path segment",
                    self.name
                )));
            }
            if self.path.starts_with('/') || self.path.ends_with('/') {
                return Err(ValidationError(format!(
                    "node path {} must not start or end with a slash",
                    self.path
                )));
            }
            if self
                .path
                .split('/')
                .any(|segment| segment.is_empty() || segment == "..")
            {
                return Err(ValidationError(format!(
                    "node path {} contains an empty or traversal segment",
                    self.path
                )));
            }
        }
        match self.kind {
            NodeKind::Folder => {
                if self.locator.is_some() || self.extension.is_some() {
                    return Err(ValidationError(format!(
                        "folder {} must not carry locator or extension",
                        self.path
                    )));
                }
                let Some(children) = &self.children else {
                    return Err(ValidationError(format!(
                        "folder {} must carry children",
                        self.path
                    )));
                };
                let mut names: HashSet<&str> = HashSet::new();
                for child in children {
                    if !names.insert(child.name.as_str()) {
                        return Err(ValidationError(format!(
                            "folder {} has duplicate child name {}",
                            self.path, child.name
                        )));
                    }
                    let expected = if self.path.is_empty() {
                        child.name.clone()
                    } else {
                        format!("{}/{}", self.path, child.name)
                    };
                    if child.path != expected {
                        return Err(ValidationError(format!(
                            "child path {} does not compose from parent, expected {expected}",
                            child.path
                        )));
                    }
                    child.validate_strict()?;
                }
            }
            NodeKind::File => {
                if self.children.is_some() {
                    return Err(ValidationError(format!(
                        "file {} must not carry children",
                        self.path
                    )));
                }
                if self.locator.is_none() {
                    return Err(ValidationError(format!(
                        "file {} must carry a locator",
                        self.path
                    )));
                }
                if self.extension != file_extension(&self.name) {
                    return Err(ValidationError(format!(
                        "file {} extension does not match its name",
                        self.path
                    )));
                }
            }
        }
        Ok(())
    }
}
