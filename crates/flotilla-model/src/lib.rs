// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Flotilla model SSOT.
//!
//! ```compile_fail
//! use flotilla_model::{NodeKind, TreeNode};
//!
//! fn hand_rolled_root() -> TreeNode {
//!     TreeNode {
//!         name: "root".to_string(),
//!         path: String::new(),
//!         kind: NodeKind::Folder,
//!         children: None,
//!         locator: None,
//!         extension: None,
//!     }
//! }
//! ```

mod canonical;
mod manifest;
mod record;
mod report;
mod source;
mod tree;

pub use canonical::{sha256_hex, stable_json_bytes, stable_json_hash_hex};
pub use manifest::{
    parse_content_locator, ContentLocator, ManifestEntry, ManifestIndex, ManifestPaths,
    PathManifest, CONTENT_LOCATOR_MAX_LEN, MANIFEST_MAX_PATHS, MANIFEST_TAG, MANIFEST_VERSION,
};
pub use record::{
    parse_publisher_key, parse_record_id, PublisherKey, RecordId, RecordIdentity, RecordQuery,
    RepoAnnouncement, PUBLISHER_KEY_LEN, RECORD_ID_LEN, REPO_NAME_MAX_LEN, SUMMARY_MAX_LEN,
};
pub use report::{AggregateQueryReport, SourceQueryResult, SourceStatus};
pub use source::{
    parse_source_url, SourceUrl, ValidationError, SOURCE_URL_MAX_LEN, SOURCE_URL_SCHEMES,
};
pub use tree::{file_extension, NodeKind, TreeNode, ROOT_NAME};

pub const CRATE_NAME: &str = "flotilla-model";
