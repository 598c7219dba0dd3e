// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Parses untrusted flat path manifests into validated directory trees and
//! flattens trees into rows for virtualized lists. Fully synchronous, no
//! I/O; traversal-shaped paths are dropped with a logged diagnostic rather
//! than aborting the build.

mod build;
mod flatten;
mod path;

pub use build::{build_tree, build_tree_report, SkippedPath};
pub use flatten::{flatten_tree, FlatNode};
pub use path::{sanitize_path, PathRejection, PATH_MAX_SEGMENTS};

pub const CRATE_NAME: &str = "flotilla-manifest";
