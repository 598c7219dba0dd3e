// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

/// Deepest path the tree will accept. Insertion, sorting, validation, and
/// flattening all recurse once per segment, so depth is bounded here where
/// untrusted paths first arrive.
pub const PATH_MAX_SEGMENTS: usize = 512;

/// Why a manifest path was refused. Stable codes, logged with every skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PathRejection {
    EmptyPath,
    AbsolutePath,
    TraversalSegment,
    NoSegments,
    TooManySegments,
}

impl PathRejection {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyPath => "empty_path",
            Self::AbsolutePath => "absolute_path",
            Self::TraversalSegment => "traversal_segment",
            Self::NoSegments => "no_segments",
            Self::TooManySegments => "too_many_segments",
        }
    }
}

impl Display for PathRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Splits an untrusted manifest path into segments, refusing the traversal
/// patterns (empty input, a `..` segment, a leading `/`, nothing left after
/// dropping empty segments) and paths deeper than [`PATH_MAX_SEGMENTS`].
/// Everything else passes through untouched; odd bytes inside a segment are
/// the content layer's problem, not ours.
pub fn sanitize_path(path: &str) -> Result<Vec<&str>, PathRejection> {
    if path.is_empty() {
        return Err(PathRejection::EmptyPath);
    }
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();
    if segments.iter().any(|segment| *segment == "..") {
        return Err(PathRejection::TraversalSegment);
    }
    if path.starts_with('/') {
        return Err(PathRejection::AbsolutePath);
    }
    if segments.is_empty() {
        return Err(PathRejection::NoSegments);
    }
    if segments.len() > PATH_MAX_SEGMENTS {
        return Err(PathRejection::TooManySegments);
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_each_traversal_pattern_with_its_code() {
        assert_eq!(sanitize_path(""), Err(PathRejection::EmptyPath));
        assert_eq!(sanitize_path("a/../b"), Err(PathRejection::TraversalSegment));
        assert_eq!(sanitize_path("/abs"), Err(PathRejection::AbsolutePath));
        assert_eq!(sanitize_path("//"), Err(PathRejection::AbsolutePath));
    }

    #[test]
    fn traversal_wins_over_absolute_for_diagnostics() {
        assert_eq!(sanitize_path("/.."), Err(PathRejection::TraversalSegment));
    }

    #[test]
    fn keeps_odd_segments_as_opaque_data() {
        assert_eq!(
            sanitize_path("a/..b/.hidden"),
            Ok(vec!["a", "..b", ".hidden"])
        );
        assert_eq!(sanitize_path("nul\0byte"), Ok(vec!["nul\0byte"]));
        assert_eq!(sanitize_path("a//b"), Ok(vec!["a", "b"]));
    }

    #[test]
    fn caps_segment_count() {
        let at_cap = vec!["a"; PATH_MAX_SEGMENTS].join("/");
        assert_eq!(
            sanitize_path(&at_cap).expect("at cap").len(),
            PATH_MAX_SEGMENTS
        );
        let beyond = vec!["a"; PATH_MAX_SEGMENTS + 1].join("/");
        assert_eq!(sanitize_path(&beyond), Err(PathRejection::TooManySegments));
    }

    #[test]
    fn rejection_codes_are_stable() {
        assert_eq!(PathRejection::EmptyPath.as_str(), "empty_path");
        assert_eq!(PathRejection::AbsolutePath.as_str(), "absolute_path");
        assert_eq!(PathRejection::TraversalSegment.as_str(), "traversal_segment");
        assert_eq!(PathRejection::NoSegments.as_str(), "no_segments");
        assert_eq!(PathRejection::TooManySegments.as_str(), "too_many_segments");
    }
}
