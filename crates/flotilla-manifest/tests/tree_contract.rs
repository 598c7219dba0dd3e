// SPDX-License-Identifier: Apache-2.0

use flotilla_manifest::{
    build_tree, build_tree_report, flatten_tree, PathRejection, PATH_MAX_SEGMENTS,
};
use flotilla_model::{ContentLocator, NodeKind, TreeNode};
use std::collections::HashSet;

fn locator(tag: char) -> ContentLocator {
    let mut raw = tag.to_string().repeat(42);
    raw.push('A');
    ContentLocator::parse(&raw).expect("locator")
}

fn entries(pairs: &[(&str, char)]) -> Vec<(String, ContentLocator)> {
    pairs
        .iter()
        .map(|(path, tag)| ((*path).to_string(), locator(*tag)))
        .collect()
}

fn expanded(paths: &[&str]) -> HashSet<String> {
    paths.iter().map(|path| (*path).to_string()).collect()
}

fn child_names(node: &TreeNode) -> Vec<&str> {
    node.children
        .as_ref()
        .expect("folder children")
        .iter()
        .map(|child| child.name.as_str())
        .collect()
}

#[test]
fn empty_manifest_builds_empty_root() {
    let root = build_tree(Vec::new());
    assert_eq!(root.name, "root");
    assert_eq!(root.path, "");
    assert_eq!(root.kind, NodeKind::Folder);
    assert_eq!(root.children.as_deref(), Some(&[][..]));
    assert!(root.validate_strict().is_ok());
}

#[test]
fn traversal_shaped_paths_leave_root_empty() {
    for bad in ["a/../b", "/abs", ""] {
        let root = build_tree(entries(&[(bad, 'a')]));
        assert_eq!(
            root.children.as_ref().expect("root children").len(),
            0,
            "path {bad:?} must be rejected"
        );
    }
}

#[test]
fn skip_report_carries_rejection_codes() {
    let (root, skipped) = build_tree_report(entries(&[
        ("ok.txt", 'a'),
        ("a/../b", 'b'),
        ("/abs", 'c'),
        ("", 'd'),
    ]));
    assert_eq!(root.children.as_ref().expect("root children").len(), 1);
    let reasons: Vec<(&str, PathRejection)> = skipped
        .iter()
        .map(|skip| (skip.path.as_str(), skip.reason))
        .collect();
    assert_eq!(
        reasons,
        vec![
            ("a/../b", PathRejection::TraversalSegment),
            ("/abs", PathRejection::AbsolutePath),
            ("", PathRejection::EmptyPath),
        ]
    );
}

#[test]
fn overdeep_paths_are_skipped_not_built() {
    let beyond = vec!["d"; 12_000].join("/");
    let at_cap = vec!["d"; PATH_MAX_SEGMENTS].join("/");
    let (root, skipped) =
        build_tree_report(entries(&[(beyond.as_str(), 'a'), (at_cap.as_str(), 'b')]));
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].path, beyond);
    assert_eq!(skipped[0].reason, PathRejection::TooManySegments);
    assert_eq!(root.children.as_ref().expect("root children").len(), 1);
    assert!(root.validate_strict().is_ok());
}

#[test]
fn nested_paths_create_intermediate_folders() {
    let root = build_tree(entries(&[
        ("src/index.ts", 'a'),
        ("src/lib/utils.ts", 'b'),
    ]));
    assert!(root.validate_strict().is_ok());
    assert_eq!(child_names(&root), vec!["src"]);

    let src = root.child("src").expect("src");
    assert_eq!(src.kind, NodeKind::Folder);
    assert_eq!(src.path, "src");
    assert_eq!(child_names(src), vec!["lib", "index.ts"]);

    let index = src.child("index.ts").expect("index.ts");
    assert_eq!(index.kind, NodeKind::File);
    assert_eq!(index.extension.as_deref(), Some("ts"));
    assert_eq!(index.locator, Some(locator('a')));

    let lib = src.child("lib").expect("lib");
    assert_eq!(lib.kind, NodeKind::Folder);
    let utils = lib.child("utils.ts").expect("utils.ts");
    assert_eq!(utils.path, "src/lib/utils.ts");
    assert_eq!(utils.locator, Some(locator('b')));
}

#[test]
fn duplicate_paths_keep_the_first_locator() {
    let root = build_tree(entries(&[("docs/a.md", 'a'), ("docs/a.md", 'b')]));
    let docs = root.child("docs").expect("docs");
    assert_eq!(child_names(docs), vec!["a.md"]);
    let file = docs.child("a.md").expect("a.md");
    assert_eq!(file.locator, Some(locator('a')));
}

#[test]
fn kind_clashes_keep_the_first_occurrence() {
    let file_first = build_tree(entries(&[("a", 'a'), ("a/b.txt", 'b')]));
    let a = file_first.child("a").expect("a");
    assert_eq!(a.kind, NodeKind::File);
    assert_eq!(a.locator, Some(locator('a')));

    let folder_first = build_tree(entries(&[("a/b.txt", 'b'), ("a", 'a')]));
    let a = folder_first.child("a").expect("a");
    assert_eq!(a.kind, NodeKind::Folder);
    assert_eq!(child_names(a), vec!["b.txt"]);
    assert!(folder_first.validate_strict().is_ok());
}

#[test]
fn children_sort_folders_first_then_case_insensitive() {
    let root = build_tree(entries(&[
        ("zeta.txt", 'a'),
        ("beta/y.txt", 'b'),
        ("APPLE.txt", 'c'),
        ("Alpha/x.txt", 'd'),
        ("index.html", 'e'),
    ]));
    assert_eq!(
        child_names(&root),
        vec!["Alpha", "beta", "APPLE.txt", "index.html", "zeta.txt"]
    );
}

#[test]
fn odd_segment_bytes_pass_through() {
    let root = build_tree(entries(&[("we\u{0}ird/file.txt", 'a')]));
    assert!(root.validate_strict().is_ok());
    let folder = root.child("we\u{0}ird").expect("odd folder");
    assert_eq!(child_names(folder), vec!["file.txt"]);
}

#[test]
fn flatten_without_expansion_lists_top_level_only() {
    let root = build_tree(entries(&[
        ("src/index.ts", 'a'),
        ("src/lib/utils.ts", 'b'),
        ("zeta.txt", 'c'),
    ]));
    let top = root.children.as_deref().expect("root children");
    let rows = flatten_tree(top, &expanded(&[]));
    let seen: Vec<(&str, usize)> = rows
        .iter()
        .map(|row| (row.node.name.as_str(), row.level))
        .collect();
    assert_eq!(seen, vec![("src", 0), ("zeta.txt", 0)]);
}

#[test]
fn flatten_inlines_expanded_folder_children_before_later_siblings() {
    let root = build_tree(entries(&[
        ("src/index.ts", 'a'),
        ("src/lib/utils.ts", 'b'),
        ("zeta.txt", 'c'),
    ]));
    let top = root.children.as_deref().expect("root children");

    let rows = flatten_tree(top, &expanded(&["src"]));
    let seen: Vec<(&str, usize)> = rows
        .iter()
        .map(|row| (row.node.name.as_str(), row.level))
        .collect();
    assert_eq!(
        seen,
        vec![("src", 0), ("lib", 1), ("index.ts", 1), ("zeta.txt", 0)]
    );

    let deep_rows = flatten_tree(top, &expanded(&["src", "src/lib"]));
    let deep: Vec<(&str, usize)> = deep_rows
        .iter()
        .map(|row| (row.node.name.as_str(), row.level))
        .collect();
    assert_eq!(
        deep,
        vec![
            ("src", 0),
            ("lib", 1),
            ("utils.ts", 2),
            ("index.ts", 1),
            ("zeta.txt", 0)
        ]
    );
}

#[test]
fn flatten_ignores_expansion_of_collapsed_ancestors() {
    let root = build_tree(entries(&[("src/lib/utils.ts", 'a'), ("readme.md", 'b')]));
    let top = root.children.as_deref().expect("root children");
    let rows = flatten_tree(top, &expanded(&["src/lib"]));
    let seen: Vec<&str> = rows.iter().map(|row| row.node.name.as_str()).collect();
    assert_eq!(seen, vec!["src", "readme.md"]);
}
