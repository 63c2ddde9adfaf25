//! # Path Utilities

use std::{
    ffi::OsString,
    path::{Component, Path, PathBuf},
};

/// Append `suffix` to the final component of `path`.
///
/// `"data/corpus.txt"` with `".vocab.json"` becomes `"data/corpus.txt.vocab.json"`.
pub fn with_suffix<P: AsRef<Path>>(
    path: P,
    suffix: &str,
) -> PathBuf {
    let mut name: OsString = path.as_ref().as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Flatten a path into a single file name.
///
/// Components are joined with `"__"`. Within a component, `%` and `_` are
/// escaped as `%25` and `%5F`, so the separator never occurs inside a part
/// and distinct paths flatten to distinct names. The root becomes an empty
/// leading part, `..` is kept as `".."`, and `.` components are dropped.
pub fn flatten_path<P: AsRef<Path>>(path: P) -> OsString {
    let parts: Vec<String> = path
        .as_ref()
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(escape_component(&part.to_string_lossy())),
            Component::Prefix(prefix) => {
                Some(escape_component(&prefix.as_os_str().to_string_lossy()))
            }
            Component::RootDir => Some(String::new()),
            Component::ParentDir => Some("..".to_string()),
            Component::CurDir => None,
        })
        .collect();
    parts.join("__").into()
}

fn escape_component(part: &str) -> String {
    let mut escaped = String::with_capacity(part.len());
    for c in part.chars() {
        match c {
            '%' => escaped.push_str("%25"),
            '_' => escaped.push_str("%5F"),
            c => escaped.push(c),
        }
    }
    escaped
}
