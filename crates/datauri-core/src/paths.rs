//! Path arithmetic for resolving `url(...)` references.
//!
//! Nothing here touches the filesystem: paths are joined and normalized
//! lexically, the way a build runner's `resolve` does.

use std::path::{Component, Path, PathBuf};

/// Joins `rel` onto `base` and normalizes the result. An absolute `rel` replaces `base`.
pub fn resolve(base: &Path, rel: impl AsRef<Path>) -> PathBuf {
    normalize(&base.join(rel))
}

/// Removes `.` components and folds `..` into the preceding component.
///
/// `..` directly under the root is dropped; leading `..` of a relative path is kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Normal(segment) => out.push(segment),
        }
    }
    out
}

/// Rewrites a root-absolute web path (`/img/a.png`) to be relative to the base dir (`./img/a.png`).
pub fn fix_root_relative(uri: &str) -> String {
    if uri.starts_with('/') {
        format!(".{uri}")
    } else {
        uri.to_string()
    }
}

/// Reinterprets `relative` (written against `base`) as seen from `dest`.
///
/// - One leading `./` is always stripped.
/// - `dest == base`: unchanged.
/// - `dest` is an ancestor of `base`: one leading `../` is stripped per hop.
/// - `dest` is a descendant of `base`: one `../` is prepended per hop.
/// - Unrelated directories: unchanged.
///
/// A hop is one component of the relative path between `base` and `dest`.
pub fn adjust_directory_level(relative: &str, dest: &Path, base: &Path) -> String {
    let mut adjusted = relative.strip_prefix("./").unwrap_or(relative).to_string();

    if dest == base {
        return adjusted;
    }

    let hops = pathdiff::diff_paths(dest, base)
        .map(|p| p.components().count())
        .unwrap_or(0);

    if base.starts_with(dest) {
        for _ in 0..hops {
            if let Some(rest) = adjusted.strip_prefix("../") {
                adjusted = rest.to_string();
            }
        }
    } else if dest.starts_with(base) {
        for _ in 0..hops {
            adjusted.insert_str(0, "../");
        }
    }

    adjusted
}
