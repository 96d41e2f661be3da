use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Directory name under which package managers install dependencies.
const PACKAGE_DIR: &str = "node_modules";

/// Check that a path is absolute and already in canonical form.
///
/// Canonical means re-resolving the path is a no-op: no `.` or `..`
/// segments, no doubled separators and no trailing separator.
pub fn is_canonical(path: &Path) -> bool {
    if !path.is_absolute() {
        return false;
    }
    if path
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::CurDir))
    {
        return false;
    }
    // Rebuilding from components drops redundant separators and interior `.`.
    let rebuilt: PathBuf = path.components().collect();
    rebuilt.as_os_str() == path.as_os_str()
}

/// `path` equals `prefix` or is nested under it.
///
/// The comparison is component-wise, so `/foo2` is not within `/foo`.
pub fn is_within(path: &Path, prefix: &Path) -> bool {
    path.starts_with(prefix)
}

/// `path` is nested under `prefix` and not equal to it.
pub fn is_strictly_within(path: &Path, prefix: &Path) -> bool {
    path != prefix && path.starts_with(prefix)
}

/// Resolve `.` and `..` segments without consulting the filesystem.
///
/// `..` above the root is clamped to the root, matching how hosts resolve
/// absolute paths.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Longest common prefix of two paths, compared segment by segment.
pub fn common_prefix(a: &Path, b: &Path) -> PathBuf {
    a.components()
        .zip(b.components())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x)
        .collect()
}

/// Whether a path has at least one named segment beyond its root.
pub fn has_normal_segment(path: &Path) -> bool {
    path.components()
        .any(|c| matches!(c, Component::Normal(_)))
}

/// Whether `path` passes through `node_modules/<name>/`.
///
/// Scoped names such as `@scope/pkg` span two segments. The package
/// directory must be followed by at least one more segment, so a path that
/// merely ends in `node_modules/<name>` does not match.
pub fn contains_package_dir(path: &Path, name: &str) -> bool {
    let name_segments: Vec<&OsStr> = Path::new(name)
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s),
            _ => None,
        })
        .collect();
    if name_segments.is_empty() {
        return false;
    }

    let segments: Vec<&OsStr> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s),
            _ => None,
        })
        .collect();

    // node_modules + name + at least one trailing segment
    let window = name_segments.len() + 2;
    segments.windows(window).any(|w| {
        w[0] == OsStr::new(PACKAGE_DIR) && w[1..=name_segments.len()] == name_segments[..]
    })
}
