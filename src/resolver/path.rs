//! Parameter path helpers.
//!
//! Paths are always `/`-separated regardless of platform, so `std::path` is
//! not used here.

/// Clean an absolute path: collapse duplicate separators, drop `.` segments,
/// resolve `..` and strip any trailing separator
pub(crate) fn clean(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    format!("/{}", segments.join("/"))
}

/// Join a relative key onto an absolute base path
pub(crate) fn join(base: &str, key: &str) -> String {
    clean(&format!("{base}/{key}"))
}

/// Whether `path` lies under `base`, compared segment-wise
pub(crate) fn is_under(path: &str, base: &str) -> bool {
    if base == "/" {
        return true;
    }
    path == base
        || path
            .strip_prefix(base)
            .is_some_and(|rest| rest.starts_with('/'))
}
