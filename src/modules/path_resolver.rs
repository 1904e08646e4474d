//! Request path resolution
//!
//! Maps an inbound request path onto the document root: strips any query or
//! fragment, percent-decodes, drops the leading slash and one trailing
//! slash, swaps in the host path separator, and resolves directories to
//! their index file. Paths that try to climb out of the root are classified
//! missing without ever touching the filesystem.

use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};

/// Index files probed, in priority order, when a request names a directory.
pub const INDEX_FILES: [&str; 4] = ["index.html", "index.htm", "default.html", "default.htm"];

/// What a request path turned out to name on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// A regular file, ready to stream.
    RegularFile,
    /// A directory with no index file in it.
    Directory,
    /// Nothing usable on disk, or a path rejected outright.
    Missing,
}

/// Outcome of resolving one request path against the document root.
#[derive(Debug, Clone)]
pub struct ResolvedTarget {
    /// Absolute path of the candidate on disk. Only meaningful for
    /// `RegularFile` targets; error paths use `relative` instead.
    pub path: PathBuf,
    /// The candidate relative to the root, for logs and error bodies.
    /// Never exposes the absolute root.
    pub relative: PathBuf,
    pub kind: TargetKind,
    /// The request named a directory, before index resolution. Drives the
    /// trailing-slash redirect.
    pub directory_request: bool,
}

/// Drop a `?query` or `#fragment` suffix from a request target.
pub fn strip_query_and_fragment(raw: &str) -> &str {
    let path = raw.split('?').next().unwrap_or(raw);
    path.split('#').next().unwrap_or(path)
}

/// Reshape a decoded request path into a root-relative filesystem path:
/// no leading slash, at most the inner slashes, host separators.
fn massage_request_path(decoded: &str) -> String {
    let mut path = decoded.strip_prefix('/').unwrap_or(decoded).to_string();
    if path.ends_with('/') {
        path.pop();
    }
    if MAIN_SEPARATOR != '/' {
        path = path.replace('/', MAIN_SEPARATOR_STR);
    }
    path
}

/// A relative path is served only if every component stays below the root.
/// Parent, rooted, and drive-prefixed components would escape it (a rooted
/// component would replace the root entirely when joined).
fn stays_within_root(relative: &Path) -> bool {
    relative.components().all(|component| {
        matches!(component, Component::Normal(_) | Component::CurDir)
    })
}

/// Resolve `raw_target` (as it appeared on the request line) against `root`.
pub fn resolve(root: &Path, raw_target: &str) -> ResolvedTarget {
    let request_path = strip_query_and_fragment(raw_target);

    let decoded = match urlencoding::decode(request_path) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => {
            // Undecodable percent sequences cannot name anything we serve.
            return ResolvedTarget {
                path: root.to_path_buf(),
                relative: PathBuf::from(massage_request_path(request_path)),
                kind: TargetKind::Missing,
                directory_request: false,
            };
        }
    };

    let mut relative = PathBuf::from(massage_request_path(&decoded));
    if !stays_within_root(&relative) {
        return ResolvedTarget {
            path: root.to_path_buf(),
            relative,
            kind: TargetKind::Missing,
            directory_request: false,
        };
    }

    let mut candidate = root.join(&relative);
    let directory_request = candidate.is_dir();
    if directory_request {
        for index_file in INDEX_FILES {
            let indexed = candidate.join(index_file);
            if indexed.is_file() {
                candidate = indexed;
                relative = relative.join(index_file);
                break;
            }
        }
    }

    let kind = if candidate.is_file() {
        TargetKind::RegularFile
    } else if candidate.is_dir() {
        TargetKind::Directory
    } else {
        TargetKind::Missing
    };

    ResolvedTarget {
        path: candidate,
        relative,
        kind,
        directory_request,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample_root() -> TempDir {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("index.html"), "<html>home</html>").unwrap();
        fs::write(root.path().join("plain.txt"), "plain text").unwrap();
        fs::write(root.path().join("hello world.txt"), "decoded").unwrap();
        fs::create_dir(root.path().join("docs")).unwrap();
        fs::write(root.path().join("docs").join("index.htm"), "docs index").unwrap();
        fs::write(root.path().join("docs").join("default.html"), "docs default").unwrap();
        fs::create_dir(root.path().join("empty")).unwrap();
        root
    }

    #[test]
    fn test_resolves_regular_file() {
        let root = sample_root();
        let target = resolve(root.path(), "/plain.txt");
        assert_eq!(target.kind, TargetKind::RegularFile);
        assert_eq!(target.path, root.path().join("plain.txt"));
        assert_eq!(target.relative, PathBuf::from("plain.txt"));
        assert!(!target.directory_request);
    }

    #[test]
    fn test_root_request_resolves_to_index() {
        let root = sample_root();
        let target = resolve(root.path(), "/");
        assert_eq!(target.kind, TargetKind::RegularFile);
        assert_eq!(target.path, root.path().join("index.html"));
        assert_eq!(target.relative, PathBuf::from("index.html"));
        assert!(target.directory_request);
    }

    #[test]
    fn test_index_files_probed_in_order() {
        let root = sample_root();
        // docs/ has both index.htm and default.html; index.htm wins.
        let target = resolve(root.path(), "/docs/");
        assert_eq!(target.kind, TargetKind::RegularFile);
        assert_eq!(target.path, root.path().join("docs").join("index.htm"));
        assert_eq!(target.relative, PathBuf::from("docs").join("index.htm"));
    }

    #[test]
    fn test_directory_without_index_stays_directory() {
        let root = sample_root();
        let target = resolve(root.path(), "/empty/");
        assert_eq!(target.kind, TargetKind::Directory);
        assert!(target.directory_request);
        assert_eq!(target.relative, PathBuf::from("empty"));
    }

    #[test]
    fn test_directory_request_flag_without_trailing_slash() {
        let root = sample_root();
        let target = resolve(root.path(), "/docs");
        assert!(target.directory_request);
        assert_eq!(target.kind, TargetKind::RegularFile);
    }

    #[test]
    fn test_missing_path() {
        let root = sample_root();
        let target = resolve(root.path(), "/nope.html");
        assert_eq!(target.kind, TargetKind::Missing);
        assert_eq!(target.relative, PathBuf::from("nope.html"));
        assert!(!target.directory_request);
    }

    #[test]
    fn test_query_and_fragment_are_dropped() {
        let root = sample_root();
        let target = resolve(root.path(), "/plain.txt?cache=no#section");
        assert_eq!(target.kind, TargetKind::RegularFile);
        assert_eq!(target.path, root.path().join("plain.txt"));
    }

    #[test]
    fn test_percent_decoding() {
        let root = sample_root();
        let target = resolve(root.path(), "/hello%20world.txt");
        assert_eq!(target.kind, TargetKind::RegularFile);
        assert_eq!(target.path, root.path().join("hello world.txt"));
    }

    #[test]
    fn test_parent_components_are_rejected() {
        let outer = tempfile::tempdir().unwrap();
        let www = outer.path().join("www");
        fs::create_dir(&www).unwrap();
        fs::write(outer.path().join("secret.txt"), "secret").unwrap();

        let target = resolve(&www, "/../secret.txt");
        assert_eq!(target.kind, TargetKind::Missing);

        // Percent-encoded dots decode to the same thing and get the same answer.
        let target = resolve(&www, "/%2e%2e/secret.txt");
        assert_eq!(target.kind, TargetKind::Missing);
    }

    #[test]
    fn test_double_leading_slash_is_rejected() {
        let root = sample_root();
        // Stripping one slash leaves a rooted path, which must not replace
        // the document root on join.
        let target = resolve(root.path(), "//etc/passwd");
        assert_eq!(target.kind, TargetKind::Missing);
    }

    #[test]
    fn test_trailing_slash_is_stripped_once() {
        let root = sample_root();
        let target = resolve(root.path(), "/plain.txt/");
        // "plain.txt/" names the file after massaging; it still resolves.
        assert_eq!(target.kind, TargetKind::RegularFile);
        assert!(!target.directory_request);
    }
}
