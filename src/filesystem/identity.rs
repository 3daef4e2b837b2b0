use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};

use snafu::{ResultExt, Snafu};
use tracing::debug;

use crate::ext::BestEffortPathExt;

/// Identifies a file independently of the path string used to reach it.
///
/// Unix platforms compare device and inode numbers. Elsewhere the
/// canonicalized absolute path is used, which fails to match when the same
/// file is reachable through two distinct canonical paths (hard links).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FileIdentity {
    #[cfg(unix)]
    Inode { dev: u64, ino: u64 },
    #[cfg(not(unix))]
    CanonicalPath(PathBuf),
}

impl FileIdentity {
    /// Resolves the identity of an existing file.
    ///
    /// Returns `Ok(None)` when nothing exists at `path` yet, since a file
    /// that does not exist can not show up in a directory listing either.
    pub fn resolve(path: &Path) -> Result<Option<Self>, IdentityError> {
        let metadata = match path.metadata() {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(
                    "{} does not exist, nothing to exclude",
                    path.best_effort_path_display()
                );
                return Ok(None);
            }
            Err(e) => {
                return Err(e).context(MetadataSnafu {
                    path: path.to_path_buf(),
                });
            }
        };

        Self::from_metadata(path, &metadata).map(Some)
    }

    /// Builds the identity of `path` from metadata that was already fetched.
    pub fn from_metadata(path: &Path, metadata: &Metadata) -> Result<Self, IdentityError> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::MetadataExt;
            let _ = path;
            Ok(FileIdentity::Inode {
                dev: metadata.dev(),
                ino: metadata.ino(),
            })
        }
        #[cfg(not(unix))]
        {
            let _ = metadata;
            path.canonicalize()
                .map(FileIdentity::CanonicalPath)
                .context(CanonicalizeSnafu {
                    path: path.to_path_buf(),
                })
        }
    }

    /// Checks whether the file at `path` is the file this identity points to.
    ///
    /// Any failure to resolve the candidate counts as "not the same file".
    pub fn matches(&self, path: &Path, metadata: &Metadata) -> bool {
        match Self::from_metadata(path, metadata) {
            Ok(other) => *self == other,
            Err(e) => {
                debug!("Could not resolve identity: {e}");
                false
            }
        }
    }
}

#[derive(Debug, Snafu)]
#[cfg_attr(unix, allow(dead_code))]
pub enum IdentityError {
    #[snafu(display("Failed to read metadata of {}", path.best_effort_path_display()))]
    MetadataError { path: PathBuf, source: io::Error },
    #[snafu(display("Failed to canonicalize {}", path.best_effort_path_display()))]
    CanonicalizeError { path: PathBuf, source: io::Error },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn resolve_returns_none_for_missing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let missing = temp_dir.path().join("README.md");

        let identity = FileIdentity::resolve(&missing).expect("Resolving should not fail");
        assert!(identity.is_none());
    }

    #[test]
    fn identity_matches_through_different_path_strings() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir(temp_dir.path().join("sub")).expect("Failed to create dir");
        let file = temp_dir.path().join("README.md");
        fs::write(&file, "# Notes\n").expect("Failed to write file");

        let roundabout = temp_dir.path().join("sub").join("..").join("README.md");
        let identity = FileIdentity::resolve(&roundabout)
            .expect("Resolving should not fail")
            .expect("File exists");

        let metadata = fs::metadata(&file).expect("Failed to read metadata");
        assert!(identity.matches(&file, &metadata));
    }

    #[test]
    fn identity_does_not_match_other_file_with_same_name() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir(temp_dir.path().join("sub")).expect("Failed to create dir");
        let output = temp_dir.path().join("README.md");
        let other = temp_dir.path().join("sub").join("README.md");
        fs::write(&output, "").expect("Failed to write file");
        fs::write(&other, "").expect("Failed to write file");

        let identity = FileIdentity::resolve(&output)
            .expect("Resolving should not fail")
            .expect("File exists");

        let metadata = fs::metadata(&other).expect("Failed to read metadata");
        assert!(!identity.matches(&other, &metadata));
    }

    #[test]
    fn identity_error_display_names_path() {
        let error = IdentityError::MetadataError {
            path: PathBuf::from("/this/path/does/not/exist.md"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };

        let message = error.to_string();
        assert!(message.contains("Failed to read metadata"));
        assert!(message.contains("/this/path/does/not/exist.md"));
    }
}
