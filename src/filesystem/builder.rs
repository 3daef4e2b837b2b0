use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use snafu::{ResultExt, Snafu};
use tracing::{debug, warn};

use crate::ext::BestEffortPathExt;
use crate::filesystem::{Entry, FileIdentity, Note, Topic};

/// Directories whose name starts with this prefix are never indexed
pub const HIDDEN_PREFIX: char = '.';

/// Scans a directory tree and collects matching notes per topic.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    suffix: String,
    ignored: HashSet<String>,
    exclude: Option<FileIdentity>,
}

impl TreeBuilder {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            ignored: HashSet::new(),
            exclude: None,
        }
    }

    /// Skips directories with any of the given names, on every level
    pub fn with_ignored<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored.extend(names.into_iter().map(Into::into));
        self
    }

    /// Never records the file identified by `identity` as a note
    pub fn excluding(mut self, identity: Option<FileIdentity>) -> Self {
        self.exclude = identity;
        self
    }

    /// Builds the full tree rooted at `root`.
    ///
    /// The first directory that can not be listed aborts the whole build.
    pub fn build(&self, root: &Path) -> Result<Entry, BuildError> {
        debug!(
            "Building note tree from {} with suffix '{}'",
            root.best_effort_path_display(),
            self.suffix
        );
        let mut entry = Entry::default();
        self.scan_dir(root, &mut entry)?;
        Ok(entry)
    }

    fn scan_dir(&self, dir: &Path, entry: &mut Entry) -> Result<(), BuildError> {
        let listing = fs::read_dir(dir).context(ReadDirSnafu {
            path: dir.to_path_buf(),
        })?;

        for child in listing {
            let child = child.context(ReadDirSnafu {
                path: dir.to_path_buf(),
            })?;
            let path = child.path();
            let metadata = child.metadata().context(MetadataSnafu { path: path.clone() })?;

            let Some(name) = child.file_name().to_str().map(str::to_string) else {
                warn!(
                    "Skipping {}: name is not valid UTF-8",
                    path.best_effort_path_display()
                );
                continue;
            };

            if metadata.is_dir() {
                if self.is_skipped_dir(&name) {
                    debug!("Skipping directory {}", path.best_effort_path_display());
                    continue;
                }
                let sub_entry = entry.sub_topic_mut(Topic::from(name));
                self.scan_dir(&path, sub_entry)?;
            } else if name.ends_with(&self.suffix) {
                if self.is_excluded(&path, &metadata) {
                    debug!(
                        "Excluding output file {}",
                        path.best_effort_path_display()
                    );
                    continue;
                }
                let timestamp = metadata
                    .modified()
                    .context(MetadataSnafu { path: path.clone() })?;
                entry.push_note(Note::new(name, timestamp));
            }
        }

        Ok(())
    }

    fn is_skipped_dir(&self, name: &str) -> bool {
        name.starts_with(HIDDEN_PREFIX) || self.ignored.contains(name)
    }

    fn is_excluded(&self, path: &Path, metadata: &fs::Metadata) -> bool {
        let Some(identity) = self.exclude.as_ref() else {
            return false;
        };

        // The output identity is resolved through symlinks, so compare targets
        if metadata.file_type().is_symlink() {
            return match fs::metadata(path) {
                Ok(target) => identity.matches(path, &target),
                Err(e) => {
                    debug!(
                        "Could not follow symlink {}: {e}",
                        path.best_effort_path_display()
                    );
                    false
                }
            };
        }

        identity.matches(path, metadata)
    }
}

#[derive(Debug, Snafu)]
pub enum BuildError {
    #[snafu(display("Failed to list directory {}", path.best_effort_path_display()))]
    ReadDirError { path: PathBuf, source: io::Error },
    #[snafu(display("Failed to read metadata of {}", path.best_effort_path_display()))]
    MetadataError { path: PathBuf, source: io::Error },
}
