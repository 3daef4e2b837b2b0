use std::path::{Component, Path, PathBuf};

/// Renders a path for log and error messages.
///
/// Prefers the canonical form. Paths that can not be canonicalized (usually
/// because they do not exist yet) are made absolute and lexically normalized.
pub fn best_effort_path_display(path: &Path) -> String {
    match path.canonicalize() {
        Ok(canonical_path) => canonical_path.display().to_string(),
        Err(_) => {
            let absolute_path = if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|current_dir| current_dir.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            };
            normalize_path(&absolute_path).display().to_string()
        }
    }
}

fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {
                // Skip current directory components
            }
            Component::ParentDir => {
                // Pop the last component unless it anchors the path
                if !matches!(
                    components.last(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                ) {
                    components.pop();
                }
            }
            _ => {
                components.push(component);
            }
        }
    }

    components.iter().collect()
}

pub trait BestEffortPathExt {
    fn best_effort_path_display(&self) -> String;
}

impl BestEffortPathExt for Path {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self)
    }
}

impl BestEffortPathExt for PathBuf {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("/notes/./topics/../a.md", "/notes/a.md")]
    #[case("/notes/topics/deeper/../../a.md", "/notes/a.md")]
    #[case("/../a.md", "/a.md")]
    #[case("/notes/a.md", "/notes/a.md")]
    fn normalize_path_resolves_dots(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_path(Path::new(input)), PathBuf::from(expected));
    }

    #[test]
    fn missing_relative_path_is_made_absolute() {
        let display = Path::new("does/not/exist.md").best_effort_path_display();
        assert!(Path::new(&display).is_absolute());
        assert!(display.ends_with("exist.md"));
    }
}
