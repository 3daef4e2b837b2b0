use std::path::PathBuf;

use crate::application::data::TimestampZone;
use crate::cli::Cli;
use crate::config::IndexConfig;
use crate::render::DEFAULT_TITLE;

pub const DEFAULT_EXTENSION: &str = ".md";
pub const DEFAULT_OUTPUT: &str = "README.md";

/// Settings for a single indexing run.
///
/// Command line flags take precedence over the collection's config file,
/// which takes precedence over the built-in defaults. A relative `--out` is
/// relative to the working directory, a relative config file `output` to the
/// scanned root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    pub extension: String,
    pub output: PathBuf,
    pub title: String,
    pub ignore: Vec<String>,
    pub zone: TimestampZone,
    pub to_stdout: bool,
}

impl RuntimeConfig {
    pub fn resolve(cli: Cli, file_config: IndexConfig) -> Self {
        let mut ignore = file_config.ignore;
        for name in cli.ignore {
            if !ignore.contains(&name) {
                ignore.push(name);
            }
        }

        Self {
            root: cli.root.clone(),
            extension: cli
                .ext
                .or(file_config.extension)
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
            output: cli
                .out
                .or_else(|| file_config.output.map(|output| cli.root.join(output)))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            title: cli
                .title
                .or(file_config.title)
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            ignore,
            zone: cli.timezone,
            to_stdout: cli.stdout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(["notemap"].iter().chain(args)).expect("Should parse")
    }

    #[test]
    fn resolve_falls_back_to_defaults() {
        let config = RuntimeConfig::resolve(cli(&["notes"]), IndexConfig::default());

        assert_eq!(config.root, PathBuf::from("notes"));
        assert_eq!(config.extension, DEFAULT_EXTENSION);
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(config.title, DEFAULT_TITLE);
        assert!(config.ignore.is_empty());
        assert!(!config.to_stdout);
    }

    #[test]
    fn resolve_prefers_config_file_over_defaults() {
        let file_config = IndexConfig {
            extension: Some(".txt".to_string()),
            output: Some(PathBuf::from("INDEX.txt")),
            title: Some("Journal".to_string()),
            ignore: vec!["drafts".to_string()],
        };

        let config = RuntimeConfig::resolve(cli(&["notes"]), file_config);

        assert_eq!(config.extension, ".txt");
        assert_eq!(config.output, PathBuf::from("notes").join("INDEX.txt"));
        assert_eq!(config.title, "Journal");
        assert_eq!(config.ignore, vec!["drafts"]);
    }

    #[test]
    fn resolve_keeps_absolute_config_output() {
        let absolute = std::env::temp_dir().join("INDEX.md");
        let file_config = IndexConfig {
            output: Some(absolute.clone()),
            ..IndexConfig::default()
        };

        let config = RuntimeConfig::resolve(cli(&["notes"]), file_config);

        assert_eq!(config.output, absolute);
    }

    #[test]
    fn resolve_keeps_flag_output_relative_to_working_directory() {
        let file_config = IndexConfig {
            output: Some(PathBuf::from("INDEX.txt")),
            ..IndexConfig::default()
        };

        let config = RuntimeConfig::resolve(cli(&["notes", "--out", "README.md"]), file_config);

        assert_eq!(config.output, PathBuf::from("README.md"));
    }

    #[test]
    fn resolve_prefers_flags_and_merges_ignore_lists() {
        let file_config = IndexConfig {
            extension: Some(".txt".to_string()),
            output: None,
            title: Some("Journal".to_string()),
            ignore: vec!["drafts".to_string(), "target".to_string()],
        };

        let config = RuntimeConfig::resolve(
            cli(&["notes", "-e", ".org", "--ignore", "target", "--ignore", "tmp"]),
            file_config,
        );

        assert_eq!(config.extension, ".org");
        assert_eq!(config.title, "Journal");
        assert_eq!(config.ignore, vec!["drafts", "target", "tmp"]);
    }
}
