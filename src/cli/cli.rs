use std::path::PathBuf;

use clap::Parser;

use crate::application::data::{LogLevel, TimestampZone};

/// Builds a markdown index of the notes in a directory tree
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// Directory to scan for notes
    pub root: PathBuf,

    /// Index files that have this extension [default: .md]
    #[clap(long, short)]
    pub ext: Option<String>,

    /// Path to the output file [default: README.md]
    #[clap(long, short)]
    pub out: Option<PathBuf>,

    /// Title of the generated document [default: Notes]
    #[clap(long)]
    pub title: Option<String>,

    /// Directory name to skip, in addition to hidden directories
    #[clap(long = "ignore", value_name = "NAME")]
    pub ignore: Vec<String>,

    /// Time zone used for note dates
    #[clap(long, default_value = "local", value_enum)]
    pub timezone: TimestampZone,

    /// Print the index instead of writing the output file
    #[clap(long)]
    pub stdout: bool,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::try_parse_from(["notemap", "notes"]).expect("Should parse");

        assert_eq!(cli.root, PathBuf::from("notes"));
        assert_eq!(cli.ext, None);
        assert_eq!(cli.out, None);
        assert!(cli.ignore.is_empty());
        assert_eq!(cli.timezone, TimestampZone::Local);
        assert!(!cli.stdout);
    }

    #[test]
    fn cli_parses_all_flags() {
        let cli = Cli::try_parse_from([
            "notemap",
            "notes",
            "--ext",
            ".txt",
            "-o",
            "INDEX.md",
            "--title",
            "Journal",
            "--ignore",
            "node_modules",
            "--ignore",
            "target",
            "--timezone",
            "utc",
            "--stdout",
            "-l",
            "debug",
        ])
        .expect("Should parse");

        assert_eq!(cli.ext.as_deref(), Some(".txt"));
        assert_eq!(cli.out, Some(PathBuf::from("INDEX.md")));
        assert_eq!(cli.title.as_deref(), Some("Journal"));
        assert_eq!(cli.ignore, vec!["node_modules", "target"]);
        assert_eq!(cli.timezone, TimestampZone::Utc);
        assert!(cli.stdout);
    }

    #[test]
    fn cli_requires_root() {
        assert!(Cli::try_parse_from(["notemap"]).is_err());
    }
}
