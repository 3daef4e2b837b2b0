use std::path::PathBuf;

use colored::Colorize;
use compio::fs;
use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info, warn};

use crate::application::RuntimeConfig;
use crate::cli::Cli;
use crate::config::{IndexConfig, IndexConfigError};
use crate::ext::BestEffortPathExt;
use crate::filesystem::{BuildError, FileIdentity, IdentityError, TreeBuilder};
use crate::render::Renderer;

pub struct Application;

impl Application {
    pub async fn run(cli: Cli) -> Result<RunSummary, ApplicationError> {
        let file_config = IndexConfig::read(&cli.root).await.context(ConfigSnafu)?;
        debug!("Loaded config file: {:?}", file_config);

        let config = RuntimeConfig::resolve(cli, file_config);
        debug!("Resolved runtime config: {:?}", config);

        let summary = Self::index(&config).await?;
        if !config.to_stdout {
            summary.print();
        }
        Ok(summary)
    }

    /// Builds, renders and writes the index described by `config`.
    ///
    /// The output file is only touched once the whole tree has been built.
    pub async fn index(config: &RuntimeConfig) -> Result<RunSummary, ApplicationError> {
        ensure!(!config.extension.is_empty(), InvalidExtensionSnafu);

        let output_identity = FileIdentity::resolve(&config.output).context(IdentitySnafu)?;
        let tree = TreeBuilder::new(config.extension.as_str())
            .with_ignored(config.ignore.iter().cloned())
            .excluding(output_identity)
            .build(&config.root)
            .context(BuildSnafu)?;

        if tree.is_empty() {
            warn!(
                "No '{}' notes found under {}",
                config.extension,
                config.root.best_effort_path_display()
            );
        }

        let summary = RunSummary {
            notes: tree.note_count(),
            topics: tree.topic_count(),
            output: config.output.clone(),
        };
        info!(
            "Collected {} notes in {} topics",
            summary.notes, summary.topics
        );

        let document = Renderer::new(config.extension.as_str())
            .with_title(config.title.as_str())
            .with_zone(config.zone)
            .render(&tree);

        if config.to_stdout {
            print!("{document}");
            return Ok(summary);
        }

        debug!(
            "Writing {} bytes to {}",
            document.len(),
            config.output.best_effort_path_display()
        );
        fs::write(&config.output, document.into_bytes())
            .await
            .0
            .context(WriteSnafu {
                path: config.output.clone(),
            })?;
        info!("Wrote index to {}", config.output.best_effort_path_display());

        Ok(summary)
    }
}

/// Outcome of a successful indexing run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub notes: usize,
    pub topics: usize,
    pub output: PathBuf,
}

impl RunSummary {
    pub fn print(&self) {
        let use_color = supports_color::on(supports_color::Stream::Stdout).is_some();
        colored::control::set_override(use_color);

        println!(
            "{} {} notes in {} topics into {}",
            "Indexed".green().bold(),
            self.notes,
            self.topics,
            self.output.display().to_string().cyan()
        );
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered during configuration stage"))]
    ConfigError { source: IndexConfigError },
    #[snafu(display("The note extension must not be empty"))]
    InvalidExtension,
    #[snafu(display("Failed to inspect the output file"))]
    IdentityError { source: IdentityError },
    #[snafu(display("Critical failure encountered while scanning notes"))]
    BuildError { source: BuildError },
    #[snafu(display("Failed to write the index to {}", path.best_effort_path_display()))]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}
