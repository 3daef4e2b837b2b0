use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};

use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::{debug, info};

use crate::ext::BestEffortPathExt;

const CONFIG_FILE_NAME: &str = ".notemap.yaml";

fn get_config_file_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Optional per-collection settings stored next to the notes.
///
/// Every field is optional; unset values fall back to command line flags or
/// built-in defaults when the runtime configuration is resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexConfig {
    pub extension: Option<String>,
    pub output: Option<PathBuf>,
    pub title: Option<String>,
    pub ignore: Vec<String>,
}

impl IndexConfig {
    /// Reads `.notemap.yaml` from `root`, defaulting when it does not exist.
    pub async fn read(root: &Path) -> Result<Self, IndexConfigError> {
        let path = get_config_file_path(root);
        match fs::read(&path).await {
            Ok(bytes) => Self::from_bytes(&path, bytes),
            // A root that is not a directory is reported by the scan instead
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                ) =>
            {
                info!(
                    "No config file at {}, using defaults",
                    path.best_effort_path_display()
                );
                Ok(Self::default())
            }
            Err(e) => Err(e).context(ReadSnafu {
                file_path: path.best_effort_path_display(),
            }),
        }
    }

    fn from_bytes(path: &Path, bytes: Vec<u8>) -> Result<Self, IndexConfigError> {
        debug!("Successfully read config file: {} bytes", bytes.len());
        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        contents.as_str().try_into()
    }

    fn get_string(
        top_level: &LinkedHashMap<Yaml, Yaml>,
        key: &'static str,
    ) -> Result<Option<String>, IndexConfigError> {
        match top_level.get(&Yaml::Value(Scalar::String(Cow::Borrowed(key)))) {
            None | Some(Yaml::Value(Scalar::Null)) => Ok(None),
            Some(value) => value
                .as_str()
                .map(|s| Some(s.to_string()))
                .ok_or(IndexConfigError::NotAString { key }),
        }
    }

    fn get_ignore_list(
        top_level: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<Vec<String>, IndexConfigError> {
        let value = match top_level.get(&Yaml::Value(Scalar::String(Cow::Borrowed("ignore")))) {
            None | Some(Yaml::Value(Scalar::Null)) => return Ok(Vec::new()),
            Some(value) => value,
        };

        value
            .as_sequence()
            .ok_or(IndexConfigError::IgnoreNotList)?
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or(IndexConfigError::IgnoreNotList)
            })
            .collect()
    }
}

impl TryFrom<&str> for IndexConfig {
    type Error = IndexConfigError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let Some(document) = documents.first() else {
            // An empty file configures nothing
            return Ok(Self::default());
        };

        let top_level = document
            .as_mapping()
            .ok_or(IndexConfigError::TopLevelNotMap)?;

        let extension = Self::get_string(top_level, "extension")?;
        if extension.as_deref() == Some("") {
            return Err(IndexConfigError::EmptyExtension);
        }

        Ok(IndexConfig {
            extension,
            output: Self::get_string(top_level, "output")?.map(PathBuf::from),
            title: Self::get_string(top_level, "title")?,
            ignore: Self::get_ignore_list(top_level)?,
        })
    }
}

#[derive(Debug, Snafu)]
pub enum IndexConfigError {
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Config file is not valid UTF-8: {}", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Config key '{}' should be a string", key))]
    NotAString { key: &'static str },
    #[snafu(display("Config key 'ignore' should be a list of directory names"))]
    IgnoreNotList,
    #[snafu(display("Config key 'extension' must not be empty"))]
    EmptyExtension,
}
