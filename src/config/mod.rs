mod index_config;

pub use index_config::{IndexConfig, IndexConfigError};
