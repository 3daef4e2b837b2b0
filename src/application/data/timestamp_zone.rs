use clap::ValueEnum;

/// Time zone used when rendering note modification dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum TimestampZone {
    #[default]
    Local,
    Utc,
}
