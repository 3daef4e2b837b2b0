mod log_level;
mod timestamp_zone;

pub use log_level::LogLevel;
pub use timestamp_zone::TimestampZone;
