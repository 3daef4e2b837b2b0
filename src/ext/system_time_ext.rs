use std::time::SystemTime;

use chrono::{DateTime, Local, Utc};

use crate::application::data::TimestampZone;

/// Day, abbreviated month and four digit year, e.g. `02 Jan 2006`
const DATE_FORMAT: &str = "%d %b %Y";

pub trait SystemTimeExt {
    fn format_date(&self, zone: TimestampZone) -> String;
}

impl SystemTimeExt for SystemTime {
    fn format_date(&self, zone: TimestampZone) -> String {
        match zone {
            TimestampZone::Local => DateTime::<Local>::from(*self).format(DATE_FORMAT).to_string(),
            TimestampZone::Utc => DateTime::<Utc>::from(*self).format(DATE_FORMAT).to_string(),
        }
    }
}
