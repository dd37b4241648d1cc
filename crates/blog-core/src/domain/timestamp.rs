//! Textual timestamp format shared by storage and the wire.
//!
//! Timestamps are RFC 3339 in UTC with microsecond precision and a `Z`
//! suffix, e.g. `2026-10-16T09:30:00.123456Z`.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// Current time truncated to the precision of the textual format.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

pub fn format(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|ts| ts.with_timezone(&Utc))
}
