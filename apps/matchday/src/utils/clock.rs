//! Wall-clock helpers.
//!
//! Timestamps are stored at whole-second precision so that text-encoded
//! values (SQLite) compare in the same order as the instants they encode.

use time::OffsetDateTime;

/// Current UTC time truncated to the second.
pub fn now() -> OffsetDateTime {
    truncate(OffsetDateTime::now_utc())
}

/// Drop sub-second precision from `ts`.
pub fn truncate(ts: OffsetDateTime) -> OffsetDateTime {
    ts.replace_nanosecond(0).unwrap_or(ts)
}
