//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp used when minting credentials.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Milliseconds since the Unix epoch for `ts`.
#[must_use]
pub fn epoch_millis(ts: Timestamp) -> i64 {
    ts.timestamp_millis()
}
