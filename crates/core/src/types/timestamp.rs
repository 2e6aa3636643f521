//! Sale timestamps.
//!
//! `createdtime` columns hold milliseconds since the Unix epoch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display format for "Last Purchased" times, e.g. "October 18, 2026, 02:30 PM".
const DISPLAY_FORMAT: &str = "%B %-d, %Y, %I:%M %p";

/// When a line item was sold, in epoch milliseconds.
///
/// Ordering follows the underlying millisecond count, so the latest sale
/// compares greatest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleTimestamp(i64);

impl SaleTimestamp {
    /// Create a timestamp from epoch milliseconds.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Get the epoch milliseconds.
    #[must_use]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// Convert to a UTC datetime.
    ///
    /// Returns `None` if the value is outside chrono's representable range.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }

    /// Format for display in UTC.
    ///
    /// Out-of-range values render as the raw millisecond count rather than failing.
    #[must_use]
    pub fn display(&self) -> String {
        self.to_datetime().map_or_else(
            || self.0.to_string(),
            |dt| dt.format(DISPLAY_FORMAT).to_string(),
        )
    }
}

impl From<DateTime<Utc>> for SaleTimestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_millis())
    }
}

impl std::fmt::Display for SaleTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}
