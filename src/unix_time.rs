//! Conversion between NTP timestamps (seconds since 1900-01-01) and Unix time (seconds since
//! 1970-01-01).

use crate::protocol::TimestampFormat;

/// Seconds between the NTP prime epoch (1900-01-01 00:00:00 UTC) and the Unix epoch
/// (1970-01-01 00:00:00 UTC).
pub const EPOCH_DELTA_SECS: i64 = 2_208_988_800;

const NANOS_PER_SEC: u64 = 1_000_000_000;
const MILLIS_PER_SEC: u64 = 1_000;
const NANOS_PER_MILLI: u32 = 1_000_000;

/// A point in time expressed relative to the Unix epoch.
///
/// NTP timestamps before 1970 convert to an `Instant` with negative seconds.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Instant {
    secs: i64,
    subsec_nanos: u32,
}

impl Instant {
    /// Create an instant from whole seconds and a sub-second nanosecond component.
    pub fn new(secs: i64, subsec_nanos: u32) -> Self {
        Instant { secs, subsec_nanos }
    }

    /// Whole seconds since the Unix epoch.
    pub fn secs(&self) -> i64 {
        self.secs
    }

    /// Nanoseconds past the whole second, in `0..1_000_000_000`.
    pub fn subsec_nanos(&self) -> u32 {
        self.subsec_nanos
    }

    /// Milliseconds since the Unix epoch, truncated towards zero within the second.
    pub fn unix_millis(&self) -> i64 {
        self.secs * MILLIS_PER_SEC as i64 + (self.subsec_nanos / NANOS_PER_MILLI) as i64
    }
}

impl From<TimestampFormat> for Instant {
    fn from(ts: TimestampFormat) -> Self {
        let secs = i64::from(ts.seconds) - EPOCH_DELTA_SECS;
        // The 32-bit fraction is a count of 1/2^32 seconds.
        let subsec_nanos = ((u64::from(ts.fraction) * NANOS_PER_SEC) >> 32) as u32;
        Instant { secs, subsec_nanos }
    }
}
