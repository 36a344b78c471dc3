use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Seconds between the NTP epoch (1900-01-01) and the Unix epoch.
pub const NTP_UNIX_OFFSET: u64 = 2_208_988_800;

/// OSC time tag: NTP-style 32.32 fixed-point seconds.
///
/// The high 32 bits count seconds since 1900-01-01, the low 32 bits are the
/// fractional part. The value zero ([`TimeTag::IMMEDIATE`]) means "process
/// immediately".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeTag(u64);

impl TimeTag {
    /// The reserved "immediately" time tag.
    pub const IMMEDIATE: TimeTag = TimeTag(0);

    /// Wire size in bytes.
    pub const SIZE: usize = 8;

    /// Build a time tag from its raw 64-bit value.
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Build a time tag from seconds and fraction.
    pub const fn new(seconds: u32, fraction: u32) -> Self {
        Self(((seconds as u64) << 32) | fraction as u64)
    }

    /// Time tag for a duration since the Unix epoch.
    ///
    /// Seconds wrap modulo 2^32 as NTP era 0 does.
    pub fn from_unix_duration(since_epoch: Duration) -> Self {
        let seconds = since_epoch.as_secs().wrapping_add(NTP_UNIX_OFFSET) as u32;
        let fraction = ((u64::from(since_epoch.subsec_nanos()) << 32) / 1_000_000_000) as u32;
        Self::new(seconds, fraction)
    }

    /// Time tag for the current system time.
    pub fn now() -> Self {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self::from_unix_duration(since_epoch)
    }

    /// The raw 64-bit value.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Whole seconds since the NTP epoch.
    pub const fn seconds(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Fractional seconds in units of 2^-32 s.
    pub const fn fraction(self) -> u32 {
        self.0 as u32
    }

    /// True for the reserved "immediately" value.
    pub const fn is_immediate(self) -> bool {
        self.0 == 0
    }

    /// Seconds since the NTP epoch as a float.
    pub fn as_secs_f64(self) -> f64 {
        f64::from(self.seconds()) + f64::from(self.fraction()) / 4_294_967_296.0
    }

    pub(crate) fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl From<u64> for TimeTag {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<TimeTag> for u64 {
    fn from(tag: TimeTag) -> Self {
        tag.0
    }
}

impl fmt::Display for TimeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_immediate() {
            return f.write_str("immediate");
        }
        write!(f, "{}.{:08x}", self.seconds(), self.fraction())
    }
}
