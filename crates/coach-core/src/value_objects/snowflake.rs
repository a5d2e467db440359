//! Snowflake ID - 64-bit time-ordered unique identifier
//!
//! Layout:
//! - Bits 63-22: Milliseconds since the custom epoch
//! - Bits 21-12: Worker ID (0-1023)
//! - Bits 11-0:  Per-millisecond sequence (0-4095)

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// 64-bit time-ordered unique identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    /// Custom epoch: 2024-01-01 00:00:00 UTC (milliseconds)
    pub const EPOCH: i64 = 1_704_067_200_000;

    /// Create a new Snowflake from a raw i64 value
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Check if the Snowflake is zero (uninitialized)
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Extract the creation timestamp (milliseconds since Unix epoch)
    #[inline]
    pub fn timestamp_millis(&self) -> i64 {
        (self.0 >> 22) + Self::EPOCH
    }

    /// Extract the worker ID (0-1023)
    #[inline]
    pub fn worker_id(&self) -> u16 {
        ((self.0 >> 12) & 0x3FF) as u16
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        s.parse::<i64>()
            .map(Snowflake)
            .map_err(|_| SnowflakeParseError::InvalidFormat)
    }
}

/// Error when parsing a Snowflake from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("invalid snowflake format")]
    InvalidFormat,
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl std::str::FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snowflake::parse(s)
    }
}

// Serialize as string for JSON (JavaScript number-precision safety)
impl Serialize for Snowflake {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

// Deserialize from either a string or a raw integer
impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Str(String),
            Int(i64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Str(s) => Snowflake::parse(&s)
                .map_err(|_| serde::de::Error::custom("invalid snowflake string")),
            Raw::Int(n) => Ok(Snowflake::new(n)),
        }
    }
}

/// Generator producing monotonically increasing Snowflakes for one worker
///
/// The last issued id is kept in an atomic; generation is a CAS loop so the
/// generator can be shared behind an `Arc` without a lock.
#[derive(Debug)]
pub struct SnowflakeGenerator {
    worker_id: u16,
    last: AtomicI64,
}

impl SnowflakeGenerator {
    /// Create a generator for the given worker ID (wrapped to 10 bits)
    pub fn new(worker_id: u16) -> Self {
        Self {
            worker_id: worker_id & 0x3FF,
            last: AtomicI64::new(0),
        }
    }

    /// Generate the next Snowflake
    pub fn generate(&self) -> Snowflake {
        loop {
            let prev = self.last.load(Ordering::Acquire);
            let candidate = self.next_after(prev);
            if self
                .last
                .compare_exchange(prev, candidate, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                return Snowflake::new(candidate);
            }
        }
    }

    fn next_after(&self, prev: i64) -> i64 {
        let now = Self::now_millis();
        let base = (now - Snowflake::EPOCH) << 22 | i64::from(self.worker_id) << 12;
        if base > prev {
            base
        } else {
            // Same millisecond (or clock skew): bump the sequence, spilling
            // into the next millisecond on overflow.
            prev + 1
        }
    }

    fn now_millis() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(Snowflake::EPOCH)
    }
}
