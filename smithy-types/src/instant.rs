/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{self, Serialize, Serializer};
use std::fmt;

const NANOS_PER_SECOND: u32 = 1_000_000_000;
const NANOS_PER_MICRO: u32 = 1_000;
const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// A point in time, as exchanged by AWS JSON protocols.
///
/// JSON protocols transmit timestamps as (possibly fractional) seconds since the Unix epoch. A
/// JSON number is read as an `f64`, which at current epoch magnitudes resolves a few tenths of a
/// microsecond, so timestamps read from the wire are rounded to the nearest microsecond.
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord, Hash)]
pub struct Instant {
    seconds: i64,
    subsecond_nanos: u32,
}

impl Instant {
    pub fn from_epoch_seconds(epoch_seconds: i64) -> Self {
        Instant {
            seconds: epoch_seconds,
            subsecond_nanos: 0,
        }
    }

    pub fn from_secs_and_nanos(seconds: i64, subsecond_nanos: u32) -> Self {
        Instant {
            seconds,
            subsecond_nanos,
        }
    }

    /// Epoch seconds as read from a JSON number, rounded to the microsecond
    pub fn from_f64(epoch_seconds: f64) -> Self {
        let seconds = epoch_seconds.floor();
        // exact: both operands share the exponent range of `epoch_seconds`
        let fraction = epoch_seconds - seconds;
        let micros = (fraction * MICROS_PER_SECOND).round() as u32;
        if micros == 1_000_000 {
            Instant::from_epoch_seconds(seconds as i64 + 1)
        } else {
            Instant::from_secs_and_nanos(seconds as i64, micros * NANOS_PER_MICRO)
        }
    }

    pub fn has_nanos(&self) -> bool {
        self.subsecond_nanos != 0
    }

    pub fn epoch_seconds(&self) -> i64 {
        self.seconds
    }

    pub fn subsec_nanos(&self) -> u32 {
        self.subsecond_nanos
    }

    /// Decimal epoch seconds without trailing zeros, eg. `1576540098.52`
    fn decimal(&self) -> String {
        if self.subsecond_nanos == 0 {
            return self.seconds.to_string();
        }
        let (sign, whole, nanos) = if self.seconds < 0 {
            ("-", -(self.seconds + 1), NANOS_PER_SECOND - self.subsecond_nanos)
        } else {
            ("", self.seconds, self.subsecond_nanos)
        };
        let fraction = format!("{:09}", nanos);
        format!("{}{}.{}", sign, whole, fraction.trim_end_matches('0'))
    }
}

impl Serialize for Instant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.has_nanos() {
            // parsing the decimal text yields the float nearest to it, which prints back as the
            // same digits
            let value: f64 = self.decimal().parse().map_err(ser::Error::custom)?;
            serializer.serialize_f64(value)
        } else {
            serializer.serialize_i64(self.seconds)
        }
    }
}

struct InstantVisitor;

impl<'de> Visitor<'de> for InstantVisitor {
    type Value = Instant;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("seconds since the unix epoch")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Instant::from_epoch_seconds(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        if v > i64::MAX as u64 {
            return Err(E::custom("timestamp out of range"));
        }
        Ok(Instant::from_epoch_seconds(v as i64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if !v.is_finite() {
            return Err(E::custom("timestamp must be a finite number"));
        }
        Ok(Instant::from_f64(v))
    }
}

impl<'de> Deserialize<'de> for Instant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(InstantVisitor)
    }
}
