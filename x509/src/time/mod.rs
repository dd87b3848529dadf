// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Time handling for certificate validity and CRL freshness.
//!
//! Both UTCTime and GeneralizedTime are accepted as defined in RFC 5280.
//! Verification times supplied by callers are seconds since the Unix epoch
//! and are converted with [`Time::from_unix_secs`].

use core::cmp::Ordering;
use core::time::Duration;
use der::{
    asn1::{GeneralizedTime, UtcTime},
    Decode, DecodeValue, Encode, EncodeValue, Header, Length, Reader, Tag, Writer,
};

use crate::error::{Error, Result, TimeError};

/// A timestamp that can be either UTCTime or GeneralizedTime.
///
/// Equality and ordering compare the instant, not the encoding.
#[derive(Debug, Clone, Copy)]
pub enum Time {
    /// UTCTime format (YYMMDDHHMMSSZ)
    UtcTime(UtcTime),
    /// GeneralizedTime format (YYYYMMDDHHMMSSZ)
    GeneralizedTime(GeneralizedTime),
}

impl Time {
    /// Build a time from seconds since the Unix epoch.
    pub fn from_unix_secs(secs: u64) -> Result<Self> {
        GeneralizedTime::from_unix_duration(Duration::from_secs(secs))
            .map(Time::GeneralizedTime)
            .map_err(|_| Error::TimeError(TimeError::InvalidTime))
    }

    /// Seconds since the Unix epoch.
    pub fn unix_secs(&self) -> u64 {
        self.unix_duration().as_secs()
    }

    fn unix_duration(&self) -> Duration {
        match self {
            Time::UtcTime(utc) => utc.to_unix_duration(),
            Time::GeneralizedTime(gen) => gen.to_unix_duration(),
        }
    }
}

impl PartialEq for Time {
    fn eq(&self, other: &Self) -> bool {
        self.unix_duration() == other.unix_duration()
    }
}

impl Eq for Time {}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Time {
    fn cmp(&self, other: &Self) -> Ordering {
        self.unix_duration().cmp(&other.unix_duration())
    }
}

impl core::fmt::Display for Time {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let dt = match self {
            Time::UtcTime(utc) => utc.to_date_time(),
            Time::GeneralizedTime(gen) => gen.to_date_time(),
        };
        write!(f, "{}", dt)
    }
}

impl<'a> DecodeValue<'a> for Time {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        match header.tag {
            Tag::UtcTime => Ok(Time::UtcTime(UtcTime::decode_value(reader, header)?)),
            Tag::GeneralizedTime => Ok(Time::GeneralizedTime(GeneralizedTime::decode_value(
                reader, header,
            )?)),
            tag => Err(der::Error::from(der::ErrorKind::TagUnexpected {
                expected: Some(Tag::UtcTime),
                actual: tag,
            })),
        }
    }
}

impl<'a> Decode<'a> for Time {
    fn decode<R: Reader<'a>>(reader: &mut R) -> der::Result<Self> {
        let header = Header::decode(reader)?;
        Self::decode_value(reader, header)
    }
}

impl Encode for Time {
    fn encoded_len(&self) -> der::Result<Length> {
        match self {
            Time::UtcTime(utc) => utc.encoded_len(),
            Time::GeneralizedTime(gen) => gen.encoded_len(),
        }
    }

    fn encode(&self, writer: &mut impl Writer) -> der::Result<()> {
        match self {
            Time::UtcTime(utc) => utc.encode(writer),
            Time::GeneralizedTime(gen) => gen.encode(writer),
        }
    }
}

/// Certificate validity period.
///
/// ```text
/// Validity ::= SEQUENCE {
///     notBefore      Time,
///     notAfter       Time
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validity {
    pub not_before: Time,
    pub not_after: Time,
}

impl Validity {
    pub const fn new(not_before: Time, not_after: Time) -> Self {
        Validity {
            not_before,
            not_after,
        }
    }

    /// Both bounds are inclusive; the error says which one failed.
    pub fn check_at(&self, check_time: &Time) -> Result<()> {
        if *check_time < self.not_before {
            return Err(Error::not_yet_valid());
        }
        if *check_time > self.not_after {
            return Err(Error::expired());
        }
        Ok(())
    }
}

impl<'a> DecodeValue<'a> for Validity {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let not_before = Time::decode(reader)?;
            let not_after = Time::decode(reader)?;
            Ok(Validity {
                not_before,
                not_after,
            })
        })
    }
}

impl EncodeValue for Validity {
    fn value_len(&self) -> der::Result<Length> {
        self.not_before.encoded_len()? + self.not_after.encoded_len()?
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.not_before.encode(writer)?;
        self.not_after.encode(writer)?;
        Ok(())
    }
}

impl der::Sequence<'_> for Validity {}

/// Current wall-clock time.
///
/// Only available with `std`; without it callers must supply a
/// verification time.
pub fn current_time() -> Result<Time> {
    #[cfg(feature = "std")]
    {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_err(|_| Error::TimeError(TimeError::InvalidTime))?;
        Time::from_unix_secs(now.as_secs())
    }

    #[cfg(not(feature = "std"))]
    {
        Err(Error::TimeError(TimeError::InvalidTime))
    }
}

/// Resolve an optional fixed verification time, falling back to now.
pub fn verification_time(fixed: Option<u64>) -> Result<Time> {
    match fixed {
        Some(secs) => Time::from_unix_secs(secs),
        None => current_time(),
    }
}
