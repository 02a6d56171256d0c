use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// ASN -- Autonomous System Number
///
/// Always a 4-octet value. Zero is reserved (RFC7607) and never names a real peer, so it is
/// rejected when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct Asn(u32);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AsnParseError {
    #[error("invalid AS number: {0}")]
    Invalid(#[from] ParseIntError),
    #[error("AS number must be positive")]
    Zero,
}

impl Asn {
    /// Constructs a new `Asn`, returning `None` for the reserved value 0.
    pub const fn new(asn: u32) -> Option<Self> {
        match asn {
            0 => None,
            v => Some(Asn(v)),
        }
    }

    pub const fn to_u32(self) -> u32 {
        self.0
    }
}

impl PartialEq<u32> for Asn {
    fn eq(&self, other: &u32) -> bool {
        self.0 == *other
    }
}

impl From<Asn> for u32 {
    fn from(value: Asn) -> Self {
        value.0
    }
}

impl TryFrom<u32> for Asn {
    type Error = AsnParseError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Asn::new(value).ok_or(AsnParseError::Zero)
    }
}

impl FromStr for Asn {
    type Err = AsnParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("AS")
            .or_else(|| trimmed.strip_prefix("as"))
            .unwrap_or(trimmed);
        Asn::try_from(u32::from_str(digits)?)
    }
}

impl Serialize for Asn {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.0)
    }
}

impl<'de> Deserialize<'de> for Asn {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u32::deserialize(deserializer)?;
        Asn::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl Display for Asn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
