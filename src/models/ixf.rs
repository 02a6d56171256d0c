/*!
IX-F member export document.

Schema: <https://github.com/euro-ix/json-schemas>

Two member shapes share one document envelope: the flat per-session form consumed by
PeeringDB-style importers, and the nested IX-F form where each member carries connection,
interface and VLAN descriptors that reference the exchange in `ixp_list`.
*/
use crate::models::{Asn, SessionState};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Version of the IX-F member export schema both shapes are written against.
pub const IXF_SCHEMA_VERSION: &str = "1.0";

/// `strftime` layout of every timestamp in the document: second precision, UTC, `Z` suffix.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Format a timestamp the way it appears in the document, e.g. `2024-05-01T12:00:00Z`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// One exported member list document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Schema version, not a payload revision.
    pub version: String,
    #[serde(with = "ixf_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ixp_list: Option<Vec<Ixp>>,
    pub member_list: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Member {
    Flat(FlatMember),
    Nested(NestedMember),
}

impl Member {
    pub fn asnum(&self) -> Asn {
        match self {
            Member::Flat(m) => m.asnum,
            Member::Nested(m) => m.asnum,
        }
    }

    pub fn session_state(&self) -> SessionState {
        match self {
            Member::Flat(m) => m.session_state,
            Member::Nested(m) => m.session_state,
        }
    }
}

/// Flat member entry, one per session.
///
/// `as_number` and `asnum` always hold the same value; `asnum` is the key PeeringDB reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatMember {
    pub as_number: Asn,
    pub asnum: Asn,
    pub ip_addresses: Vec<IpAddr>,
    pub session_state: SessionState,
    #[serde(with = "ixf_timestamp")]
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberType {
    Peering,
}

/// Nested IX-F member entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedMember {
    pub asnum: Asn,
    pub member_type: MemberType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub session_state: SessionState,
    #[serde(with = "ixf_timestamp")]
    pub last_updated: DateTime<Utc>,
    pub connection_list: Vec<Connection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Active,
    Inactive,
}

impl From<SessionState> for ConnectionState {
    fn from(state: SessionState) -> Self {
        match state {
            SessionState::Up => ConnectionState::Active,
            SessionState::Down => ConnectionState::Inactive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub ixp_id: u64,
    pub state: ConnectionState,
    pub if_list: Vec<Interface>,
    pub vlan_list: Vec<VlanConnection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub switch_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub if_speed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanConnection {
    pub vlan_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<VlanAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<VlanAddress>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanAddress {
    pub address: IpAddr,
}

/// Exchange entry of `ixp_list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ixp {
    pub ixp_id: u64,
    pub ixf_id: u64,
    pub shortname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peeringdb_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_email: Option<String>,
    pub switch: Vec<Switch>,
    pub vlan: Vec<Vlan>,
}

/// Switch descriptor. Also read verbatim from the `[exchange.switch]` config table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Switch {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdb_facility_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub software: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vlan {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<VlanPrefix>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<VlanPrefix>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanPrefix {
    pub prefix: IpAddr,
    pub mask_length: u8,
}

mod ixf_timestamp {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&ts.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}
