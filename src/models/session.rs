use crate::models::Asn;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::net::IpAddr;

/// The BIRD `BGP state:` value for a fully established session.
pub const ESTABLISHED: &str = "Established";

/// Placeholder `raw_state` for blocks that carry no `BGP state:` line.
pub const DOWN_SENTINEL: &str = "down";

/// # SessionState
///
/// Normalized two-value session state used in the exported document.
///
/// Only the exact BIRD token `Established` maps to [SessionState::Up]. Every other value,
/// including case variants and tokens a future daemon version might introduce, maps to
/// [SessionState::Down].
///
/// ```
/// use bgpkit_ixf::models::SessionState;
///
/// assert_eq!(SessionState::from_raw("Established"), SessionState::Up);
/// assert_eq!(SessionState::from_raw("established"), SessionState::Down);
/// assert_eq!(SessionState::from_raw("Active"), SessionState::Down);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Up,
    Down,
}

impl SessionState {
    pub fn from_raw(raw_state: &str) -> SessionState {
        match raw_state {
            ESTABLISHED => SessionState::Up,
            _ => SessionState::Down,
        }
    }

    pub fn is_up(&self) -> bool {
        matches!(self, SessionState::Up)
    }
}

impl Display for SessionState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Up => write!(f, "up"),
            SessionState::Down => write!(f, "down"),
        }
    }
}

/// SessionRecord represents one BGP session extracted from a BIRD protocol block.
///
/// Fields:
/// - `protocol`: the BIRD protocol instance name, e.g. `peer_as65001_v4`.
/// - `neighbor_asn`: the remote AS number.
/// - `neighbor_address`: the remote session address.
/// - `raw_state`: the `BGP state:` token exactly as BIRD printed it.
/// - `description`: the protocol description, if one is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub protocol: String,
    pub neighbor_asn: Asn,
    pub neighbor_address: IpAddr,
    pub raw_state: String,
    pub description: Option<String>,
}

impl SessionRecord {
    /// External state of this session, see [SessionState::from_raw].
    pub fn state(&self) -> SessionState {
        SessionState::from_raw(&self.raw_state)
    }
}

impl Display for SessionRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.protocol, self.neighbor_asn, self.neighbor_address, self.raw_state
        )
    }
}
