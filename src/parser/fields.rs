use crate::models::{Asn, SessionRecord, DOWN_SENTINEL};
use crate::parser::PeerBlock;
use log::debug;
use regex::Regex;
use std::net::IpAddr;
use std::sync::LazyLock;

static NEIGHBOR_AS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Neighbor AS:\s*(\d+)").unwrap());
// a `%zone` suffix on link-local neighbors is left out of the capture
static NEIGHBOR_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Neighbor address:\s*([0-9A-Fa-f:.]+)").unwrap());
static BGP_STATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"BGP state:\s*(\w+)").unwrap());
static DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Description:\s*(\S.*?)\s*$").unwrap());

/// First capture of `re` on any line of the block for which `convert` succeeds.
fn find_field<'a, T>(
    block: &PeerBlock<'a>,
    re: &Regex,
    convert: impl Fn(&'a str) -> Option<T>,
) -> Option<T> {
    block.lines().iter().find_map(|&line| {
        re.captures(line)
            .and_then(|caps| caps.get(1))
            .and_then(|m| convert(m.as_str()))
    })
}

/// Extracts a [SessionRecord] from a BGP protocol block.
///
/// Returns `None` if the block lacks a usable neighbor AS or neighbor address. A missing
/// `BGP state:` line is not fatal: the record gets the `down` sentinel instead.
pub fn extract_record(block: &PeerBlock) -> Option<SessionRecord> {
    let neighbor_asn = find_field(block, &NEIGHBOR_AS, |v| v.parse::<Asn>().ok());
    let neighbor_address = find_field(block, &NEIGHBOR_ADDRESS, |v| v.parse::<IpAddr>().ok());

    let (neighbor_asn, neighbor_address) = match (neighbor_asn, neighbor_address) {
        (Some(asn), Some(address)) => (asn, address),
        (asn, address) => {
            debug!(
                "skipping protocol {}: neighbor AS {:?}, neighbor address {:?}",
                block.name(),
                asn,
                address
            );
            return None;
        }
    };

    let raw_state = find_field(block, &BGP_STATE, |v| Some(v.to_string()))
        .unwrap_or_else(|| DOWN_SENTINEL.to_string());
    let description = find_field(block, &DESCRIPTION, |v| Some(v.to_string()));

    Some(SessionRecord {
        protocol: block.name().to_string(),
        neighbor_asn,
        neighbor_address,
        raw_state,
        description,
    })
}
