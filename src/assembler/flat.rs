use crate::assembler::MemberBuilder;
use crate::models::{FlatMember, Member, SessionRecord};
use chrono::{DateTime, Utc};

/// One flat entry per session, the shape PeeringDB's IX-F importer reads.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatBuilder;

impl MemberBuilder for FlatBuilder {
    fn build_member(&self, record: &SessionRecord, timestamp: DateTime<Utc>) -> Member {
        Member::Flat(FlatMember {
            as_number: record.neighbor_asn,
            asnum: record.neighbor_asn,
            ip_addresses: vec![record.neighbor_address],
            session_state: record.state(),
            last_updated: timestamp,
        })
    }
}
