use crate::assembler::MemberBuilder;
use crate::config::ExchangeMetadata;
use crate::models::{
    Connection, Interface, Ixp, Member, MemberType, NestedMember, SessionRecord, VlanAddress,
    VlanConnection,
};
use chrono::{DateTime, Utc};
use std::net::IpAddr;

/// IX-F member objects nested under a single configured exchange.
#[derive(Debug, Clone, Copy)]
pub struct NestedBuilder<'a> {
    exchange: &'a ExchangeMetadata,
}

impl<'a> NestedBuilder<'a> {
    pub fn new(exchange: &'a ExchangeMetadata) -> NestedBuilder<'a> {
        NestedBuilder { exchange }
    }

    fn vlan_connection(&self, address: IpAddr) -> Option<VlanConnection> {
        let vlan = self.exchange.vlan_for(&address)?;
        let entry = Some(VlanAddress { address });
        let (ipv4, ipv6) = match address {
            IpAddr::V4(_) => (entry, None),
            IpAddr::V6(_) => (None, entry),
        };
        Some(VlanConnection {
            vlan_id: vlan.id,
            ipv4,
            ipv6,
        })
    }
}

impl MemberBuilder for NestedBuilder<'_> {
    fn build_member(&self, record: &SessionRecord, timestamp: DateTime<Utc>) -> Member {
        let state = record.state();
        let connection = Connection {
            ixp_id: self.exchange.ixp_id,
            state: state.into(),
            if_list: vec![Interface {
                switch_id: self.exchange.switch.id,
                if_speed: self.exchange.if_speed,
            }],
            vlan_list: self
                .vlan_connection(record.neighbor_address)
                .into_iter()
                .collect(),
        };
        Member::Nested(NestedMember {
            asnum: record.neighbor_asn,
            member_type: MemberType::Peering,
            name: record.description.clone(),
            session_state: state,
            last_updated: timestamp,
            connection_list: vec![connection],
        })
    }

    fn ixp_list(&self) -> Option<Vec<Ixp>> {
        Some(vec![self.exchange.to_ixp()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::tests::{record, timestamp};
    use crate::assembler::{assemble, OutputShape};
    use crate::config::VlanConfig;
    use crate::models::Switch;
    use serde_json::json;

    fn exchange() -> ExchangeMetadata {
        ExchangeMetadata {
            ixp_id: 1,
            ixf_id: 999,
            shortname: "EX-IX".to_string(),
            name: Some("Example Internet Exchange".to_string()),
            country: Some("DE".to_string()),
            url: None,
            peeringdb_id: None,
            support_email: None,
            if_speed: Some(10000),
            switch: Switch {
                id: 7,
                name: "sw01".to_string(),
                colo: Some("Example DC".to_string()),
                city: Some("Frankfurt".to_string()),
                country: Some("DE".to_string()),
                pdb_facility_id: None,
                manufacturer: Some("Arista".to_string()),
                model: Some("7280R3".to_string()),
                software: None,
            },
            vlan: vec![VlanConfig {
                id: 10,
                name: Some("peering".to_string()),
                ipv4_prefix: Some("192.0.2.0/24".parse().unwrap()),
                ipv6_prefix: Some("2001:db8::/64".parse().unwrap()),
            }],
        }
    }

    #[test]
    fn test_nested_member() {
        let exchange = exchange();
        let mut session = record(65001, "2001:db8::1", "Established");
        session.description = Some("Example Networks".to_string());

        let member = NestedBuilder::new(&exchange).build_member(&session, timestamp());
        assert_eq!(
            serde_json::to_value(&member).unwrap(),
            json!({
                "asnum": 65001,
                "member_type": "peering",
                "name": "Example Networks",
                "session_state": "up",
                "last_updated": "2024-05-01T12:00:00Z",
                "connection_list": [{
                    "ixp_id": 1,
                    "state": "active",
                    "if_list": [{"switch_id": 7, "if_speed": 10000}],
                    "vlan_list": [{"vlan_id": 10, "ipv6": {"address": "2001:db8::1"}}]
                }]
            })
        );
    }

    #[test]
    fn test_nested_down_member() {
        let exchange = exchange();
        let member = NestedBuilder::new(&exchange)
            .build_member(&record(65002, "192.0.2.2", "Connect"), timestamp());
        let value = serde_json::to_value(&member).unwrap();
        assert_eq!(value["session_state"], "down");
        assert_eq!(value["connection_list"][0]["state"], "inactive");
        assert_eq!(
            value["connection_list"][0]["vlan_list"][0]["ipv4"]["address"],
            "192.0.2.2"
        );
        assert!(value.get("name").is_none());
    }

    #[test]
    fn test_nested_snapshot() {
        let records = vec![record(65001, "192.0.2.1", "Established")];
        let snapshot = assemble(&records, timestamp(), &OutputShape::Nested(exchange()));
        let value = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(value["version"], "1.0");
        assert_eq!(value["timestamp"], "2024-05-01T12:00:00Z");
        assert_eq!(
            value["ixp_list"],
            json!([{
                "ixp_id": 1,
                "ixf_id": 999,
                "shortname": "EX-IX",
                "name": "Example Internet Exchange",
                "country": "DE",
                "switch": [{
                    "id": 7,
                    "name": "sw01",
                    "colo": "Example DC",
                    "city": "Frankfurt",
                    "country": "DE",
                    "manufacturer": "Arista",
                    "model": "7280R3"
                }],
                "vlan": [{
                    "id": 10,
                    "name": "peering",
                    "ipv4": {"prefix": "192.0.2.0", "mask_length": 24},
                    "ipv6": {"prefix": "2001:db8::", "mask_length": 64}
                }]
            }])
        );
        assert_eq!(value["member_list"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_no_vlan_configured() {
        let mut exchange = exchange();
        exchange.vlan.clear();
        let member = NestedBuilder::new(&exchange)
            .build_member(&record(65001, "192.0.2.1", "Established"), timestamp());
        let Member::Nested(member) = member else {
            panic!("expected nested member");
        };
        assert!(member.connection_list[0].vlan_list.is_empty());
    }
}
