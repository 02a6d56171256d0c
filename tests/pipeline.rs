//! End-to-end checks of the collect → parse → assemble → write pipeline with stubbed status
//! sources.
use bgpkit_ixf::{
    assemble, parse_status, CollectorError, ExporterConfig, FileSource, IxfError, IxfExporter,
    OutputShape, StatusSource,
};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use std::path::PathBuf;

const FIXTURE: &str = include_str!("fixtures/bird2_show_protocols_all.txt");

struct StaticSource(&'static str);

impl StatusSource for StaticSource {
    fn collect(&self) -> Result<String, CollectorError> {
        Ok(self.0.to_string())
    }
}

struct FailingSource;

impl StatusSource for FailingSource {
    fn collect(&self) -> Result<String, CollectorError> {
        Err(CollectorError::Daemon(
            "Unable to connect to server control socket (/run/bird/bird.ctl): No such file or directory"
                .to_string(),
        ))
    }
}

fn export_to_value<S: StatusSource>(exporter: &IxfExporter<S>) -> Value {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ixf.json");
    exporter.export(&path).unwrap();
    serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap()
}

fn members(value: &Value) -> Vec<(u64, String)> {
    value["member_list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| {
            (
                m["asnum"].as_u64().unwrap(),
                m["session_state"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

#[test]
fn scenario_established_and_active() {
    let status = "peer1 BGP --- up 2024-05-01 Established
  BGP state:          Established
    Neighbor address: 192.0.2.1
    Neighbor AS:      65001
peer2 BGP --- start 2024-05-01 Active
  BGP state:          Active
    Neighbor address: 192.0.2.2
    Neighbor AS:      65002
";
    let value = export_to_value(&IxfExporter::new(StaticSource(status)));
    assert_eq!(
        members(&value),
        vec![(65001, "up".to_string()), (65002, "down".to_string())]
    );
    assert_eq!(value["member_list"][0]["ip_addresses"][0], "192.0.2.1");
}

#[test]
fn scenario_foreign_protocol_skipped() {
    let status = "kernel1 Kernel master4 up 2024-05-01
  Channel ipv4
    Neighbor address: 198.51.100.1
    Neighbor AS:      64999
peer1 BGP --- up 2024-05-01 Established
  BGP state:          Established
    Neighbor address: 192.0.2.1
    Neighbor AS:      65001
";
    let value = export_to_value(&IxfExporter::new(StaticSource(status)));
    assert_eq!(members(&value), vec![(65001, "up".to_string())]);
}

#[test]
fn scenario_collector_failure_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("ixf.json");

    let err = IxfExporter::new(FailingSource).export(&path).unwrap_err();
    assert!(matches!(err, IxfError::Collector(CollectorError::Daemon(_))));
    assert!(!path.exists());
    assert!(!dir.path().join("out").exists());
}

#[test]
fn scenario_missing_address_dropped() {
    let status = "peer3 BGP --- up 2024-05-01 Established
  BGP state:          Established
    Neighbor AS:      65003
peer4 BGP --- up 2024-05-01 Established
  BGP state:          Established
    Neighbor address: 192.0.2.4
    Neighbor AS:      65004
";
    let value = export_to_value(&IxfExporter::new(StaticSource(status)));
    assert_eq!(members(&value), vec![(65004, "up".to_string())]);
}

#[test]
fn fixture_dump() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/bird2_show_protocols_all.txt");
    let value = export_to_value(&IxfExporter::new(FileSource::new(path)));

    assert_eq!(value["version"], "1.0");
    assert_eq!(
        members(&value),
        vec![
            (65001, "up".to_string()),
            (65001, "up".to_string()),
            (65002, "down".to_string()),
        ]
    );
    assert_eq!(value["member_list"][1]["ip_addresses"][0], "2001:db8::1");

    // every timestamp in one document is the same instant
    let timestamp = value["timestamp"].as_str().unwrap();
    assert!(timestamp.ends_with('Z'));
    assert_eq!(timestamp.len(), "2024-05-01T12:00:00Z".len());
    for member in value["member_list"].as_array().unwrap() {
        assert_eq!(member["last_updated"], timestamp);
    }
}

#[test]
fn empty_dump_still_written() {
    let value = export_to_value(&IxfExporter::new(StaticSource("BIRD 2.0.12 ready.\n")));
    assert_eq!(value["member_list"], serde_json::json!([]));
}

#[test]
fn nested_export_from_config() {
    let config = ExporterConfig::from_toml_str(
        r#"
shape = "nested"

[exchange]
ixp_id = 1
ixf_id = 999
shortname = "EX-IX"

[exchange.switch]
id = 3
name = "sw01"

[[exchange.vlan]]
id = 10
ipv4_prefix = "192.0.2.0/24"
ipv6_prefix = "2001:db8::/64"
"#,
    )
    .unwrap();
    let exporter =
        IxfExporter::new(StaticSource(FIXTURE)).with_shape(config.output_shape().unwrap());
    let value = export_to_value(&exporter);

    assert_eq!(value["ixp_list"][0]["shortname"], "EX-IX");
    assert_eq!(value["member_list"].as_array().unwrap().len(), 3);

    let first = &value["member_list"][0];
    assert_eq!(first["name"], "Example Networks");
    assert_eq!(first["connection_list"][0]["state"], "active");
    assert_eq!(first["connection_list"][0]["if_list"][0]["switch_id"], 3);
    assert_eq!(
        first["connection_list"][0]["vlan_list"][0]["ipv4"]["address"],
        "192.0.2.1"
    );
    let third = &value["member_list"][2];
    assert_eq!(third["session_state"], "down");
    assert_eq!(third["connection_list"][0]["state"], "inactive");
}

#[test]
fn assemble_is_byte_identical() {
    let records = parse_status(FIXTURE);
    let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let first = serde_json::to_vec(&assemble(&records, timestamp, &OutputShape::Flat)).unwrap();
    let second = serde_json::to_vec(&assemble(&records, timestamp, &OutputShape::Flat)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn block_order_preserved_regardless_of_field_order() {
    let status = "z_peer BGP --- up
    Neighbor AS:      65010
    Neighbor address: 192.0.2.10
  BGP state:          Established
a_peer BGP --- up
  BGP state:          OpenConfirm
    Neighbor address: 192.0.2.11
    Neighbor AS:      65011
";
    let records = parse_status(status);
    let asns = records
        .iter()
        .map(|r| r.neighbor_asn.to_u32())
        .collect::<Vec<_>>();
    assert_eq!(asns, vec![65010, 65011]);
    assert!(records[0].state().is_up());
    assert!(!records[1].state().is_up());
}
