/*!
End-to-end pipeline: collect, parse, assemble, and optionally write.
*/
use crate::assembler::{assemble, OutputShape};
use crate::collector::{BirdcCollector, StatusSource};
use crate::config::ExporterConfig;
use crate::error::{CollectorError, ConfigError, IxfError};
use crate::io::write_snapshot;
use crate::models::{SessionState, Snapshot};
use crate::parser::parse_status;
use chrono::{DateTime, SubsecRound, Utc};
use log::info;
use std::path::Path;

/// Produces IX-F snapshots from a [StatusSource].
///
/// Each call collects fresh status text; nothing is kept between calls.
pub struct IxfExporter<S> {
    source: S,
    shape: OutputShape,
}

impl IxfExporter<BirdcCollector> {
    /// Exporter querying `birdc` as described by `config`.
    pub fn from_config(config: &ExporterConfig) -> Result<Self, ConfigError> {
        let collector = BirdcCollector::new()
            .with_program(&config.birdc)
            .with_socket(config.socket.as_ref())
            .with_timeout(config.timeout());
        Ok(IxfExporter::new(collector).with_shape(config.output_shape()?))
    }
}

impl<S: StatusSource> IxfExporter<S> {
    pub fn new(source: S) -> IxfExporter<S> {
        IxfExporter {
            source,
            shape: OutputShape::Flat,
        }
    }

    pub fn with_shape(self, shape: OutputShape) -> IxfExporter<S> {
        IxfExporter { shape, ..self }
    }

    /// Collect and assemble a snapshot stamped with the current time, truncated to seconds.
    pub fn snapshot(&self) -> Result<Snapshot, CollectorError> {
        self.snapshot_at(Utc::now().trunc_subsecs(0))
    }

    /// Collect and assemble a snapshot stamped with `timestamp`.
    pub fn snapshot_at(&self, timestamp: DateTime<Utc>) -> Result<Snapshot, CollectorError> {
        let text = self.source.collect()?;
        let records = parse_status(&text);
        let snapshot = assemble(&records, timestamp, &self.shape);

        let up = snapshot
            .member_list
            .iter()
            .filter(|m| m.session_state() == SessionState::Up)
            .count();
        info!(
            "collected {} sessions ({} up, {} down)",
            snapshot.member_list.len(),
            up,
            snapshot.member_list.len() - up
        );
        Ok(snapshot)
    }

    /// Collect a snapshot and write it to `path`. Nothing is written if collection fails.
    pub fn export<P: AsRef<Path>>(&self, path: P) -> Result<Snapshot, IxfError> {
        let snapshot = self.snapshot()?;
        write_snapshot(&snapshot, path.as_ref())?;
        Ok(snapshot)
    }
}
