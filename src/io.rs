use crate::error::ExportError;
use crate::models::Snapshot;
use log::info;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Serialize a snapshot as pretty-printed JSON.
pub fn to_json_pretty(snapshot: &Snapshot) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Write a snapshot to `path`, creating the parent directory if needed.
///
/// The document is written to a uniquely named temporary file in the same directory and then
/// renamed over `path`, so readers see either the previous snapshot or the complete new one.
/// The temporary file is removed if any step fails.
pub(crate) fn write_snapshot(snapshot: &Snapshot, path: &Path) -> Result<(), ExportError> {
    let io_error = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(io_error)?;
            parent
        }
        None => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_error)?;
    let mut writer = BufWriter::new(&mut tmp);
    serde_json::to_writer_pretty(&mut writer, snapshot)?;
    writer.write_all(b"\n").map_err(io_error)?;
    writer.flush().map_err(io_error)?;
    drop(writer);
    tmp.as_file().sync_all().map_err(io_error)?;
    tmp.persist(path).map_err(|e| io_error(e.error))?;

    info!(
        "wrote {} members to {}",
        snapshot.member_list.len(),
        path.display()
    );
    Ok(())
}
