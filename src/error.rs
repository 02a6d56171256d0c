/*!
error module defines the error types used in bgpkit-ixf.
*/
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::string::FromUtf8Error;
use std::time::Duration;
use thiserror::Error;

/// Failure to obtain the raw status text from the routing daemon.
///
/// Any of these aborts the run: no snapshot is assembled and nothing is written.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// The control client could not be started, or a status dump could not be read.
    ///
    /// ## Occurs during:
    ///  - Spawning `birdc`
    ///  - Reading a status dump from disk
    #[error("unable to run {command}: {source}")]
    Io {
        command: String,
        #[source]
        source: io::Error,
    },
    /// The control client exited with a non-success status.
    #[error("{command} exited with {status}: {stderr}")]
    ExitStatus {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
    /// The control client did not finish within the configured bound and was killed.
    #[error("{command} did not finish within {timeout:?}")]
    Timeout { command: String, timeout: Duration },
    /// The daemon answered, but with an error instead of a status dump.
    #[error("daemon reported an error: {0}")]
    Daemon(String),
    #[error("status output is not valid UTF-8")]
    InvalidUtf8(#[from] FromUtf8Error),
}

/// Invalid or unreadable exporter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    /// `shape = "nested"` needs an `[exchange]` table to nest members under.
    #[error("nested output requires an [exchange] section")]
    MissingExchange,
    /// Nested members reference a VLAN, so at least one must be configured.
    #[error("exchange {0} has no vlan configured")]
    MissingVlan(String),
}

/// Failure to persist a finished snapshot.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unable to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Umbrella error for a complete exporter run.
#[derive(Debug, Error)]
pub enum IxfError {
    #[error(transparent)]
    Collector(#[from] CollectorError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl IxfError {
    /// Process exit status for the stage that failed.
    pub fn exit_code(&self) -> i32 {
        match self {
            IxfError::Config(_) => 1,
            IxfError::Collector(_) => 2,
            IxfError::Export(_) => 3,
        }
    }
}
