/*!
Status sources: where the raw `show protocols all` text comes from.

The exporter only needs one request/response exchange per run, so a source is a single
blocking call that returns the complete status text or fails the run.
*/
mod birdc;
mod file;

pub use birdc::{BirdcCollector, DEFAULT_TIMEOUT};
pub use file::FileSource;

use crate::error::CollectorError;

/// Anything that can produce a BIRD protocol status dump.
pub trait StatusSource {
    fn collect(&self) -> Result<String, CollectorError>;
}

impl<S: StatusSource + ?Sized> StatusSource for Box<S> {
    fn collect(&self) -> Result<String, CollectorError> {
        (**self).collect()
    }
}
