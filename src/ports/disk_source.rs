use std::path::Path;

use crate::domain::DiskInfo;
use crate::error::Result;

/// Port for querying filesystem usage
pub trait DiskSource: Send + Sync {
    /// Get free/used figures for the filesystem holding `path`
    fn disk_info(&self, path: &Path) -> Result<DiskInfo>;
}
