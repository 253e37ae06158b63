use std::path::Path;

use crate::adapters::StatvfsDiskSource;
use crate::domain::DiskInfo;
use crate::error::Result;
use crate::ports::DiskSource;

/// Free/used snapshot for the filesystem holding `path`
pub fn disk_info(path: impl AsRef<Path>) -> Result<DiskInfo> {
    StatvfsDiskSource::new().disk_info(path.as_ref())
}
