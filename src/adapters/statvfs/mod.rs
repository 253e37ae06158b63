use std::io;
use std::path::Path;

use tracing::debug;

use crate::domain::DiskInfo;
use crate::error::{Error, Result};
use crate::ports::DiskSource;

/// Disk source backed by the statvfs(3) syscall
#[derive(Debug, Clone, Copy, Default)]
pub struct StatvfsDiskSource;

impl StatvfsDiskSource {
    pub fn new() -> Self {
        Self
    }
}

impl DiskSource for StatvfsDiskSource {
    fn disk_info(&self, path: &Path) -> Result<DiskInfo> {
        let stat = nix::sys::statvfs::statvfs(path)
            .map_err(|errno| Error::io("statvfs", path, io::Error::from(errno)))?;

        // Block counts are in units of the fragment size
        let block_size = stat.fragment_size() as u64;
        let info = DiskInfo::from_blocks(
            block_size,
            stat.blocks() as u64,
            stat.blocks_available() as u64,
        );

        debug!(
            path = %path.display(),
            free = info.free(),
            used = info.used(),
            "queried disk usage"
        );

        Ok(info)
    }
}
