use serde::Serialize;

const MB: u64 = 1024 * 1024;

/// Point-in-time free/used snapshot of a filesystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiskInfo {
    free: u64,
    used: u64,
}

impl DiskInfo {
    pub fn new(free: u64, used: u64) -> Self {
        Self { free, used }
    }

    /// Build from raw statvfs block counts.
    ///
    /// `available` is the count usable by an unprivileged caller, not the raw
    /// free count that also includes reserved blocks.
    pub fn from_blocks(block_size: u64, blocks: u64, available: u64) -> Self {
        let free = available.saturating_mul(block_size);
        let used = blocks.saturating_mul(block_size).saturating_sub(free);
        Self::new(free, used)
    }

    pub fn free(&self) -> u64 {
        self.free
    }

    pub fn free_mb(&self) -> u64 {
        self.free / MB
    }

    pub fn free_gb(&self) -> u64 {
        self.free_mb() / 1024
    }

    pub fn used(&self) -> u64 {
        self.used
    }

    pub fn used_mb(&self) -> u64 {
        self.used / MB
    }

    pub fn used_gb(&self) -> u64 {
        self.used_mb() / 1024
    }

    /// Saturates at `u64::MAX` for values no filesystem can report
    pub fn total(&self) -> u64 {
        self.free.saturating_add(self.used)
    }

    pub fn total_mb(&self) -> u64 {
        self.total() / MB
    }

    pub fn total_gb(&self) -> u64 {
        self.total_mb() / 1024
    }

    /// Used space as a percentage of total. NaN when total is zero.
    pub fn used_percent(&self) -> f64 {
        (self.used as f64 / self.total() as f64) * 100.0
    }
}
