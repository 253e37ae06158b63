pub mod fs;
pub mod os_rng;
pub mod statvfs;

pub use fs::{overwrite, AtomicFile};
pub use os_rng::OsEntropy;
pub use statvfs::StatvfsDiskSource;
