pub mod disk_source;
pub mod entropy_source;

pub use disk_source::DiskSource;
pub use entropy_source::EntropySource;
