pub mod disk;
pub mod secret;

pub use disk::DiskInfo;
pub use secret::{decode_secret, encode_secret};
#[cfg(test)]
pub use secret::is_well_formed;
