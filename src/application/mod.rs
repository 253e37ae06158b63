pub mod disk;
pub mod random;
pub mod secret;

pub use disk::disk_info;
pub use random::{random_number, random_number_from};
pub use secret::Secret;
