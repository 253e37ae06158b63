//! Small host utilities: filesystem usage, secure random numbers, atomic file
//! replacement and a random secret persisted on disk.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;

pub use adapters::{overwrite, AtomicFile};
pub use application::{disk_info, random_number, Secret};
pub use config::Config;
pub use domain::DiskInfo;
pub use error::{Error, Result};
