mod atomic;

pub use atomic::{overwrite, AtomicFile};
