//! Small filesystem helpers shared by the sample-file and settings-file I/O.

mod atomic;

pub use atomic::atomic_write;
