//! Host-side emulation of a raw non-volatile storage device.
//!
//! A [`HostStorage`] backs a fixed-size, byte addressed device with a file on the host so
//! that code written against the [`Storage`] interface can run on a development machine
//! instead of target hardware. Content that was never written, or was erased, reads back as
//! `0xFF` the way flash does.

pub mod backing;
pub mod config;
pub mod dataport;
pub mod entropy;
pub mod error;
pub mod host_storage;
pub mod storage;

#[cfg(test)]
mod tests_util;

pub use backing::FileState;
pub use config::StorageConfig;
pub use dataport::Dataport;
pub use entropy::HostEntropy;
pub use error::ErrorKind;
pub use host_storage::HostStorage;
pub use storage::{Geometry, Storage};
