use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Requested range lies outside the configured device size.
    #[error("invalid parameter")]
    InvalidParameter,
    /// Requested transfer is larger than the dataport.
    #[error("buffer too small")]
    BufferTooSmall,
    /// The backing file could not be opened, positioned, read, written or allocated.
    #[error("i/o failure on backing file")]
    Io,
    /// Device state query, which the emulation does not model.
    #[error("operation not supported")]
    NotSupported,
}
