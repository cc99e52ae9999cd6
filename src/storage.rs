use crate::dataport::Dataport;
use crate::error::ErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub size: u64,
    pub block_size: usize,
}

/// Byte addressed non-volatile storage that stages its transfers through a dataport.
///
/// Callers place payloads for `write` at the front of the dataport and find the result of
/// `read` at the front of the dataport afterwards. Erased content reads back as `0xFF`.
pub trait Storage {
    fn dataport(&self) -> &Dataport;
    fn dataport_mut(&mut self) -> &mut Dataport;

    /// Read `size` bytes at `offset` into the dataport, returning the number of bytes read.
    fn read(&mut self, offset: u64, size: usize) -> Result<usize, ErrorKind>;

    /// Write `size` bytes from the dataport to `offset`, returning the number of bytes written.
    fn write(&mut self, offset: u64, size: usize) -> Result<usize, ErrorKind>;

    /// Erase `size` bytes at `offset`, returning the number of bytes erased.
    fn erase(&mut self, offset: u64, size: u64) -> Result<u64, ErrorKind>;

    fn size(&self) -> u64;
    fn block_size(&self) -> usize;

    /// Device health flags.
    fn state(&self) -> Result<u32, ErrorKind>;

    fn geometry(&self) -> Geometry {
        Geometry {
            size: self.size(),
            block_size: self.block_size(),
        }
    }
}

/// Reject transfers that exceed the dataport.
pub(crate) fn check_transfer(dataport: &Dataport, size: usize) -> Result<(), ErrorKind> {
    if size > dataport.size() {
        return Err(ErrorKind::BufferTooSmall);
    }
    Ok(())
}

/// Reject ranges reaching past the end of the device.
pub(crate) fn check_range(offset: u64, size: u64, device_size: u64) -> Result<(), ErrorKind> {
    match offset.checked_add(size) {
        Some(end) if end <= device_size => Ok(()),
        _ => Err(ErrorKind::InvalidParameter),
    }
}
