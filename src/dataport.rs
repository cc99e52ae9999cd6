use crate::config::DEFAULT_DATAPORT_SIZE;

/// Fixed-capacity staging buffer shared between a storage device and its caller.
///
/// Read operations deposit data at the front of the buffer, write operations take their
/// payload from the front of the buffer. The capacity is chosen once at construction and
/// bounds the size of every single transfer.
pub struct Dataport(Box<[u8]>);

impl Dataport {
    pub fn new(size: usize) -> Self {
        Dataport(vec![0u8; size].into_boxed_slice())
    }

    pub fn size(&self) -> usize {
        self.0.len()
    }

    pub fn buf(&self) -> &[u8] {
        &self.0
    }

    pub fn buf_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }

    /// Copy `data` to the front of the buffer, returning how many bytes fit.
    pub fn load(&mut self, data: &[u8]) -> usize {
        let num_bytes = core::cmp::min(self.size(), data.len());
        self.0[..num_bytes].copy_from_slice(&data[..num_bytes]);
        num_bytes
    }
}

impl Default for Dataport {
    fn default() -> Self {
        Dataport::new(DEFAULT_DATAPORT_SIZE)
    }
}
