use crate::config::ERASE_PATTERN;
use crate::dataport::Dataport;
use crate::error::ErrorKind;
use crate::storage::{check_range, check_transfer, Storage};

pub(crate) fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// In-memory device with the same contract as the host storage, used as a reference model.
pub(crate) struct RamStorage {
    data: Vec<u8>,
    dataport: Dataport,
}

impl RamStorage {
    pub(crate) fn new(nbytes: usize, dataport_size: usize) -> Self {
        RamStorage {
            data: vec![ERASE_PATTERN; nbytes],
            dataport: Dataport::new(dataport_size),
        }
    }
}

impl Storage for RamStorage {
    fn dataport(&self) -> &Dataport {
        &self.dataport
    }

    fn dataport_mut(&mut self) -> &mut Dataport {
        &mut self.dataport
    }

    fn read(&mut self, offset: u64, size: usize) -> Result<usize, ErrorKind> {
        check_transfer(&self.dataport, size)?;
        check_range(offset, size as u64, self.size())?;
        let start_addr = offset as usize;
        self.dataport.buf_mut()[..size].copy_from_slice(&self.data[start_addr..start_addr + size]);
        Ok(size)
    }

    fn write(&mut self, offset: u64, size: usize) -> Result<usize, ErrorKind> {
        check_transfer(&self.dataport, size)?;
        check_range(offset, size as u64, self.size())?;
        let start_addr = offset as usize;
        self.data[start_addr..start_addr + size].copy_from_slice(&self.dataport.buf()[..size]);
        Ok(size)
    }

    fn erase(&mut self, offset: u64, size: u64) -> Result<u64, ErrorKind> {
        check_range(offset, size, self.size())?;
        let start_addr = offset as usize;
        let end_addr = start_addr + size as usize;
        for i in &mut self.data[start_addr..end_addr] {
            *i = ERASE_PATTERN;
        }
        Ok(size)
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn block_size(&self) -> usize {
        1
    }

    fn state(&self) -> Result<u32, ErrorKind> {
        Err(ErrorKind::NotSupported)
    }
}
