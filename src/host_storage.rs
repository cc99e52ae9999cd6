use crate::backing::{self, FileState};
use crate::config::StorageConfig;
use crate::dataport::Dataport;
use crate::error::ErrorKind;
use crate::storage::{check_range, check_transfer, Storage};
use log::{error, trace};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Storage device emulated by a file on the host.
///
/// The backing file is provisioned lazily on first access and reprovisioned, fully erased,
/// whenever it no longer matches the configured name and size.
pub struct HostStorage {
    config: StorageConfig,
    dataport: Dataport,
}

impl Default for HostStorage {
    fn default() -> Self {
        HostStorage::new(StorageConfig::default())
    }
}

impl HostStorage {
    pub fn new(config: StorageConfig) -> Self {
        HostStorage::with_dataport(config, Dataport::default())
    }

    pub fn with_dataport(config: StorageConfig, dataport: Dataport) -> Self {
        HostStorage { config, dataport }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn path(&self) -> PathBuf {
        self.config.path()
    }

    /// Takes effect on the next access; a file left under the previous name is not touched.
    pub fn set_file_name(&mut self, name: &str) {
        self.config.set_file_name(name);
    }

    /// Takes effect on the next access, which reprovisions the backing file.
    pub fn set_file_size(&mut self, size: u64) {
        self.config.set_file_size(size);
    }

    pub fn set_block_size(&mut self, size: usize) {
        self.config.set_block_size(size);
    }

    pub fn file_state(&self) -> FileState {
        backing::probe(&self.path(), self.config.file_size())
    }

    fn provision(&self) -> Result<PathBuf, ErrorKind> {
        let path = self.path();
        backing::ensure_provisioned(&path, self.config.file_size())?;
        Ok(path)
    }
}

fn open(path: &Path, writable: bool) -> Result<File, ErrorKind> {
    OpenOptions::new()
        .read(true)
        .write(writable)
        .open(path)
        .map_err(|e| {
            error!("open() failed on '{}': {}", path.display(), e);
            ErrorKind::Io
        })
}

fn io_failure(op: &str, path: &Path, e: std::io::Error) -> ErrorKind {
    error!("{} failed on '{}': {}", op, path.display(), e);
    ErrorKind::Io
}

impl Storage for HostStorage {
    fn dataport(&self) -> &Dataport {
        &self.dataport
    }

    fn dataport_mut(&mut self) -> &mut Dataport {
        &mut self.dataport
    }

    fn read(&mut self, offset: u64, size: usize) -> Result<usize, ErrorKind> {
        trace!("rd offset: {} size: {}", offset, size);
        check_transfer(&self.dataport, size)?;
        check_range(offset, size as u64, self.config.file_size())?;

        let path = self.provision()?;
        let mut file = open(&path, false)?;
        file.seek(SeekFrom::Start(offset))
            .and_then(|_| file.read_exact(&mut self.dataport.buf_mut()[..size]))
            .map_err(|e| io_failure("read", &path, e))?;

        Ok(size)
    }

    fn write(&mut self, offset: u64, size: usize) -> Result<usize, ErrorKind> {
        trace!("wr offset: {} size: {}", offset, size);
        check_transfer(&self.dataport, size)?;
        check_range(offset, size as u64, self.config.file_size())?;

        let path = self.provision()?;
        let mut file = open(&path, true)?;
        file.seek(SeekFrom::Start(offset))
            .and_then(|_| file.write_all(&self.dataport.buf()[..size]))
            .and_then(|_| file.flush())
            .map_err(|e| io_failure("write", &path, e))?;

        Ok(size)
    }

    fn erase(&mut self, offset: u64, size: u64) -> Result<u64, ErrorKind> {
        trace!("erase offset: {} size: {}", offset, size);
        check_range(offset, size, self.config.file_size())?;

        let path = self.provision()?;
        let mut file = open(&path, true)?;
        backing::fill_erased(&mut file, offset, size).map_err(|e| io_failure("erase", &path, e))
    }

    fn size(&self) -> u64 {
        self.config.file_size()
    }

    fn block_size(&self) -> usize {
        self.config.block_size()
    }

    fn state(&self) -> Result<u32, ErrorKind> {
        Err(ErrorKind::NotSupported)
    }
}
