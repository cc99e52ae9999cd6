use log::warn;
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE_NAME: &str = "nvm_06";

/// 1 MiB.
pub const DEFAULT_FILE_SIZE: u64 = 1024 * 1024;

pub const DEFAULT_BLOCK_SIZE: usize = 1;

/// Size of the name storage including the terminator slot; names keep at most one byte less.
pub const FILE_NAME_MAX: usize = 64;

pub const ERASE_PATTERN: u8 = 0xFF;

/// Granularity of the erase fill loop.
pub const ERASE_CHUNK_SIZE: usize = 1024;

pub const DEFAULT_DATAPORT_SIZE: usize = 4096;

/// Identity of an emulated device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    dir: PathBuf,
    file_name: String,
    file_size: u64,
    block_size: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            dir: PathBuf::from("."),
            file_name: DEFAULT_FILE_NAME.to_string(),
            file_size: DEFAULT_FILE_SIZE,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl StorageConfig {
    /// Directory the backing file is created in. Not subject to the name length limit.
    pub fn with_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_file_name(mut self, name: &str) -> Self {
        self.set_file_name(name);
        self
    }

    pub fn with_file_size(mut self, size: u64) -> Self {
        self.file_size = size;
        self
    }

    pub fn with_block_size(mut self, size: usize) -> Self {
        self.block_size = size;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location of the backing file on the host.
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Set the backing file name, truncating anything beyond `FILE_NAME_MAX - 1` bytes.
    pub fn set_file_name(&mut self, name: &str) {
        self.file_name = truncate_name(name).to_string();
    }

    pub fn set_file_size(&mut self, size: u64) {
        self.file_size = size;
    }

    pub fn set_block_size(&mut self, size: usize) {
        self.block_size = size;
    }
}

fn truncate_name(name: &str) -> &str {
    let limit = FILE_NAME_MAX - 1;
    if name.len() <= limit {
        return name;
    }

    let mut end = limit;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    warn!(
        "File name '{}' exceeds {} bytes, using '{}'",
        name,
        limit,
        &name[..end]
    );
    &name[..end]
}
