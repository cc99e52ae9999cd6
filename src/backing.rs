//! Lifecycle of the host file that backs an emulated device.
//!
//! The file is never trusted blindly: every access first probes it, and a file that is
//! missing or does not have exactly the configured size is replaced by a fully erased one.

use crate::config::{ERASE_CHUNK_SIZE, ERASE_PATTERN};
use crate::error::ErrorKind;
use log::{debug, error, info, trace};
use std::fs::{self, File};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    Absent,
    SizeMismatch { actual: u64 },
    Valid,
}

pub fn probe(path: &Path, expected: u64) -> FileState {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => {
            let actual = meta.len();
            trace!(
                "File '{}' exists with {} bytes (we expect {} bytes)",
                path.display(),
                actual,
                expected
            );
            if actual == expected {
                FileState::Valid
            } else {
                FileState::SizeMismatch { actual }
            }
        }
        _ => FileState::Absent,
    }
}

/// Make sure a valid backing file of `size` bytes exists at `path`.
pub fn ensure_provisioned(path: &Path, size: u64) -> Result<(), ErrorKind> {
    match probe(path, size) {
        FileState::Valid => Ok(()),
        state => {
            debug!("File '{}' is {:?}, reprovisioning", path.display(), state);
            reprovision(path, size)
        }
    }
}

/// Replace whatever lives at `path` with a file of exactly `size` erased bytes.
///
/// The new content is assembled next to the target and renamed over it, so an interrupted
/// allocation never leaves a half-erased file under the configured name.
pub fn reprovision(path: &Path, size: u64) -> Result<(), ErrorKind> {
    let staging = staging_path(path);
    if let Err(e) = allocate(&staging, size).and_then(|_| fs::rename(&staging, path)) {
        error!("Failed to allocate file '{}': {}", path.display(), e);
        if let Err(e) = fs::remove_file(&staging) {
            debug!("Could not remove staging file '{}': {}", staging.display(), e);
        }
        return Err(ErrorKind::Io);
    }

    info!("Allocated file '{}' with {} bytes", path.display(), size);
    Ok(())
}

fn allocate(path: &Path, size: u64) -> io::Result<()> {
    let mut file = File::create(path)?;
    let written = fill_erased(&mut file, 0, size)?;
    debug_assert_eq!(written, size);
    file.flush()
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".alloc");
    path.with_file_name(name)
}

/// Write the erase pattern over `len` bytes starting at `offset`, one chunk at a time.
///
/// Returns the number of bytes written.
pub fn fill_erased<W: Write + Seek>(dev: &mut W, offset: u64, len: u64) -> io::Result<u64> {
    let chunk = [ERASE_PATTERN; ERASE_CHUNK_SIZE];
    dev.seek(SeekFrom::Start(offset))?;

    let mut erased = 0;
    let mut left = len;
    while left > 0 {
        let num_bytes = core::cmp::min(left, ERASE_CHUNK_SIZE as u64) as usize;
        dev.write_all(&chunk[..num_bytes])?;
        erased += num_bytes as u64;
        left -= num_bytes as u64;
    }

    Ok(erased)
}
