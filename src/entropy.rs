use crate::dataport::Dataport;
use log::{error, trace};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub const DEFAULT_ENTROPY_SOURCE: &str = "/dev/urandom";

/// Random byte source backed by the host's entropy device.
pub struct HostEntropy {
    source: PathBuf,
    dataport: Dataport,
}

impl Default for HostEntropy {
    fn default() -> Self {
        HostEntropy::new(Dataport::default())
    }
}

impl HostEntropy {
    pub fn new(dataport: Dataport) -> Self {
        HostEntropy::with_source(DEFAULT_ENTROPY_SOURCE, dataport)
    }

    pub fn with_source<P: AsRef<Path>>(source: P, dataport: Dataport) -> Self {
        HostEntropy {
            source: source.as_ref().to_path_buf(),
            dataport,
        }
    }

    pub fn dataport(&self) -> &Dataport {
        &self.dataport
    }

    /// Fill the front of the dataport with up to `len` random bytes.
    ///
    /// `len` is clamped to the dataport size. Returns the number of bytes produced, which is
    /// zero when the entropy device cannot be opened.
    pub fn read(&mut self, len: usize) -> usize {
        let len = core::cmp::min(len, self.dataport.size());
        let mut file = match File::open(&self.source) {
            Ok(file) => file,
            Err(e) => {
                error!("Failed to open '{}': {}", self.source.display(), e);
                return 0;
            }
        };

        let buf = &mut self.dataport.buf_mut()[..len];
        let mut pos = 0;
        while pos < len {
            match file.read(&mut buf[pos..]) {
                Ok(0) => break,
                Ok(n) => pos += n,
                Err(ref e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => {
                    error!("Failed to read '{}': {}", self.source.display(), e);
                    break;
                }
            }
        }

        trace!("entropy rd len: {} got: {}", len, pos);
        pos
    }
}
