use std::path::{Path, PathBuf};

use log::debug;

use super::{Chip8Error, MAX_PROGRAM_SIZE};

/// File extension accepted for CHIP-8 programs.
pub const PROGRAM_EXTENSION: &str = "ch8";

/// Raw bytes of a CHIP-8 program read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl Program {
    /// Reads a `.ch8` file. The extension is checked before the file is opened.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Chip8Error> {
        let path = path.as_ref();

        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !extension.eq_ignore_ascii_case(PROGRAM_EXTENSION) {
            return Err(Chip8Error::UnsupportedFormat { extension });
        }

        let bytes = std::fs::read(path).map_err(|source| Chip8Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if bytes.len() > MAX_PROGRAM_SIZE {
            return Err(Chip8Error::ProgramTooLarge {
                size: bytes.len(),
                max_size: MAX_PROGRAM_SIZE,
            });
        }

        debug!("read {} bytes from {}", bytes.len(), path.display());
        Ok(Program {
            path: path.to_path_buf(),
            bytes,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Name shown in the window title, the file stem.
    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
