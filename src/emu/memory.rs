use super::{Chip8Error, FONT, FONT_END_ADDRESS, FONT_START_ADDRESS, Fault};

// The constants are specified by the CHIP-8 specification
pub const MEMORY_SIZE: usize = 4096;
pub const PROGRAM_START_ADDRESS: usize = 0x200;
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START_ADDRESS;

/// The 4KB address space. The font lives in the first 80 bytes and programs
/// are loaded at `PROGRAM_START_ADDRESS`.
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Zeroed memory with the font table installed.
    pub fn new() -> Self {
        let mut memory = Memory {
            bytes: [0; MEMORY_SIZE],
        };
        memory.install_font();
        memory
    }

    /// Clears memory, reinstalls the font and copies `program` to the program start address.
    pub fn load(&mut self, program: &[u8]) -> Result<(), Chip8Error> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Chip8Error::ProgramTooLarge {
                size: program.len(),
                max_size: MAX_PROGRAM_SIZE,
            });
        }

        self.bytes.fill(0);
        self.install_font();

        let program_end = PROGRAM_START_ADDRESS + program.len();
        self.bytes[PROGRAM_START_ADDRESS..program_end].copy_from_slice(program);

        Ok(())
    }

    /// Reads two consecutive bytes as a big-endian word.
    pub fn read16(&self, address: u16) -> Result<u16, Fault> {
        let high = self.get(address)?;
        let low = self.get(address.wrapping_add(1))?;

        Ok(u16::from_be_bytes([high, low]))
    }

    pub fn get(&self, address: u16) -> Result<u8, Fault> {
        self.bytes
            .get(address as usize)
            .copied()
            .ok_or(Fault::OutOfBounds { address })
    }

    /// `len` bytes starting at `address`. Fails with the first address past the end of memory.
    pub fn slice(&self, address: u16, len: usize) -> Result<&[u8], Fault> {
        let start = address as usize;
        self.bytes.get(start..start + len).ok_or(Fault::OutOfBounds {
            address: start.max(MEMORY_SIZE) as u16,
        })
    }

    /// Mutable counterpart of [`Memory::slice`].
    pub fn slice_mut(&mut self, address: u16, len: usize) -> Result<&mut [u8], Fault> {
        let start = address as usize;
        self.bytes
            .get_mut(start..start + len)
            .ok_or(Fault::OutOfBounds {
                address: start.max(MEMORY_SIZE) as u16,
            })
    }

    pub fn as_bytes(&self) -> &[u8; MEMORY_SIZE] {
        &self.bytes
    }

    fn install_font(&mut self) {
        self.bytes[FONT_START_ADDRESS..FONT_END_ADDRESS].copy_from_slice(&FONT);
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
