use std::path::PathBuf;

use super::STACK_CAPACITY;

/// Outcome of a single CPU cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleStatus {
    /// Continue executing instructions in the current frame.
    Continue,
    /// A sprite was drawn. The runner waits for the next frame before continuing
    /// to limit the display update rate to the frame rate.
    Drew,
    /// The key-wait instruction found no key pressed. PC was rewound so the same
    /// instruction is fetched again on the next cycle.
    Blocked,
    /// The end-of-program sentinel (0x0000) was fetched and skipped, nothing was executed.
    Halted,
}

/// Faults raised while executing a single instruction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Fault {
    #[error("stack overflow: more than {} nested subroutine calls", STACK_CAPACITY)]
    StackOverflow,

    #[error("stack underflow: attempted to return from a subroutine with empty call stack")]
    StackUnderflow,

    #[error("memory access out of bounds at address {address:#06X}")]
    OutOfBounds { address: u16 },

    #[error("unsupported instruction")]
    UnsupportedInstruction,
}

/// Error types that can occur while loading or running a CHIP-8 program
#[derive(Debug, thiserror::Error)]
pub enum Chip8Error {
    #[error("unsupported program format {extension:?}, expected a .ch8 file")]
    UnsupportedFormat { extension: String },

    #[error("could not read program {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("program is too large ({size} bytes), max size is {max_size} bytes")]
    ProgramTooLarge { size: usize, max_size: usize },

    #[error("{clock} clock rate must be a positive number of hertz, got {hz}")]
    InvalidClockRate { clock: &'static str, hz: f32 },

    #[error("could not fetch instruction at {pc:#06X}: {fault}")]
    Fetch { pc: u16, fault: Fault },

    #[error("instruction {opcode:#06X} at {pc:#06X} failed: {fault}")]
    Execution { pc: u16, opcode: u16, fault: Fault },
}

impl Chip8Error {
    /// Returns the engine fault behind a runtime error, if any.
    pub fn fault(&self) -> Option<&Fault> {
        match self {
            Chip8Error::Fetch { fault, .. } | Chip8Error::Execution { fault, .. } => Some(fault),
            _ => None,
        }
    }
}

pub const DISPLAY_X: usize = 64;
pub const DISPLAY_Y: usize = 32;
/// A type alias for the CHIP-8 display buffer representation
pub type Display<T> = [[T; DISPLAY_X]; DISPLAY_Y];
