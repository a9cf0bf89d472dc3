//! A CHIP-8 virtual machine.
//!
//! [`Chip8`] owns memory, registers, timers and keypad and draws onto any
//! [`DisplaySurface`]. [`Chip8Runner`] drives it from a host frame loop.

mod emu;
mod nibble;

pub use emu::*;
pub use nibble::u4;
