use log::{debug, trace};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{
    CallStack, Chip8Error, CycleStatus, DisplaySurface, FrameBuffer, Keypad, Memory, Opcode,
    PROGRAM_START_ADDRESS, Timers,
};
use crate::u4;

/// Width of one instruction in bytes.
pub const INSTRUCTION_SIZE: u16 = 2;
/// Word treated as the end of the loaded program.
pub const PROGRAM_END_SENTINEL: u16 = 0x0000;

/// CHIP-8 virtual machine state
pub struct Chip8<D = FrameBuffer> {
    /// 4KB address space, font at 0x000 and program at 0x200
    pub(crate) memory: Memory,
    /// Screen the draw and clear instructions operate on
    pub(crate) display: D,

    /// Program counter: address of the next instruction to execute
    pub(crate) pc: u16,
    /// Index register: used for memory operations
    pub(crate) i: u16,
    /// General-purpose registers V0-VF (VF is used as a flag register)
    pub(crate) v: [u8; 16],
    /// Call stack for subroutine returns
    pub(crate) stack: CallStack,

    pub(crate) timers: Timers,
    pub(crate) keypad: Keypad,

    /// Set while the key-wait instruction has not seen a key press
    pub(crate) blocked: bool,
    /// Source for the random instruction
    pub(crate) rng: StdRng,

    /// Bytes of the loaded program, kept for `reset`
    program: Vec<u8>,
}

impl<D: DisplaySurface> Chip8<D> {
    pub fn new(display: D) -> Self {
        Self::with_rng(display, StdRng::from_os_rng())
    }

    /// Like `new`, but the random instruction produces a reproducible sequence.
    pub fn with_seed(display: D, seed: u64) -> Self {
        Self::with_rng(display, StdRng::seed_from_u64(seed))
    }

    fn with_rng(display: D, rng: StdRng) -> Self {
        Chip8 {
            memory: Memory::new(),
            display,
            pc: PROGRAM_START_ADDRESS as u16,
            i: 0,
            v: [0; 16],
            stack: CallStack::new(),
            timers: Timers::new(),
            keypad: Keypad::new(),
            blocked: false,
            rng,
            program: Vec::new(),
        }
    }

    /// Loads a program into memory and resets the machine to run it from the start.
    ///
    /// The display is left untouched.
    pub fn load(&mut self, program: &[u8]) -> Result<(), Chip8Error> {
        self.memory.load(program)?;
        self.program = program.to_vec();
        self.reset_registers();

        debug!("loaded {} byte program", program.len());
        Ok(())
    }

    /// External reset: clears the display and restarts the loaded program
    /// with fresh memory, registers, timers and keypad.
    pub fn reset(&mut self) -> Result<(), Chip8Error> {
        self.memory.load(&self.program)?;
        self.reset_registers();
        self.display.clear();
        Ok(())
    }

    fn reset_registers(&mut self) {
        self.pc = PROGRAM_START_ADDRESS as u16;
        self.i = 0;
        self.v = [0; 16];
        self.stack.clear();
        self.timers.reset();
        self.keypad.release_all();
        self.blocked = false;
    }

    /// Executes a single CPU cycle (fetch, decode, execute).
    ///
    /// When the key-wait instruction is still waiting, PC is left on it so the
    /// next cycle fetches it again and `CycleStatus::Blocked` is returned.
    pub fn cycle(&mut self) -> Result<CycleStatus, Chip8Error> {
        let pc = self.pc;
        let raw = self
            .memory
            .read16(pc)
            .map_err(|fault| Chip8Error::Fetch { pc, fault })?;

        self.pc = pc.wrapping_add(INSTRUCTION_SIZE);

        if raw == PROGRAM_END_SENTINEL {
            return Ok(CycleStatus::Halted);
        }

        let opcode = Opcode::decode(raw);
        trace!("{pc:#06X}: {raw:04X}  {opcode}");

        let status = self
            .execute(opcode)
            .map_err(|fault| Chip8Error::Execution {
                pc,
                opcode: raw,
                fault,
            })?;

        if self.blocked {
            // Go back to the key-wait instruction
            self.pc = self.pc.wrapping_sub(INSTRUCTION_SIZE);
        }

        Ok(status)
    }

    /// Advances the delay and sound timers. Should be called at 60Hz.
    ///
    /// Returns true when the sound timer just reached zero.
    pub fn tick(&mut self) -> bool {
        let sound_stopped = self.timers.tick();
        if sound_stopped {
            debug!("sound timer expired");
        }
        sound_stopped
    }

    /// Returns true if the sound timer is greater than zero, indicating a beep should be played.
    pub fn should_beep(&self) -> bool {
        self.timers.should_beep()
    }

    /// Set the state of a key on the keypad.
    pub fn set_key(&mut self, key: u4, pressed: bool) {
        self.keypad.set(key, pressed);
    }

    /// Flushes the display surface to the screen.
    pub fn present(&mut self) -> Result<(), D::Error> {
        self.display.present()
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn i(&self) -> u16 {
        self.i
    }

    pub fn v(&self) -> &[u8; 16] {
        &self.v
    }

    pub fn stack(&self) -> &CallStack {
        &self.stack
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// True while the key-wait instruction is waiting for a key press.
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }
}

impl Default for Chip8<FrameBuffer> {
    fn default() -> Self {
        Self::new(FrameBuffer::new())
    }
}
