use log::debug;
use rand::Rng;

use super::{
    Chip8, CycleStatus, DisplaySurface, FONT_GLYPH_SIZE, FONT_START_ADDRESS, Fault,
    INSTRUCTION_SIZE, Opcode, OpcodeALU,
};
use crate::u4;

impl<D: DisplaySurface> Chip8<D> {
    /// Applies one decoded instruction. PC already points past it.
    pub(crate) fn execute(&mut self, opcode: Opcode) -> Result<CycleStatus, Fault> {
        match opcode {
            Opcode::System { .. } => {}
            Opcode::ClearDisplay => {
                self.display.clear();
            }
            Opcode::Return => {
                self.pc = self.stack.pop()?;
            }
            Opcode::Jump { nnn } => {
                self.pc = nnn;
            }
            Opcode::JumpWithOffset { nnn } => {
                self.pc = nnn.wrapping_add(self.v[0].into());
            }
            Opcode::Call { nnn } => {
                self.stack.push(self.pc)?;
                self.pc = nnn;
            }
            Opcode::SkipRegEqualImm { x, nn } => {
                self.skip_if(self.v[x] == nn);
            }
            Opcode::SkipRegNotEqualImm { x, nn } => {
                self.skip_if(self.v[x] != nn);
            }
            Opcode::SkipRegEqualReg { x, y } => {
                self.skip_if(self.v[x] == self.v[y]);
            }
            Opcode::SkipRegNotEqualReg { x, y } => {
                self.skip_if(self.v[x] != self.v[y]);
            }
            Opcode::SetRegImm { x, nn } => {
                self.v[x] = nn;
            }
            Opcode::AddRegImm { x, nn } => {
                self.v[x] = self.v[x].wrapping_add(nn);
            }
            Opcode::ALU { x, y, op } => {
                self.execute_alu(x, y, op);
            }
            Opcode::SetIndexImm { nnn } => {
                self.i = nnn;
            }
            Opcode::AddIndexReg { x } => {
                self.i = self.i.wrapping_add(self.v[x].into());
            }
            Opcode::Random { x, nn } => {
                let rand_byte: u8 = self.rng.random();
                self.v[x] = rand_byte & nn;
            }
            Opcode::Draw { x, y, n } => {
                return self.execute_draw(x, y, n);
            }
            Opcode::SkipIfPressed { x } => {
                self.skip_if(self.keypad.is_pressed(self.v[x]));
            }
            Opcode::SkipIfNotPressed { x } => {
                self.skip_if(!self.keypad.is_pressed(self.v[x]));
            }
            Opcode::WaitForKey { x } => {
                return Ok(self.execute_wait_for_key(x));
            }
            Opcode::ReadDelayTimer { x } => {
                self.v[x] = self.timers.delay;
            }
            Opcode::SetDelayTimer { x } => {
                self.timers.delay = self.v[x];
            }
            Opcode::SetSoundTimer { x } => {
                self.timers.sound = self.v[x];
            }
            Opcode::FontChar { x } => {
                let glyph = FONT_START_ADDRESS + usize::from(self.v[x]) * FONT_GLYPH_SIZE;
                self.i = glyph as u16;
            }
            Opcode::BCD { x } => {
                let value = self.v[x];
                self.memory
                    .slice_mut(self.i, 3)?
                    .copy_from_slice(&[value / 100, (value / 10) % 10, value % 10]);
            }
            Opcode::StoreRegs { x } => {
                let count = usize::from(x) + 1;
                self.memory
                    .slice_mut(self.i, count)?
                    .copy_from_slice(&self.v[..count]);
            }
            Opcode::LoadRegs { x } => {
                let count = usize::from(x) + 1;
                let bytes = self.memory.slice(self.i, count)?;
                self.v[..count].copy_from_slice(bytes);
            }
            Opcode::Unknown(_) => {
                return Err(Fault::UnsupportedInstruction);
            }
        };

        Ok(CycleStatus::Continue)
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.pc = self.pc.wrapping_add(INSTRUCTION_SIZE);
        }
    }

    /// VF is written after Vx so the flag wins when x is F.
    fn execute_alu(&mut self, x: u4, y: u4, op: OpcodeALU) {
        match op {
            OpcodeALU::Set => self.v[x] = self.v[y],
            OpcodeALU::Or => self.v[x] |= self.v[y],
            OpcodeALU::And => self.v[x] &= self.v[y],
            OpcodeALU::Xor => self.v[x] ^= self.v[y],
            OpcodeALU::Add => {
                let (res, carry) = self.v[x].overflowing_add(self.v[y]);
                self.v[x] = res;
                self.v[0xF] = carry.into();
            }
            OpcodeALU::Sub => {
                let (res, borrow) = self.v[x].overflowing_sub(self.v[y]);
                self.v[x] = res;
                self.v[0xF] = (!borrow).into();
            }
            OpcodeALU::SubReverse => {
                let (res, borrow) = self.v[y].overflowing_sub(self.v[x]);
                self.v[x] = res;
                self.v[0xF] = (!borrow).into();
            }
            OpcodeALU::ShiftRight => {
                let lsb = self.v[x] & 1;
                self.v[x] >>= 1;
                self.v[0xF] = lsb;
            }
            OpcodeALU::ShiftLeft => {
                let msb = (self.v[x] >> 7) & 1;
                self.v[x] <<= 1;
                self.v[0xF] = msb;
            }
        }
    }

    fn execute_draw(&mut self, x: u4, y: u4, n: u4) -> Result<CycleStatus, Fault> {
        let rows = self.memory.slice(self.i, usize::from(n))?;
        let collided = self.display.draw_sprite(self.v[x], self.v[y], rows);

        self.v[0xF] = collided.into();
        Ok(CycleStatus::Drew)
    }

    fn execute_wait_for_key(&mut self, x: u4) -> CycleStatus {
        match self.keypad.last_pressed() {
            Some(key) => {
                if self.blocked {
                    debug!("key {key} pressed, resuming");
                }
                self.v[x] = key.into();
                self.blocked = false;
                CycleStatus::Continue
            }
            None => {
                if !self.blocked {
                    debug!("waiting for a key press into V{x}");
                }
                // Repeat this instruction until a key is pressed
                self.blocked = true;
                CycleStatus::Blocked
            }
        }
    }
}
