use super::Fault;

pub const STACK_CAPACITY: usize = 16;

/// Return-address stack for subroutine calls, bounded to 16 entries.
#[derive(Debug, Default, Clone)]
pub struct CallStack {
    frames: Vec<u16>,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack {
            frames: Vec::with_capacity(STACK_CAPACITY),
        }
    }

    pub fn push(&mut self, address: u16) -> Result<(), Fault> {
        if self.frames.len() >= STACK_CAPACITY {
            return Err(Fault::StackOverflow);
        }
        self.frames.push(address);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Fault> {
        self.frames.pop().ok_or(Fault::StackUnderflow)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Return addresses, oldest first.
    pub fn frames(&self) -> &[u16] {
        &self.frames
    }
}
