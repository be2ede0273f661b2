use crate::consts;
use crate::error::{Chip8Error, Result};

/// V0..VF, the index register I and the program counter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterFile {
    v: [u8; consts::REG_COUNT],
    index: u16,
    pc: u16,
}

impl Default for RegisterFile {
    fn default() -> Self {
        RegisterFile {
            v: [0; consts::REG_COUNT],
            index: 0,
            pc: consts::PROG_OFFSET as u16,
        }
    }
}

impl RegisterFile {
    pub fn get(&self, i: usize) -> Result<u8> {
        self.v.get(i).copied().ok_or(Chip8Error::InvalidRegister(i))
    }

    pub fn set(&mut self, i: usize, value: u8) -> Result<()> {
        let reg = self.v.get_mut(i).ok_or(Chip8Error::InvalidRegister(i))?;
        *reg = value;
        Ok(())
    }

    pub fn flag(&self) -> u8 {
        self.v[consts::FLAG_REGISTER]
    }

    pub fn set_flag(&mut self, flag: bool) {
        self.v[consts::FLAG_REGISTER] = flag as u8;
    }

    pub fn all(&self) -> &[u8; consts::REG_COUNT] {
        &self.v
    }

    pub fn index(&self) -> u16 {
        self.index
    }

    pub fn set_index(&mut self, index: u16) {
        self.index = index;
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn set_pc(&mut self, pc: u16) {
        self.pc = pc;
    }

    /// No wraparound guard: running off the end surfaces as `OutOfBounds` on the next fetch.
    pub fn advance(&mut self, n: u16) {
        self.pc = self.pc.wrapping_add(n);
    }
}

/// Return addresses for CALL/RET.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallStack {
    stack: [u16; consts::STACK_SIZE],
    pointer: usize,
}

impl CallStack {
    pub fn push(&mut self, addr: u16) -> Result<()> {
        if self.is_full() {
            return Err(Chip8Error::StackOverflow);
        }
        self.stack[self.pointer] = addr;
        self.pointer += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16> {
        if self.pointer == 0 {
            return Err(Chip8Error::StackUnderflow);
        }
        self.pointer -= 1;
        Ok(self.stack[self.pointer])
    }

    pub fn peek(&self) -> Option<u16> {
        self.pointer.checked_sub(1).map(|top| self.stack[top])
    }

    pub fn len(&self) -> usize {
        self.pointer
    }

    pub fn is_empty(&self) -> bool {
        self.pointer == 0
    }

    pub fn is_full(&self) -> bool {
        self.pointer == consts::STACK_SIZE
    }
}
