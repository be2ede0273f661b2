use crate::config::{ProcessorConfig, UnknownOpcodePolicy};
use crate::consts;
use crate::core::opcode::{Instruction, Opcode};
use crate::core::ram::{DisplayBuffer, KeyboardBuffer, Ram};
use crate::core::registers::{CallStack, RegisterFile};
use crate::core::rom::Rom;
use crate::core::timers::Timers;
use crate::error::{Chip8Error, Result};
use crate::utils;
use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

const NEXT: u16 = consts::OP_CODE_BYTES as u16;
const SKIP: u16 = 2 * NEXT;

/// Outcome of a successful `step()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepStatus {
    /// The instruction ran and the screen is untouched.
    Continue,
    /// The instruction ran and changed (or may have changed) the screen.
    RedrawScreen,
    /// `FX0A` found no key held; nothing changed, call `step()` again later.
    Waiting,
    /// An undecodable word was stepped over under `UnknownOpcodePolicy::Skip`.
    Skipped(Opcode),
}

fn alu_add(a: u8, b: u8) -> (u8, bool) {
    a.overflowing_add(b)
}

/// Flag is set when no borrow occurred.
fn alu_sub(a: u8, b: u8) -> (u8, bool) {
    (a.wrapping_sub(b), a >= b)
}

fn alu_shr(a: u8) -> (u8, bool) {
    (a >> 1, a & 0b0000_0001 != 0)
}

fn alu_shl(a: u8) -> (u8, bool) {
    (a << 1, a & 0b1000_0000 != 0)
}

/// The interpreter. Owns every piece of machine state; the host drives it
/// with `step()` and, on its own 60 Hz cadence, `tick_timers()`.
#[derive(Debug)]
pub struct Processor<R: RngCore = StdRng> {
    pub ram: Ram,
    pub registers: RegisterFile,
    pub stack: CallStack,
    pub timers: Timers,
    pub display_buffer: DisplayBuffer,
    pub keyboard_buffer: KeyboardBuffer,
    config: ProcessorConfig,
    program: Vec<u8>,
    rng: R,
}

impl Processor<StdRng> {
    pub fn new() -> Self {
        Self::with_config(ProcessorConfig::default())
    }

    pub fn with_config(config: ProcessorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl Default for Processor<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> Processor<R> {
    pub fn with_rng(config: ProcessorConfig, rng: R) -> Self {
        Processor {
            ram: Ram::new(),
            registers: RegisterFile::default(),
            stack: CallStack::default(),
            timers: Timers::default(),
            display_buffer: DisplayBuffer::default(),
            keyboard_buffer: KeyboardBuffer::default(),
            config,
            program: Vec::new(),
            rng,
        }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Powers the machine on fresh with `program` at 0x200.
    /// On `ProgramTooLarge` nothing changes.
    pub fn load(&mut self, program: &[u8]) -> Result<()> {
        let mut ram = Ram::new();
        ram.load_program(program)?;

        self.ram = ram;
        self.registers = RegisterFile::default();
        self.stack = CallStack::default();
        self.timers = Timers::default();
        self.display_buffer = DisplayBuffer::default();
        self.keyboard_buffer.release_all();
        self.program = program.to_vec();
        debug!("loaded program [size: {}]", program.len());
        Ok(())
    }

    pub fn load_rom(&mut self, rom: &Rom) -> Result<()> {
        self.load(rom.bytes())
    }

    /// Back to power-on state with the last loaded program.
    pub fn reset(&mut self) -> Result<()> {
        let program = std::mem::take(&mut self.program);
        debug!("reset");
        self.load(&program)
    }

    pub fn fetch(&self) -> Result<Opcode> {
        let word = self.ram.read_word(self.registers.pc() as usize)?;
        Ok(Opcode::from(word))
    }

    /// Decodes the instruction at PC without running it.
    pub fn peek_instruction(&self) -> Result<Option<Instruction>> {
        Ok(self.fetch()?.decode())
    }

    pub fn tick_timers(&mut self) {
        self.timers.tick();
    }

    pub fn beep_pending(&self) -> bool {
        self.timers.beep_pending()
    }

    pub fn step(&mut self) -> Result<StepStatus> {
        let pc = self.registers.pc();
        let opcode = self.fetch()?;
        match opcode.decode() {
            Some(instr) => {
                trace!("{:#05X}: {} {}", pc, opcode, instr);
                self.execute(instr)
            }
            None => self.unknown(opcode, pc),
        }
    }

    fn unknown(&mut self, opcode: Opcode, pc: u16) -> Result<StepStatus> {
        match self.config.unknown_opcode {
            UnknownOpcodePolicy::Halt => Err(Chip8Error::UnknownOpcode {
                word: opcode.word,
                addr: pc,
            }),
            UnknownOpcodePolicy::Skip => {
                warn!("skipping unknown opcode {} at {:#05X}", opcode, pc);
                self.registers.advance(NEXT);
                Ok(StepStatus::Skipped(opcode))
            }
        }
    }

    fn v(&self, x: usize) -> Result<u8> {
        self.registers.get(x)
    }

    fn next(&mut self) -> StepStatus {
        self.registers.advance(NEXT);
        StepStatus::Continue
    }

    fn skip_if(&mut self, cond: bool) -> StepStatus {
        self.registers.advance(if cond { SKIP } else { NEXT });
        StepStatus::Continue
    }

    fn set_with_flag(&mut self, x: usize, (value, flag): (u8, bool)) -> Result<StepStatus> {
        self.registers.set(x, value)?;
        self.registers.set_flag(flag);
        Ok(self.next())
    }

    fn execute(&mut self, instr: Instruction) -> Result<StepStatus> {
        use Instruction::*;

        let status = match instr {
            Cls => {
                self.display_buffer.clear();
                self.next();
                StepStatus::RedrawScreen
            }
            Ret => {
                let addr = self.stack.pop()?;
                self.registers.set_pc(addr.wrapping_add(NEXT));
                StepStatus::Continue
            }
            Jump { addr } => {
                self.registers.set_pc(addr);
                StepStatus::Continue
            }
            Call { addr } => {
                self.stack.push(self.registers.pc())?;
                self.registers.set_pc(addr);
                StepStatus::Continue
            }
            JumpOffset { addr } => {
                let v0 = self.v(0)? as u16;
                self.registers.set_pc(addr.wrapping_add(v0));
                StepStatus::Continue
            }

            // Conditional skips
            SkipEqImm { x, nn } => {
                let cond = self.v(x)? == nn;
                self.skip_if(cond)
            }
            SkipNeImm { x, nn } => {
                let cond = self.v(x)? != nn;
                self.skip_if(cond)
            }
            SkipEqReg { x, y } => {
                let cond = self.v(x)? == self.v(y)?;
                self.skip_if(cond)
            }
            SkipNeReg { x, y } => {
                let cond = self.v(x)? != self.v(y)?;
                self.skip_if(cond)
            }

            // Set register
            LoadImm { x, nn } => {
                self.registers.set(x, nn)?;
                self.next()
            }
            Move { x, y } => {
                let vy = self.v(y)?;
                self.registers.set(x, vy)?;
                self.next()
            }
            LoadIndex { addr } => {
                self.registers.set_index(addr);
                self.next()
            }

            // Arithmetic, flag in VF
            AddImm { x, nn } => {
                let vx = self.v(x)?;
                self.registers.set(x, vx.wrapping_add(nn))?;
                self.next()
            }
            AddReg { x, y } => {
                let result = alu_add(self.v(x)?, self.v(y)?);
                self.set_with_flag(x, result)?
            }
            SubReg { x, y } => {
                let result = alu_sub(self.v(x)?, self.v(y)?);
                self.set_with_flag(x, result)?
            }
            SubNeg { x, y } => {
                let result = alu_sub(self.v(y)?, self.v(x)?);
                self.set_with_flag(x, result)?
            }
            ShiftRight { x, .. } => {
                let result = alu_shr(self.v(x)?);
                self.set_with_flag(x, result)?
            }
            ShiftLeft { x, .. } => {
                let result = alu_shl(self.v(x)?);
                self.set_with_flag(x, result)?
            }

            // Logical
            Or { x, y } => {
                let value = self.v(x)? | self.v(y)?;
                self.registers.set(x, value)?;
                self.next()
            }
            And { x, y } => {
                let value = self.v(x)? & self.v(y)?;
                self.registers.set(x, value)?;
                self.next()
            }
            Xor { x, y } => {
                let value = self.v(x)? ^ self.v(y)?;
                self.registers.set(x, value)?;
                self.next()
            }

            Random { x, nn } => {
                let rand_val: u8 = self.rng.gen();
                self.registers.set(x, nn & rand_val)?;
                self.next()
            }

            Draw { x, y, n } => {
                let x_coord = self.v(x)? as usize;
                let y_coord = self.v(y)? as usize;
                let rows = self
                    .ram
                    .slice(self.registers.index() as usize, n as usize)?;
                let collided = self.display_buffer.draw_sprite(x_coord, y_coord, rows);
                self.registers.set_flag(collided);
                self.next();
                StepStatus::RedrawScreen
            }

            // Keypad
            SkipKeyPressed { x } => {
                let pressed = self.keyboard_buffer.is_pressed(self.v(x)? as usize)?;
                self.skip_if(pressed)
            }
            SkipKeyNotPressed { x } => {
                let pressed = self.keyboard_buffer.is_pressed(self.v(x)? as usize)?;
                self.skip_if(!pressed)
            }
            WaitKey { x } => match self.keyboard_buffer.last_pressed() {
                Some(key) => {
                    self.registers.set(x, key)?;
                    self.next()
                }
                None => {
                    trace!("waiting for key into V{:X}", x);
                    StepStatus::Waiting
                }
            },

            // Timers
            LoadDelay { x } => {
                self.registers.set(x, self.timers.delay())?;
                self.next()
            }
            SetDelay { x } => {
                let vx = self.v(x)?;
                self.timers.set_delay(vx);
                self.next()
            }
            SetSound { x } => {
                let vx = self.v(x)?;
                self.timers.set_sound(vx);
                self.next()
            }

            // Index register and memory
            AddIndex { x } => {
                let index = self.registers.index().wrapping_add(self.v(x)? as u16);
                self.registers.set_index(index);
                self.registers.set_flag(index > consts::INDEX_LIMIT);
                self.next()
            }
            LoadFont { x } => {
                let glyph = self.v(x)? as u16 * consts::FONT_GLYPH_BYTES as u16;
                self.registers.set_index(glyph);
                self.next()
            }
            StoreBcd { x } => {
                let digits = utils::bcd_split(self.v(x)?);
                self.ram
                    .slice_mut(self.registers.index() as usize, digits.len())?
                    .copy_from_slice(&digits);
                self.next()
            }
            StoreRegisters { x } => {
                let index = self.registers.index();
                let count = x + 1;
                let regs = self
                    .registers
                    .all()
                    .get(..count)
                    .ok_or(Chip8Error::InvalidRegister(x))?;
                self.ram
                    .slice_mut(index as usize, count)?
                    .copy_from_slice(regs);
                self.next();
                self.registers.set_index(index.wrapping_add(count as u16));
                StepStatus::Continue
            }
            LoadRegisters { x } => {
                let index = self.registers.index();
                let count = x + 1;
                let bytes = self.ram.slice(index as usize, count)?;
                for (i, &byte) in bytes.iter().enumerate() {
                    self.registers.set(i, byte)?;
                }
                self.next();
                self.registers.set_index(index.wrapping_add(count as u16));
                StepStatus::Continue
            }
        };
        Ok(status)
    }
}
