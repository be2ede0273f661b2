use crate::consts;
use crate::error::{Chip8Error, Result};
use crate::utils;
use std::fmt;

/// The 4 KiB address space. The font set lives at the bottom, programs at 0x200.
#[derive(Clone)]
pub struct Ram {
    buffer: [u8; consts::RAM_BYTES],
}

impl Default for Ram {
    fn default() -> Self {
        let mut buffer = [0; consts::RAM_BYTES];
        buffer[0..consts::FONT_SET_SIZE].copy_from_slice(&consts::FONT_SET);
        Ram { buffer }
    }
}

impl fmt::Debug for Ram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ram")
            .field("bytes", &self.buffer.len())
            .finish()
    }
}

impl Ram {
    pub fn new() -> Self {
        Default::default()
    }

    /// Fails unless every address in `addr..addr + len` is inside memory.
    pub fn check_range(&self, addr: usize, len: usize) -> Result<()> {
        if len == 0 {
            return Ok(());
        }
        let last = addr.saturating_add(len - 1);
        if last >= consts::RAM_BYTES {
            return Err(Chip8Error::OutOfBounds {
                addr: addr.max(consts::RAM_BYTES),
            });
        }
        Ok(())
    }

    pub fn read(&self, addr: usize) -> Result<u8> {
        self.buffer
            .get(addr)
            .copied()
            .ok_or(Chip8Error::OutOfBounds { addr })
    }

    pub fn write(&mut self, addr: usize, value: u8) -> Result<()> {
        let cell = self
            .buffer
            .get_mut(addr)
            .ok_or(Chip8Error::OutOfBounds { addr })?;
        *cell = value;
        Ok(())
    }

    pub fn slice(&self, addr: usize, len: usize) -> Result<&[u8]> {
        self.check_range(addr, len)?;
        Ok(&self.buffer[addr..addr + len])
    }

    pub fn slice_mut(&mut self, addr: usize, len: usize) -> Result<&mut [u8]> {
        self.check_range(addr, len)?;
        Ok(&mut self.buffer[addr..addr + len])
    }

    /// Reads a big-endian instruction word.
    pub fn read_word(&self, addr: usize) -> Result<[u8; consts::OP_CODE_BYTES]> {
        let bytes = self.slice(addr, consts::OP_CODE_BYTES)?;
        Ok([bytes[0], bytes[1]])
    }

    /// Replaces the program area with `program`; memory is untouched on failure.
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        if program.len() > consts::MAX_ROM_BYTES {
            return Err(Chip8Error::ProgramTooLarge {
                len: program.len(),
                max: consts::MAX_ROM_BYTES,
            });
        }
        let prog_area = &mut self.buffer[consts::PROG_OFFSET..];
        prog_area.fill(0);
        prog_area[..program.len()].copy_from_slice(program);
        Ok(())
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }
}

/// 64x32 monochrome pixels plus the redraw flag hosts poll between frames.
#[derive(Clone)]
pub struct DisplayBuffer {
    buffer: [bool; consts::DISPL_PIXELS],
    dirty: bool,
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        DisplayBuffer {
            buffer: [false; consts::DISPL_PIXELS],
            dirty: false,
        }
    }
}

impl fmt::Debug for DisplayBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayBuffer")
            .field("lit", &self.buffer.iter().filter(|p| **p).count())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl DisplayBuffer {
    pub fn clear(&mut self) {
        self.buffer = [false; consts::DISPL_PIXELS];
        self.dirty = true;
    }

    /// XORs `rows` onto the screen at (x, y), wrapping at both edges.
    /// Returns true when any lit pixel was switched off.
    pub fn draw_sprite(&mut self, x: usize, y: usize, rows: &[u8]) -> bool {
        let mut collided = false;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..consts::SPRITE_WIDTH {
                if bits & (0x80 >> col) == 0 {
                    continue;
                }
                let (px, py) =
                    utils::wrap_coords(x + col, y + row, consts::CHIP8_WIDTH, consts::CHIP8_HEIGHT);
                let pixel = &mut self.buffer[px + consts::CHIP8_WIDTH * py];
                collided |= *pixel;
                *pixel ^= true;
            }
        }
        self.dirty = true;
        collided
    }

    /// Out-of-range coordinates wrap like sprite drawing does.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        let (x, y) = utils::wrap_coords(x, y, consts::CHIP8_WIDTH, consts::CHIP8_HEIGHT);
        self.buffer[x + consts::CHIP8_WIDTH * y]
    }

    /// Row-major, `x + 64 * y`.
    pub fn pixels(&self) -> &[bool] {
        &self.buffer
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DisplayBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.buffer.chunks(consts::CHIP8_WIDTH) {
            let line: String = row.iter().map(|&p| if p { 'O' } else { ' ' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Latched state of the 16-key hex keypad. The host presses and releases.
#[derive(Clone, Default, Debug)]
pub struct KeyboardBuffer {
    buffer: [bool; consts::KEYBOARD_SIZE],
}

impl KeyboardBuffer {
    fn slot(&mut self, key: usize) -> Result<&mut bool> {
        self.buffer.get_mut(key).ok_or(Chip8Error::InvalidKey(key))
    }

    pub fn press(&mut self, key: usize) -> Result<()> {
        *self.slot(key)? = true;
        Ok(())
    }

    pub fn release(&mut self, key: usize) -> Result<()> {
        *self.slot(key)? = false;
        Ok(())
    }

    pub fn release_all(&mut self) {
        self.buffer = [false; consts::KEYBOARD_SIZE];
    }

    pub fn is_pressed(&self, key: usize) -> Result<bool> {
        self.buffer
            .get(key)
            .copied()
            .ok_or(Chip8Error::InvalidKey(key))
    }

    /// Highest-numbered key currently held.
    pub fn last_pressed(&self) -> Option<u8> {
        self.buffer.iter().rposition(|&k| k).map(|k| k as u8)
    }
}
