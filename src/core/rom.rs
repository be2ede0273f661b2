use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use crate::consts;
use crate::error::{Chip8Error, Result};

/// A raw program image, no header, destined for 0x200.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rom {
    buffer: Vec<u8>,
}

impl Rom {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > consts::MAX_ROM_BYTES {
            return Err(Chip8Error::ProgramTooLarge {
                len: bytes.len(),
                max: consts::MAX_ROM_BYTES,
            });
        }
        Ok(Rom {
            buffer: bytes.to_vec(),
        })
    }

    pub fn from_reader(reader: &mut impl Read) -> Result<Self> {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;
        Rom::from_bytes(&buffer)
    }

    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let mut file = File::open(path)?;
        Rom::from_reader(&mut file)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
