use thiserror::Error;

pub type Result<T> = std::result::Result<T, Chip8Error>;

#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("address {addr:#05X} is outside of memory")]
    OutOfBounds { addr: usize },
    #[error("program is {len} bytes, at most {max} fit in memory")]
    ProgramTooLarge { len: usize, max: usize },
    #[error("call stack overflow")]
    StackOverflow,
    #[error("return with an empty call stack")]
    StackUnderflow,
    #[error("unknown opcode {word:#06X} at {addr:#05X}")]
    UnknownOpcode { word: u16, addr: u16 },
    #[error("invalid register: V{0:X}")]
    InvalidRegister(usize),
    #[error("invalid key: {0:#X}")]
    InvalidKey(usize),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
