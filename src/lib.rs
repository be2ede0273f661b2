//! A CHIP-8 virtual machine core.
//!
//! The host loads a program, calls [`Processor::step`] at whatever
//! instruction rate it likes and [`Processor::tick_timers`] at 60 Hz, reads
//! the [`DisplayBuffer`] when it is dirty and feeds key transitions into the
//! [`KeyboardBuffer`]. The core does no I/O of its own.

pub mod config;
pub mod consts;
pub mod core;
pub mod error;
pub mod utils;

pub use crate::config::{ProcessorConfig, UnknownOpcodePolicy};
pub use crate::core::opcode::{Instruction, Opcode};
pub use crate::core::processor::{Processor, StepStatus};
pub use crate::core::ram::{DisplayBuffer, KeyboardBuffer, Ram};
pub use crate::core::registers::{CallStack, RegisterFile};
pub use crate::core::rom::Rom;
pub use crate::core::timers::Timers;
pub use crate::error::{Chip8Error, Result};
