pub mod opcode;
pub mod processor;
pub mod ram;
pub mod registers;
pub mod rom;
pub mod timers;
