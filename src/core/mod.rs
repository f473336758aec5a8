pub mod framebuffer;
pub mod keyboard;
pub mod memory;
pub mod opcode;
pub mod processor;
pub mod rom;
