//! A CHIP-8 virtual machine.
//!
//! The `core` module is free of any windowing or audio code: it is driven by
//! calling [`Processor::step`] at the instruction rate and
//! [`Processor::tick_timers`] at 60 Hz, and reports what a front end should do
//! through [`CycleStatus`] and [`ToneEvent`].

pub mod config;
pub mod consts;
pub mod core;
pub mod error;
pub mod instructions;
mod utils;

pub use crate::config::{Rgb, Settings, Waveform};
pub use crate::core::framebuffer::FrameBuffer;
pub use crate::core::keyboard::KeyboardState;
pub use crate::core::memory::Memory;
pub use crate::core::opcode::Opcode;
pub use crate::core::processor::{CycleStatus, Processor, ToneEvent};
pub use crate::core::rom::Rom;
pub use crate::error::Chip8Error;
