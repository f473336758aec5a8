use std::io;

/// Fatal conditions raised by the virtual machine.
///
/// Unrecognised instructions are deliberately absent: they are reported through
/// [`crate::core::processor::CycleStatus::Unknown`] and execution carries on.
#[derive(Debug, thiserror::Error)]
pub enum Chip8Error {
    #[error("Memory access out of bounds at address {address:#06X} (memory size {size:#06X})")]
    MemoryOutOfBounds { address: usize, size: usize },

    #[error("Cannot load {len} bytes at offset {offset:#06X}: memory holds {size} bytes")]
    LoadOutOfBounds {
        offset: usize,
        len: usize,
        size: usize,
    },

    #[error("Stack overflow: subroutine calls nested deeper than {depth}")]
    StackOverflow { depth: usize },

    #[error("Stack underflow: attempted to return from a subroutine with empty call stack")]
    StackUnderflow,

    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
