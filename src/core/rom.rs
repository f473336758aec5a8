use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use crate::core::memory::Memory;
use crate::error::Chip8Error;

/// A program image waiting to be copied into memory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Rom {
    pub buffer: Vec<u8>,
}

impl Rom {
    pub fn new(path: impl AsRef<Path>, max_size: usize) -> Result<Self, Chip8Error> {
        let mut file = File::open(path)?;
        Self::from_reader(&mut file, max_size)
    }

    /// Reads the whole of `reader`, refusing images longer than `max_size`.
    pub fn from_reader(reader: &mut impl Read, max_size: usize) -> Result<Self, Chip8Error> {
        let mut buffer = Vec::new();
        // One byte past the limit is enough to know the image is too large
        let size = reader
            .take(max_size as u64 + 1)
            .read_to_end(&mut buffer)?;
        if size > max_size {
            return Err(Chip8Error::RomTooLarge { size, max_size });
        }
        Ok(Rom { buffer })
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn load_into(&self, memory: &mut Memory, offset: usize) -> Result<(), Chip8Error> {
        memory.load(&self.buffer, offset)
    }
}
