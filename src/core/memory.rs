use crate::consts;
use crate::error::Chip8Error;

/// Flat byte-addressable RAM with the hexadecimal font glyphs baked in at
/// `FONT_OFFSET`. Glyph `k` lives at `[5k, 5k + 5)`.
#[derive(Debug, Clone)]
pub struct Memory {
    buffer: Box<[u8]>,
}

const _: () = assert!(consts::RAM_BYTES >= consts::FONT_OFFSET + consts::FONT_SET_SIZE);

impl Default for Memory {
    fn default() -> Self {
        Memory::new(consts::RAM_BYTES).expect("standard memory holds the font")
    }
}

impl Memory {
    pub fn new(size: usize) -> Result<Self, Chip8Error> {
        let mut memory = Memory {
            buffer: vec![0; size].into_boxed_slice(),
        };
        memory.load(&consts::FONT_SET, consts::FONT_OFFSET)?;
        Ok(memory)
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Copies `data` into memory starting at `offset`. Nothing is written if
    /// the data would run past the end of memory.
    pub fn load(&mut self, data: &[u8], offset: usize) -> Result<(), Chip8Error> {
        let end = offset
            .checked_add(data.len())
            .filter(|end| *end <= self.buffer.len())
            .ok_or(Chip8Error::LoadOutOfBounds {
                offset,
                len: data.len(),
                size: self.buffer.len(),
            })?;
        self.buffer[offset..end].copy_from_slice(data);
        Ok(())
    }

    pub fn read_byte(&self, address: usize) -> Result<u8, Chip8Error> {
        self.buffer
            .get(address)
            .copied()
            .ok_or(Chip8Error::MemoryOutOfBounds {
                address,
                size: self.buffer.len(),
            })
    }

    pub fn write_byte(&mut self, address: usize, value: u8) -> Result<(), Chip8Error> {
        let size = self.buffer.len();
        let cell = self
            .buffer
            .get_mut(address)
            .ok_or(Chip8Error::MemoryOutOfBounds { address, size })?;
        *cell = value;
        Ok(())
    }

    /// Reads the big-endian word at `[address, address + 1]`.
    pub fn read_word(&self, address: usize) -> Result<u16, Chip8Error> {
        let high = self.read_byte(address)?;
        let low = self.read_byte(address + 1)?;
        Ok(u16::from_be_bytes([high, low]))
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }
}
