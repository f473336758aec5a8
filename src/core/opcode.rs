use std::fmt;

use crate::utils;

/// # Opcodes
///
/// A decoded view of one 16-bit instruction word. Every word decodes; whether it
/// names a known instruction is only decided when the processor executes it.
///
/// - `[s___]` selector, the broad category
/// - `[_x__]` register Vx, or the range V0..=Vx
/// - `[__y_]` register Vy
/// - `[___n]` small immediate, or sub-selector of categories 5, 8 and 9
/// - `[__kk]` byte immediate, or sub-selector of categories 0, E and F
/// - `[_nnn]` 12-bit address
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Opcode(u16);

impl Opcode {
    pub fn decode(word: u16) -> Self {
        Opcode(word)
    }

    /// Combines two bytes fetched from memory, most significant first.
    pub fn from_bytes(high: u8, low: u8) -> Self {
        Opcode(u16::from_be_bytes([high, low]))
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    pub fn nibbles(&self) -> (u8, u8, u8, u8) {
        let [high, low] = self.0.to_be_bytes();
        utils::nibble_split(high, low)
    }

    pub fn selector(&self) -> u8 {
        ((self.0 & 0xF000) >> 12) as u8
    }

    pub fn x(&self) -> usize {
        ((self.0 & 0x0F00) >> 8) as usize
    }

    pub fn y(&self) -> usize {
        ((self.0 & 0x00F0) >> 4) as usize
    }

    pub fn n(&self) -> u8 {
        (self.0 & 0x000F) as u8
    }

    pub fn kk(&self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    pub fn nnn(&self) -> u16 {
        self.0 & 0x0FFF
    }
}

impl From<u16> for Opcode {
    fn from(word: u16) -> Self {
        Opcode::decode(word)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}
