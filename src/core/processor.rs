use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::consts;
use crate::core::framebuffer::FrameBuffer;
use crate::core::keyboard::KeyboardState;
use crate::core::memory::Memory;
use crate::core::opcode::Opcode;
use crate::core::rom::Rom;
use crate::error::Chip8Error;
use crate::utils;

/// Outcome of a single `step()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStatus {
    Continue,
    /// The frame buffer (or what the display should show) changed.
    RedrawScreen,
    /// Blocked on a wait-for-key instruction; pc has not moved.
    Waiting,
    /// The word does not encode a known instruction. It was skipped.
    Unknown(Opcode),
}

/// Sound timer transitions an audio adapter should react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneEvent {
    Start,
    Stop,
}

/// The CHIP-8 CPU together with the memory and screen it owns.
///
/// Drive it with `step()` at the configured instruction rate and
/// `tick_timers()` at 60 Hz.
#[derive(Debug)]
pub struct Processor {
    stack: [u16; consts::STACK_SIZE],
    registers: [u8; consts::REG_COUNT],
    idx_register: u16,
    pc: u16,
    // Number of occupied stack slots; the next free slot is stack[stack_pointer].
    stack_pointer: usize,
    delay_timer: u8,
    sound_timer: u8,
    memory: Memory,
    display_buffer: FrameBuffer,
    keyboard_buffer: Arc<KeyboardState>,
    rng: StdRng,
    redraw: bool,
    tone_on: bool,
    awaiting_key: Option<usize>,
    unknown_opcodes: u64,
}

impl Processor {
    pub fn new(memory: Memory, keyboard: Arc<KeyboardState>) -> Self {
        Processor {
            stack: [0; consts::STACK_SIZE],
            registers: [0; consts::REG_COUNT],
            idx_register: 0,
            pc: consts::PROG_OFFSET as u16,
            stack_pointer: 0,
            delay_timer: 0,
            sound_timer: 0,
            memory,
            display_buffer: FrameBuffer::default(),
            keyboard_buffer: keyboard,
            rng: StdRng::from_entropy(),
            redraw: false,
            tone_on: false,
            awaiting_key: None,
            unknown_opcodes: 0,
        }
    }

    /// Copies a program into memory at `offset` and points pc at it.
    pub fn load_program(&mut self, rom: &Rom, offset: u16) -> Result<(), Chip8Error> {
        rom.load_into(&mut self.memory, offset as usize)?;
        self.set_pc(offset);
        Ok(())
    }

    /// Executes exactly one instruction, or polls the keypad once if a
    /// wait-for-key instruction is pending.
    pub fn step(&mut self) -> Result<CycleStatus, Chip8Error> {
        if let Some(x) = self.awaiting_key {
            return Ok(self.poll_key(x));
        }
        let opcode = Opcode::decode(self.memory.read_word(self.pc as usize)?);
        self.pc = self.pc.wrapping_add(consts::OP_CODE_BYTES);
        self.execute(opcode)
    }

    /// One 60 Hz tick of the delay and sound timers.
    pub fn tick_timers(&mut self) -> Option<ToneEvent> {
        if self.delay_timer > 0 {
            self.delay_timer -= 1;
        }

        if self.sound_timer == 0 {
            // Sound timer was zeroed by the program while the tone was playing
            if self.tone_on {
                self.tone_on = false;
                return Some(ToneEvent::Stop);
            }
            return None;
        }

        let mut event = None;
        if !self.tone_on {
            self.tone_on = true;
            event = Some(ToneEvent::Start);
        }
        self.sound_timer -= 1;
        if self.sound_timer == 0 {
            self.tone_on = false;
            event = Some(ToneEvent::Stop);
        }
        event
    }

    fn poll_key(&mut self, x: usize) -> CycleStatus {
        match self.keyboard_buffer.first_pressed() {
            Some(key) => {
                self.registers[x] = key as u8;
                self.keyboard_buffer.force_key_up(key);
                self.awaiting_key = None;
                self.pc = self.pc.wrapping_add(consts::OP_CODE_BYTES);
                CycleStatus::Continue
            }
            None => CycleStatus::Waiting,
        }
    }

    fn skip_if(&mut self, condition: bool) -> CycleStatus {
        if condition {
            self.pc = self.pc.wrapping_add(consts::OP_CODE_BYTES);
        }
        CycleStatus::Continue
    }

    fn unknown(&mut self, opcode: Opcode) -> CycleStatus {
        self.unknown_opcodes += 1;
        CycleStatus::Unknown(opcode)
    }

    fn execute(&mut self, opcode: Opcode) -> Result<CycleStatus, Chip8Error> {
        let x = opcode.x();
        let y = opcode.y();
        let kk = opcode.kk();
        let nnn = opcode.nnn();

        let status = match opcode.selector() {
            0x0 => match nnn {
                // Clears screen
                0x0E0 => {
                    self.display_buffer.clear();
                    self.redraw = true;
                    CycleStatus::RedrawScreen
                }
                // Return from subroutine
                0x0EE => {
                    if self.stack_pointer == 0 {
                        return Err(Chip8Error::StackUnderflow);
                    }
                    self.stack_pointer -= 1;
                    self.pc = self.stack[self.stack_pointer];
                    CycleStatus::Continue
                }
                // Machine language routines are not supported
                _ => self.unknown(opcode),
            },

            // Jumps and subroutine calls
            0x1 => {
                self.pc = nnn;
                CycleStatus::Continue
            }
            0x2 => {
                if self.stack_pointer >= consts::STACK_SIZE {
                    return Err(Chip8Error::StackOverflow {
                        depth: consts::STACK_SIZE,
                    });
                }
                self.stack[self.stack_pointer] = self.pc;
                self.stack_pointer += 1;
                self.pc = nnn;
                CycleStatus::Continue
            }
            0xB => {
                self.pc = nnn.wrapping_add(self.registers[0] as u16);
                CycleStatus::Continue
            }

            // Conditional skips
            0x3 => self.skip_if(self.registers[x] == kk),
            0x4 => self.skip_if(self.registers[x] != kk),
            0x5 => match opcode.n() {
                0x0 => self.skip_if(self.registers[x] == self.registers[y]),
                _ => self.unknown(opcode),
            },
            0x9 => match opcode.n() {
                0x0 => self.skip_if(self.registers[x] != self.registers[y]),
                _ => self.unknown(opcode),
            },

            // Immediate loads and adds
            0x6 => {
                self.registers[x] = kk;
                CycleStatus::Continue
            }
            0x7 => {
                self.registers[x] = self.registers[x].wrapping_add(kk);
                CycleStatus::Continue
            }
            0xA => {
                self.idx_register = nnn;
                CycleStatus::Continue
            }

            0x8 => self.execute_alu(opcode),

            // Generate randomness
            0xC => {
                let rand_val: u8 = self.rng.gen();
                self.registers[x] = kk & rand_val;
                CycleStatus::Continue
            }

            0xD => self.draw_sprite(opcode)?,

            // Skip on keypress
            0xE => match kk {
                0x9E => self.skip_if(self.keyboard_buffer.is_key_down(self.registers[x] as usize)),
                0xA1 => {
                    self.skip_if(!self.keyboard_buffer.is_key_down(self.registers[x] as usize))
                }
                _ => self.unknown(opcode),
            },

            0xF => self.execute_misc(opcode)?,

            _ => self.unknown(opcode),
        };
        Ok(status)
    }

    /// 8xyn register-to-register arithmetic and logic.
    fn execute_alu(&mut self, opcode: Opcode) -> CycleStatus {
        let x = opcode.x();
        let vx = self.registers[x];
        let vy = self.registers[opcode.y()];

        match opcode.n() {
            0x0 => self.registers[x] = vy,

            // Logical instructions
            0x1 => self.registers[x] = vx | vy,
            0x2 => self.registers[x] = vx & vy,
            0x3 => self.registers[x] = vx ^ vy,

            // Add/subtract instructions
            0x4 => {
                let (sum, carry) = vx.overflowing_add(vy);
                self.registers[x] = sum;
                self.registers[0xF] = carry as u8;
            }
            0x5 => {
                self.registers[0xF] = (vx > vy) as u8;
                self.registers[x] = vx.wrapping_sub(vy);
            }
            0x7 => {
                self.registers[0xF] = (vy > vx) as u8;
                self.registers[x] = vy.wrapping_sub(vx);
            }

            // Shifting instructions
            0x6 => {
                self.registers[0xF] = vx & 0b00000001;
                self.registers[x] = vx >> 1;
            }
            0xE => {
                self.registers[0xF] = (vx & 0b10000000) >> 7;
                self.registers[x] = vx << 1;
            }

            _ => return self.unknown(opcode),
        }
        CycleStatus::Continue
    }

    /// Fxkk timer, index register and memory transfer instructions.
    fn execute_misc(&mut self, opcode: Opcode) -> Result<CycleStatus, Chip8Error> {
        let x = opcode.x();
        let i = self.idx_register as usize;

        match opcode.kk() {
            // Halt till keypress
            0x0A => {
                // pc stays on this instruction until a key arrives
                self.pc = self.pc.wrapping_sub(consts::OP_CODE_BYTES);
                let status = self.poll_key(x);
                if status == CycleStatus::Waiting {
                    self.awaiting_key = Some(x);
                }
                return Ok(status);
            }

            // Change timers (delay/sound)
            0x07 => self.registers[x] = self.delay_timer,
            0x15 => self.delay_timer = self.registers[x],
            0x18 => self.sound_timer = self.registers[x],

            // Update index register
            0x1E => {
                self.idx_register = self.idx_register.wrapping_add(self.registers[x] as u16) & 0x0FFF;
            }

            // Point index to font character
            0x29 => {
                self.idx_register = self.registers[x] as u16 * consts::FONT_GLYPH_BYTES as u16;
                self.redraw = true;
                return Ok(CycleStatus::RedrawScreen);
            }

            // Binary byte to decimal digits
            0x33 => {
                for (offset, digit) in utils::bcd_digits(self.registers[x]).iter().enumerate() {
                    self.memory.write_byte(i + offset, *digit)?;
                }
            }

            // Store and load memory
            0x55 => {
                for offset in 0..=x {
                    self.memory.write_byte(i + offset, self.registers[offset])?;
                }
            }
            0x65 => {
                for offset in 0..=x {
                    self.registers[offset] = self.memory.read_byte(i + offset)?;
                }
            }

            _ => return Ok(self.unknown(opcode)),
        }
        Ok(CycleStatus::Continue)
    }

    /// XORs an n-row sprite from memory at I onto the screen at (Vx, Vy),
    /// wrapping around the edges. VF reports whether any lit pixel went dark.
    fn draw_sprite(&mut self, opcode: Opcode) -> Result<CycleStatus, Chip8Error> {
        let x_coord = self.registers[opcode.x()] as usize;
        let y_coord = self.registers[opcode.y()] as usize;
        self.registers[0xF] = 0;

        for row in 0..opcode.n() as usize {
            let sprite_byte = self.memory.read_byte(self.idx_register as usize + row)?;
            let py = (y_coord + row) % consts::DISPL_HEIGHT;
            for col in 0..8 {
                let px = (x_coord + col) % consts::DISPL_WIDTH;
                let bit = (sprite_byte >> (7 - col)) & 1;
                let old = self.display_buffer.get_pixel(px, py);
                let new = old ^ bit;
                self.display_buffer.set_pixel(px, py, new);
                if old == 1 && new == 0 {
                    self.registers[0xF] = 1;
                }
            }
        }
        self.redraw = true;
        Ok(CycleStatus::RedrawScreen)
    }

    pub fn redraw_requested(&self) -> bool {
        self.redraw
    }

    pub fn clear_redraw(&mut self) {
        self.redraw = false;
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.display_buffer
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn keyboard(&self) -> &Arc<KeyboardState> {
        &self.keyboard_buffer
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Moves execution to `pc`, abandoning any pending wait-for-key.
    pub fn set_pc(&mut self, pc: u16) {
        self.pc = pc;
        self.awaiting_key = None;
    }

    pub fn index(&self) -> u16 {
        self.idx_register
    }

    pub fn set_index(&mut self, value: u16) {
        self.idx_register = value;
    }

    pub fn register(&self, index: usize) -> u8 {
        self.registers[index]
    }

    pub fn registers(&self) -> &[u8; consts::REG_COUNT] {
        &self.registers
    }

    pub fn set_register(&mut self, index: usize, value: u8) {
        self.registers[index] = value;
    }

    pub fn stack_pointer(&self) -> usize {
        self.stack_pointer
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn set_delay_timer(&mut self, value: u8) {
        self.delay_timer = value;
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    pub fn set_sound_timer(&mut self, value: u8) {
        self.sound_timer = value;
    }

    pub fn is_waiting_for_key(&self) -> bool {
        self.awaiting_key.is_some()
    }

    /// How many unrecognised instruction words have been skipped so far.
    pub fn unknown_opcodes(&self) -> u64 {
        self.unknown_opcodes
    }

    /// Makes the random instruction reproducible.
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}
