use std::sync::atomic::{AtomicBool, Ordering};

use crate::consts;

/// Physical keys on the left-hand side of a QWERTY keyboard, mapped onto the
/// COSMAC VIP hex keypad:
///
/// ```text
/// 1 2 3 4      1 2 3 C
/// Q W E R  ->  4 5 6 D
/// A S D F      7 8 9 E
/// Z X C V      A 0 B F
/// ```
pub const KEYMAP: [(char, usize); consts::KEYBOARD_SIZE] = [
    ('x', 0x0),
    ('1', 0x1),
    ('2', 0x2),
    ('3', 0x3),
    ('q', 0x4),
    ('w', 0x5),
    ('e', 0x6),
    ('a', 0x7),
    ('s', 0x8),
    ('d', 0x9),
    ('z', 0xA),
    ('c', 0xB),
    ('4', 0xC),
    ('r', 0xD),
    ('f', 0xE),
    ('v', 0xF),
];

/// Pressed state of the 16 logical keys.
///
/// Written by the input adapter and read by the processor, possibly from
/// different threads, so every flag is atomic.
#[derive(Debug, Default)]
pub struct KeyboardState {
    keys: [AtomicBool; consts::KEYBOARD_SIZE],
}

impl KeyboardState {
    /// Logical index for a physical key, ignoring case.
    pub fn map_key(code: char) -> Option<usize> {
        let code = code.to_ascii_lowercase();
        KEYMAP
            .iter()
            .find(|(physical, _)| *physical == code)
            .map(|(_, logical)| *logical)
    }

    /// Marks the key mapped to `code` as pressed. Returns the logical index,
    /// or `None` for an unmapped key.
    pub fn key_down(&self, code: char) -> Option<usize> {
        let index = Self::map_key(code)?;
        self.press(index);
        Some(index)
    }

    pub fn key_up(&self, code: char) -> Option<usize> {
        let index = Self::map_key(code)?;
        self.release(index);
        Some(index)
    }

    pub fn press(&self, index: usize) {
        if let Some(key) = self.keys.get(index) {
            key.store(true, Ordering::Release);
        }
    }

    pub fn release(&self, index: usize) {
        if let Some(key) = self.keys.get(index) {
            key.store(false, Ordering::Release);
        }
    }

    /// Indices outside the keypad read as released.
    pub fn is_key_down(&self, index: usize) -> bool {
        self.keys
            .get(index)
            .map_or(false, |key| key.load(Ordering::Acquire))
    }

    /// Clears a key that has been consumed by a wait-for-key instruction.
    pub fn force_key_up(&self, index: usize) {
        self.release(index);
    }

    /// Lowest pressed logical key, scanning 0x0 through 0xF.
    pub fn first_pressed(&self) -> Option<usize> {
        (0..consts::KEYBOARD_SIZE).find(|index| self.is_key_down(*index))
    }

    pub fn layout() -> &'static str {
        "YOUR KEYBOARD CONTROLS:        COSMAC VIP KEYPAD:\n      \
         1  2  3  4                    1  2  3  C\n      \
         Q  W  E  R                    4  5  6  D\n      \
         A  S  D  F                    7  8  9  E\n      \
         Z  X  C  V                    A  0  B  F\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_keymap_covers_every_key_once() {
        let mut seen = [false; consts::KEYBOARD_SIZE];
        for (_, logical) in KEYMAP {
            assert!(!seen[logical]);
            seen[logical] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_key_down_and_up() {
        let keyboard = KeyboardState::default();
        assert_eq!(keyboard.key_down('q'), Some(0x4));
        assert!(keyboard.is_key_down(0x4));
        assert_eq!(keyboard.key_up('q'), Some(0x4));
        assert!(!keyboard.is_key_down(0x4));
    }

    #[test]
    fn test_mapping_ignores_case() {
        let keyboard = KeyboardState::default();
        assert_eq!(keyboard.key_down('V'), Some(0xF));
        assert!(keyboard.is_key_down(0xF));
        assert_eq!(KeyboardState::map_key('X'), Some(0x0));
        assert_eq!(KeyboardState::map_key('4'), Some(0xC));
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        let keyboard = KeyboardState::default();
        assert_eq!(keyboard.key_down('p'), None);
        assert_eq!(keyboard.key_up('0'), None);
        assert_eq!(keyboard.first_pressed(), None);
    }

    #[test]
    fn test_force_key_up() {
        let keyboard = KeyboardState::default();
        keyboard.press(0xB);
        keyboard.force_key_up(0xB);
        assert!(!keyboard.is_key_down(0xB));
    }

    #[test]
    fn test_out_of_range_index_reads_released() {
        let keyboard = KeyboardState::default();
        keyboard.press(0x20);
        assert!(!keyboard.is_key_down(0x20));
        assert!(!keyboard.is_key_down(0xFF));
    }

    #[test]
    fn test_first_pressed_scans_in_order() {
        let keyboard = KeyboardState::default();
        keyboard.press(0xF);
        assert_eq!(keyboard.first_pressed(), Some(0xF));
        keyboard.press(0x3);
        assert_eq!(keyboard.first_pressed(), Some(0x3));
    }

    #[test]
    fn test_written_from_another_thread() {
        let keyboard = Arc::new(KeyboardState::default());
        let producer = Arc::clone(&keyboard);
        thread::spawn(move || {
            producer.key_down('e');
        })
        .join()
        .unwrap();
        assert!(keyboard.is_key_down(0x6));
    }
}
