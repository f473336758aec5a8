use crate::consts;
use crate::utils;

/// The 64x32 monochrome screen. Each cell holds 0 or 1.
///
/// Coordinates are never wrapped here; the processor wraps sprite positions
/// before touching the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    buffer: [[u8; consts::DISPL_WIDTH]; consts::DISPL_HEIGHT],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        FrameBuffer {
            buffer: [[0; consts::DISPL_WIDTH]; consts::DISPL_HEIGHT],
        }
    }
}

impl FrameBuffer {
    pub fn clear(&mut self) {
        self.buffer
            .iter_mut()
            .for_each(|row| *row = [0; consts::DISPL_WIDTH]);
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> u8 {
        assert!(
            utils::bounds_check(x, y, consts::DISPL_WIDTH, consts::DISPL_HEIGHT),
            "pixel ({}, {}) is outside the display",
            x,
            y
        );
        self.buffer[y][x]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, value: u8) {
        assert!(
            utils::bounds_check(x, y, consts::DISPL_WIDTH, consts::DISPL_HEIGHT),
            "pixel ({}, {}) is outside the display",
            x,
            y
        );
        assert!(value <= 1, "invalid (non-binary) pixel value {}", value);
        self.buffer[y][x] = value;
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8; consts::DISPL_WIDTH]> {
        self.buffer.iter()
    }

    pub fn lit_pixels(&self) -> usize {
        self.buffer
            .iter()
            .map(|row| row.iter().filter(|px| **px == 1).count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_blank() {
        let frame = FrameBuffer::default();
        assert_eq!(frame.lit_pixels(), 0);
        assert_eq!(frame.rows().count(), consts::DISPL_HEIGHT);
    }

    #[test]
    fn test_set_and_get() {
        let mut frame = FrameBuffer::default();
        frame.set_pixel(63, 31, 1);
        frame.set_pixel(0, 0, 1);
        assert_eq!(frame.get_pixel(63, 31), 1);
        assert_eq!(frame.get_pixel(0, 0), 1);
        assert_eq!(frame.get_pixel(1, 0), 0);
        assert_eq!(frame.lit_pixels(), 2);
        frame.set_pixel(0, 0, 0);
        assert_eq!(frame.get_pixel(0, 0), 0);
    }

    #[test]
    fn test_clear() {
        let mut frame = FrameBuffer::default();
        for x in 0..consts::DISPL_WIDTH {
            frame.set_pixel(x, 7, 1);
        }
        assert_eq!(frame.lit_pixels(), consts::DISPL_WIDTH);
        frame.clear();
        assert_eq!(frame, FrameBuffer::default());
    }

    #[test]
    fn test_instances_are_independent() {
        let mut first = FrameBuffer::default();
        let second = FrameBuffer::default();
        first.set_pixel(3, 3, 1);
        assert_eq!(second.get_pixel(3, 3), 0);
    }

    #[test]
    #[should_panic]
    fn test_rejects_out_of_range_x() {
        let frame = FrameBuffer::default();
        frame.get_pixel(64, 0);
    }

    #[test]
    #[should_panic]
    fn test_rejects_out_of_range_y() {
        let mut frame = FrameBuffer::default();
        frame.set_pixel(0, 32, 1);
    }

    #[test]
    #[should_panic]
    fn test_rejects_non_binary_value() {
        let mut frame = FrameBuffer::default();
        frame.set_pixel(0, 0, 2);
    }
}
