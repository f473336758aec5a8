/// Splits an instruction word, given as its two big-endian bytes, into nibbles.
pub fn nibble_split(high: u8, low: u8) -> (u8, u8, u8, u8) {
    ((high & 0xF0) >> 4, high & 0x0F, (low & 0xF0) >> 4, low & 0x0F)
}

pub fn bounds_check(x: usize, y: usize, width: usize, height: usize) -> bool {
    x < width && y < height
}

/// Hundreds, tens and ones digits of a byte.
pub fn bcd_digits(value: u8) -> [u8; 3] {
    [value / 100, (value / 10) % 10, value % 10]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nibble_split() {
        assert_eq!(nibble_split(0xAB, 0xCD), (0xA, 0xB, 0xC, 0xD));
    }

    #[test]
    fn test_bounds_check() {
        assert!(bounds_check(63, 31, 64, 32));
        assert!(!bounds_check(64, 0, 64, 32));
        assert!(!bounds_check(0, 32, 64, 32));
    }

    #[test]
    fn test_bcd_digits() {
        assert_eq!(bcd_digits(0), [0, 0, 0]);
        assert_eq!(bcd_digits(85), [0, 8, 5]);
        assert_eq!(bcd_digits(156), [1, 5, 6]);
        assert_eq!(bcd_digits(255), [2, 5, 5]);
    }
}
