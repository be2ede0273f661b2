use crate::consts;

pub fn nibble_split(bytes: [u8; consts::OP_CODE_BYTES]) -> (u8, u8, u8, u8) {
    (
        (bytes[0] & 0xF0) >> 4,
        bytes[0] & 0x0F,
        (bytes[1] & 0xF0) >> 4,
        bytes[1] & 0x0F,
    )
}

/// Splits a byte into its hundreds, tens and ones digits.
pub fn bcd_split(num: u8) -> [u8; 3] {
    [num / 100, (num % 100) / 10, num % 10]
}

pub fn wrap_coords(x: usize, y: usize, width: usize, height: usize) -> (usize, usize) {
    (x % width, y % height)
}
