//! Bit access over fixed-width address byte buffers.
//!
//! Bit 0 is the most significant bit of byte 0, the same numbering CIDR uses
//! for the network part of an address.

use crate::error::PrefixError;

const BIT_SIZE: usize = 8;

/// Shift that moves bit `i` of its byte into the lowest position.
fn shift_of(i: usize) -> usize {
    (BIT_SIZE - 1) - i % BIT_SIZE
}

fn check_index(bytes: &[u8], i: usize) -> Result<(), PrefixError> {
    let bit_len = bytes.len() * BIT_SIZE;
    if i >= bit_len {
        return Err(PrefixError::IndexOutOfRange { index: i, bit_len });
    }
    Ok(())
}

/// Return the bit at offset `i`, as 0 or 1.
///
/// # Examples
/// ```
/// use cidr_aggregate::bits::get_bit;
/// assert_eq!(get_bit(&[0x00, 0b1000_0000], 8).unwrap(), 1);
/// assert!(get_bit(&[0x00, 0x00], 16).is_err());
/// ```
pub fn get_bit(bytes: &[u8], i: usize) -> Result<u8, PrefixError> {
    check_index(bytes, i)?;
    Ok((bytes[i / BIT_SIZE] >> shift_of(i)) & 1)
}

/// Set the bit at offset `i` to `value` in place. `1` sets the bit, `0` clears it.
///
/// # Examples
/// ```
/// use cidr_aggregate::bits::set_bit;
/// let mut bytes = [0xFF, 0xFF];
/// set_bit(&mut bytes, 0, 0).unwrap();
/// assert_eq!(bytes, [0b0111_1111, 0xFF]);
/// ```
pub fn set_bit(bytes: &mut [u8], i: usize, value: u8) -> Result<(), PrefixError> {
    check_index(bytes, i)?;
    debug_assert!(value <= 1, "bit value must be 0 or 1, got {value}");
    if value == 1 {
        bytes[i / BIT_SIZE] |= 1 << shift_of(i);
    } else {
        bytes[i / BIT_SIZE] &= !(1 << shift_of(i));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_bit_second_byte() {
        let mut bytes = [0x00, 0x00];
        set_bit(&mut bytes, 8, 1).unwrap();
        assert_eq!(bytes, [0x00, 0b1000_0000]);
    }

    #[test]
    fn test_clear_bit_first_byte() {
        let mut bytes = [0xFF, 0xFF];
        set_bit(&mut bytes, 0, 0).unwrap();
        assert_eq!(bytes, [0b0111_1111, 0xFF]);
    }

    #[test]
    fn test_set_bit_is_idempotent() {
        let mut bytes = [0b0000_0001];
        set_bit(&mut bytes, 7, 1).unwrap();
        assert_eq!(bytes, [0b0000_0001]);
        set_bit(&mut bytes, 7, 0).unwrap();
        set_bit(&mut bytes, 7, 0).unwrap();
        assert_eq!(bytes, [0x00]);
    }

    #[test]
    fn test_get_bit_every_position() {
        let bytes = [0b1010_0000, 0b0000_0001];
        let bits: Vec<u8> = (0..16).map(|i| get_bit(&bytes, i).unwrap()).collect();
        assert_eq!(bits, vec![1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_set_then_get_leaves_other_bits() {
        let mut bytes = [0x5A; 4];
        set_bit(&mut bytes, 21, 1).unwrap();
        assert_eq!(get_bit(&bytes, 21).unwrap(), 1);
        assert_eq!(bytes[0], 0x5A);
        assert_eq!(bytes[1], 0x5A);
        assert_eq!(bytes[2], 0x5A | 0b0000_0100);
        assert_eq!(bytes[3], 0x5A);
    }

    #[test]
    fn test_index_out_of_range() {
        let mut bytes = [0x00, 0x00];
        let expected = PrefixError::IndexOutOfRange {
            index: 16,
            bit_len: 16,
        };
        assert_eq!(get_bit(&bytes, 16), Err(expected));
        assert_eq!(set_bit(&mut bytes, 16, 1), Err(expected));
        assert_eq!(bytes, [0x00, 0x00], "failed set_bit must not touch the buffer");
    }

    #[test]
    fn test_empty_buffer() {
        assert!(get_bit(&[], 0).is_err());
    }

    #[test]
    fn test_last_bit_of_ipv6_width() {
        let mut bytes = [0u8; 16];
        set_bit(&mut bytes, 127, 1).unwrap();
        assert_eq!(bytes[15], 0x01);
        assert_eq!(get_bit(&bytes, 127).unwrap(), 1);
        assert!(get_bit(&bytes, 128).is_err());
    }
}
