use num_bigint::{BigInt, BigUint};

use crate::word::WORD_LENGTH;

/// Width of an ABI integer type.
///
/// Signedness is carried by the enclosing [`AbiType`](super::AbiType)
/// variant (`Int` or `Uint`); this type only records the number of bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct IntType {
    num_bits: u16,
}

impl IntType {
    pub const I8: Self = Self { num_bits: 8 };
    pub const I16: Self = Self { num_bits: 16 };
    pub const I32: Self = Self { num_bits: 32 };
    pub const I64: Self = Self { num_bits: 64 };
    pub const I128: Self = Self { num_bits: 128 };
    pub const I256: Self = Self { num_bits: 256 };
    pub const MIN_BITS: u32 = 8;
    pub const MAX_BITS: u32 = 256;

    #[inline]
    const fn check_validity(num_bits: u32) -> bool {
        num_bits >= Self::MIN_BITS && num_bits <= Self::MAX_BITS && num_bits % 8 == 0
    }

    /// Creates a new [`IntType`], or `None` if `num_bits` is not a multiple of
    /// 8 in `8..=256`.
    #[inline]
    pub const fn new(num_bits: u32) -> Option<Self> {
        if Self::check_validity(num_bits) {
            Some(Self {
                num_bits: num_bits as u16,
            })
        } else {
            None
        }
    }

    #[inline]
    pub const fn num_bits(&self) -> u32 {
        self.num_bits as u32
    }

    #[inline]
    pub const fn byte_size(&self) -> usize {
        self.num_bits as usize / 8
    }

    /// Largest unsigned value, `2^bits - 1`.
    pub fn max_unsigned(&self) -> BigUint {
        (BigUint::from(1u8) << self.num_bits()) - 1u8
    }

    /// Inclusive signed range, `-2^(bits-1) ..= 2^(bits-1) - 1`.
    pub fn signed_range(&self) -> (BigInt, BigInt) {
        let half = BigInt::from(1u8) << (self.num_bits() - 1);
        (-half.clone(), half - 1)
    }
}

impl Default for IntType {
    fn default() -> Self {
        Self::I256
    }
}

/// Size of a `bytesN` type, `1 ..= 32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct FixedBytesType {
    size: u8,
}

impl FixedBytesType {
    pub const B32: Self = Self { size: 32 };

    #[inline]
    pub const fn new(size: usize) -> Option<Self> {
        if size >= 1 && size <= WORD_LENGTH {
            Some(Self { size: size as u8 })
        } else {
            None
        }
    }

    #[inline]
    pub const fn size(&self) -> usize {
        self.size as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_widths_are_validated() {
        assert_eq!(IntType::new(8), Some(IntType::I8));
        assert_eq!(IntType::new(256), Some(IntType::I256));
        assert_eq!(IntType::new(0), None);
        assert_eq!(IntType::new(7), None);
        assert_eq!(IntType::new(264), None);
        assert_eq!(IntType::I64.byte_size(), 8);
    }

    #[test]
    fn int_bounds() {
        assert_eq!(IntType::I8.max_unsigned(), BigUint::from(255u32));
        let (min, max) = IntType::I8.signed_range();
        assert_eq!(min, BigInt::from(-128));
        assert_eq!(max, BigInt::from(127));
    }

    #[test]
    fn fixed_bytes_sizes_are_validated() {
        assert!(FixedBytesType::new(0).is_none());
        assert!(FixedBytesType::new(33).is_none());
        assert_eq!(FixedBytesType::new(32), Some(FixedBytesType::B32));
        assert_eq!(FixedBytesType::new(10).unwrap().size(), 10);
    }
}
