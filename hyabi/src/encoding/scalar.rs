//! Encoders for single-word and byte-sequence values.
use num_bigint::{BigInt, BigUint, Sign};

use crate::{
    address::Address,
    error::{AbiError, AbiResult},
    types::{AbiType, primary::IntType},
    word::{WORD_LENGTH, Word, Words, required_words},
};

/// Encode a signed integer as a 256-bit two's complement word.
///
/// The value must lie in the signed range of `ty`; negative values are
/// sign-extended to the full word.
pub fn encode_int(value: &BigInt, ty: IntType) -> AbiResult<Word> {
    let (min, max) = ty.signed_range();
    if *value < min || *value > max {
        return Err(AbiError::overflow(value, AbiType::Int(ty)));
    }
    let fill = if value.sign() == Sign::Minus { 0xff } else { 0x00 };
    Word::pad_left_with(&value.to_signed_bytes_be(), fill)
}

/// Encode an unsigned integer as a big-endian word. Fails if the value needs
/// more than `ty.num_bits()` bits.
pub fn encode_uint(value: &BigUint, ty: IntType) -> AbiResult<Word> {
    if value.bits() > u64::from(ty.num_bits()) {
        return Err(AbiError::overflow(value, AbiType::Uint(ty)));
    }
    Word::pad_left(&value.to_bytes_be())
}

/// A single word whose least significant bit holds the value.
pub fn encode_bool(value: bool) -> Word {
    let mut word = [0u8; WORD_LENGTH];
    word[WORD_LENGTH - 1] = value as u8;
    Word::from(word)
}

pub fn encode_address(address: &Address) -> Word {
    let mut word = [0u8; WORD_LENGTH];
    word[WORD_LENGTH - address.as_bytes().len()..].copy_from_slice(address.as_bytes());
    Word::from(word)
}

/// Encode `bytes` into a single word, padded on the right.
pub fn encode_fixed_bytes(bytes: &[u8], size: usize) -> AbiResult<Word> {
    if bytes.len() > size {
        return Err(AbiError::TooLong {
            len: bytes.len(),
            max: size,
        });
    }
    Word::pad_right(bytes)
}

/// Encode a dynamic byte sequence: a length word followed by the data, padded
/// on the right to a whole number of words.
pub fn encode_bytes(bytes: &[u8]) -> Words {
    let mut words = Words::with_capacity(required_words(bytes.len()) + 1);
    words.push(Word::from_usize(bytes.len()));
    words.extend(Words::from_padded_bytes(bytes));
    words
}
