//! 32-byte words and word sequences.
//!
//! Every ABI encoding is a concatenation of [`Word`]s. Numeric and address
//! data occupies the low-order (rightmost) bytes of a word, byte-sequence data
//! the high-order (leftmost) bytes.
use std::{fmt, ops::Index};

use smallvec::SmallVec;

use crate::error::{AbiError, AbiResult};

/// Number of bytes in a single ABI word.
pub const WORD_LENGTH: usize = 32;

/// A fixed 32-byte encoding unit.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Word([u8; WORD_LENGTH]);

impl Word {
    pub const ZERO: Self = Self([0; WORD_LENGTH]);

    /// Copy `bytes` into the low-order end of a zero-filled word.
    ///
    /// ```rust
    /// # use hyabi::word::Word;
    /// let w = Word::pad_left(&[0x12, 0x34]).unwrap();
    /// assert_eq!(&w.as_bytes()[30..], &[0x12, 0x34]);
    /// assert!(w.as_bytes()[..30].iter().all(|&b| b == 0));
    /// ```
    pub fn pad_left(bytes: &[u8]) -> AbiResult<Self> {
        Self::pad_left_with(bytes, 0)
    }

    /// Same as [`Word::pad_left`] but fills the high-order bytes with `fill`.
    ///
    /// Used with `0xff` to sign-extend negative two's-complement integers.
    pub fn pad_left_with(bytes: &[u8], fill: u8) -> AbiResult<Self> {
        Self::check_len(bytes)?;
        let mut word = [fill; WORD_LENGTH];
        word[WORD_LENGTH - bytes.len()..].copy_from_slice(bytes);
        Ok(Self(word))
    }

    /// Copy `bytes` into the high-order end of a zero-filled word.
    pub fn pad_right(bytes: &[u8]) -> AbiResult<Self> {
        Self::check_len(bytes)?;
        let mut word = [0; WORD_LENGTH];
        word[..bytes.len()].copy_from_slice(bytes);
        Ok(Self(word))
    }

    /// Unsigned big-endian integer word, as used for lengths, counts and offsets.
    pub fn from_usize(value: usize) -> Self {
        let be = (value as u64).to_be_bytes();
        let mut word = [0; WORD_LENGTH];
        word[WORD_LENGTH - be.len()..].copy_from_slice(&be);
        Self(word)
    }

    /// Read the word back as an unsigned integer. Returns `None` if it does not
    /// fit in a `usize`.
    pub fn to_usize(&self) -> Option<usize> {
        let split = WORD_LENGTH - 8;
        if self.0[..split].iter().any(|&b| b != 0) {
            return None;
        }
        let mut be = [0u8; 8];
        be.copy_from_slice(&self.0[split..]);
        usize::try_from(u64::from_be_bytes(be)).ok()
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; WORD_LENGTH] {
        &self.0
    }

    #[inline]
    pub const fn into_bytes(self) -> [u8; WORD_LENGTH] {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    #[inline]
    fn check_len(bytes: &[u8]) -> AbiResult<()> {
        if bytes.len() > WORD_LENGTH {
            return Err(AbiError::TooLong {
                len: bytes.len(),
                max: WORD_LENGTH,
            });
        }
        Ok(())
    }
}

impl From<[u8; WORD_LENGTH]> for Word {
    fn from(value: [u8; WORD_LENGTH]) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({self})")
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Number of words needed to hold `len` bytes.
#[inline]
pub const fn required_words(len: usize) -> usize {
    len.div_ceil(WORD_LENGTH)
}

/// An ordered sequence of [`Word`]s.
///
/// Scalars encode to exactly one word, so a single word is kept inline before
/// spilling to the heap.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Words(SmallVec<[Word; 1]>);

impl Words {
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(SmallVec::with_capacity(capacity))
    }

    /// Split `bytes` into `ceil(len / 32)` words, zero padding the last one on
    /// the right. An empty slice yields no words.
    pub fn from_padded_bytes(bytes: &[u8]) -> Self {
        let mut words = Self::with_capacity(required_words(bytes.len()));
        for chunk in bytes.chunks(WORD_LENGTH) {
            let mut word = [0; WORD_LENGTH];
            word[..chunk.len()].copy_from_slice(chunk);
            words.push(Word(word));
        }
        words
    }

    #[inline]
    pub fn push(&mut self, word: Word) {
        self.0.push(word);
    }

    #[inline]
    pub fn extend(&mut self, other: Words) {
        self.0.extend(other.0);
    }

    /// Overwrite the word at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn set(&mut self, index: usize, word: Word) {
        self.0[index] = word;
    }

    /// Number of words.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length of the flattened encoding in bytes.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.0.len() * WORD_LENGTH
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Word> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Word] {
        &self.0
    }

    /// Flatten into a contiguous byte buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.byte_len());
        for word in self.0.iter() {
            out.extend_from_slice(word.as_bytes());
        }
        out
    }
}

impl From<Word> for Words {
    fn from(value: Word) -> Self {
        let mut words = Self::new();
        words.push(value);
        words
    }
}

impl FromIterator<Word> for Words {
    fn from_iter<T: IntoIterator<Item = Word>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Index<usize> for Words {
    type Output = Word;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Words {
    type Item = &'a Word;
    type IntoIter = std::slice::Iter<'a, Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
