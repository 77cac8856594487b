//! Head/tail layout for tuples and arrays.
//!
//! A tuple is encoded as two sections, head then tail. Static elements are
//! written directly into the head. A dynamic element is written into the tail
//! and the head receives a single word holding the byte offset of that element,
//! measured from the start of the tuple's own encoding.
//!
//! ```text
//! (uint8 a, bytes b, bool c)
//!
//! head: [ a ][ offset(b) = 96 ][ c ]
//! tail: [ len(b) ][ b data ... ]
//! ```
//!
//! Element sizes are not known before encoding them (a nested dynamic array
//! depends on its own items), so the walk appends a zero placeholder for every
//! dynamic element, records its index and the tail length at that point, and
//! patches the placeholders once the total head length is known.
use log::trace;
use smallvec::SmallVec;

use crate::{
    encoding::AbiEncodable,
    error::{AbiError, AbiResult},
    word::{WORD_LENGTH, Word, Words},
};

/// Encode an ordered list of elements using the head/tail layout.
pub fn encode_tuple<T, I>(elements: I) -> AbiResult<Words>
where
    T: AbiEncodable,
    I: IntoIterator<Item = T>,
{
    let mut head = Words::new();
    let mut tail = Words::new();
    let mut head_len = 0usize;
    let mut tail_len = 0usize;
    // (index of the placeholder in `head`, offset of the payload within `tail`)
    let mut offsets: SmallVec<[(usize, usize); 4]> = SmallVec::new();

    for element in elements {
        let words = element.encode_abi()?;
        if element.is_dynamic() {
            head.push(Word::ZERO);
            offsets.push((head.len() - 1, tail_len));
            head_len += WORD_LENGTH;
            tail_len += words.byte_len();
            tail.extend(words);
        } else {
            head_len += words.byte_len();
            head.extend(words);
        }
    }

    if offsets.is_empty() {
        return Ok(head);
    }

    trace!(
        "tuple layout: {} head bytes, {} tail bytes, {} offsets",
        head_len,
        tail_len,
        offsets.len()
    );

    for (index, tail_offset) in offsets {
        head.set(index, Word::from_usize(head_len + tail_offset));
    }
    head.extend(tail);
    Ok(head)
}

/// Encode a dynamic array: an element count followed by the items laid out
/// as a tuple. Offsets inside are relative to the word after the count.
pub fn encode_array<T: AbiEncodable>(items: &[T]) -> AbiResult<Words> {
    let tuple = encode_tuple(items)?;
    let mut words = Words::with_capacity(tuple.len() + 1);
    words.push(Word::from_usize(items.len()));
    words.extend(tuple);
    Ok(words)
}

/// Encode a fixed array of `len` items. The layout is that of a tuple.
pub fn encode_fixed_array<T: AbiEncodable>(items: &[T], len: usize) -> AbiResult<Words> {
    if items.len() != len {
        return Err(AbiError::ArityMismatch {
            expected: len,
            found: items.len(),
        });
    }
    encode_tuple(items)
}
