//! Types module
//!
//! Canonical descriptions of ABI types. The type system has two layers:
//!
//! - Primary types: integers, booleans, addresses and byte sequences (see
//!   `primary.rs`).
//! - Aggregate types: fixed arrays and tuples (see `aggregate.rs`), plus the
//!   dynamic array stored directly in [`AbiType::Array`].
//!
//! Every type knows whether it is *dynamic*, i.e. whether the length of its
//! encoding depends on the value rather than on the type alone. Dynamic-ness
//! propagates upwards: a tuple or fixed array is dynamic as soon as one member
//! is, a dynamic array always is.
use std::{fmt, str::FromStr};

use strum::EnumIs;

use crate::{
    error::AbiError,
    types::{
        aggregate::{ArrayType, TupleType},
        primary::{FixedBytesType, IntType},
    },
};

pub mod aggregate;
pub mod parser;
pub mod primary;

/// A sum-type describing any ABI type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs)]
pub enum AbiType {
    /// Signed integer, `intN`.
    Int(IntType),

    /// Unsigned integer, `uintN`.
    Uint(IntType),

    /// `bool`
    Bool,

    /// `address`, 20 raw bytes.
    Address,

    /// `bytesN`, at most one word.
    FixedBytes(FixedBytesType),

    /// `bytes`, a length-prefixed byte sequence.
    Bytes,

    /// `string`, UTF-8 text encoded exactly like [`AbiType::Bytes`].
    String,

    /// `T[N]`
    FixedArray(ArrayType),

    /// `T[]`, count-prefixed.
    Array(Box<AbiType>),

    /// `(T1,T2,...)`
    Tuple(TupleType),
}

impl From<ArrayType> for AbiType {
    fn from(value: ArrayType) -> Self {
        AbiType::FixedArray(value)
    }
}

impl From<TupleType> for AbiType {
    fn from(value: TupleType) -> Self {
        AbiType::Tuple(value)
    }
}

impl From<FixedBytesType> for AbiType {
    fn from(value: FixedBytesType) -> Self {
        AbiType::FixedBytes(value)
    }
}

impl AbiType {
    /// `uint<bits>`, panicking on an invalid width. Intended for constant type
    /// construction; use [`IntType::new`] for untrusted widths.
    pub fn uint(bits: u32) -> Self {
        match IntType::new(bits) {
            Some(ty) => AbiType::Uint(ty),
            None => panic!("invalid integer width: {bits}"),
        }
    }

    /// `int<bits>`, see [`AbiType::uint`].
    pub fn int(bits: u32) -> Self {
        match IntType::new(bits) {
            Some(ty) => AbiType::Int(ty),
            None => panic!("invalid integer width: {bits}"),
        }
    }

    /// `bytes<size>`, see [`AbiType::uint`].
    pub fn fixed_bytes(size: usize) -> Self {
        match FixedBytesType::new(size) {
            Some(ty) => AbiType::FixedBytes(ty),
            None => panic!("invalid fixed bytes size: {size}"),
        }
    }

    /// `self[]`
    pub fn array_of(self) -> Self {
        AbiType::Array(Box::new(self))
    }

    /// `self[len]`
    pub fn fixed_array_of(self, len: usize) -> Self {
        AbiType::FixedArray(ArrayType::new(self, len))
    }

    /// Whether the encoded length of a value of this type depends on the value.
    pub fn is_dynamic(&self) -> bool {
        match self {
            AbiType::Bytes | AbiType::String | AbiType::Array(_) => true,
            AbiType::FixedArray(array) => array.ty.is_dynamic(),
            AbiType::Tuple(tuple) => tuple.is_dynamic(),
            AbiType::Int(_)
            | AbiType::Uint(_)
            | AbiType::Bool
            | AbiType::Address
            | AbiType::FixedBytes(_) => false,
        }
    }

    /// Number of words a value of this type occupies, or `None` for dynamic
    /// types and for static types whose size does not fit in a `usize`.
    ///
    /// ```rust
    /// # use hyabi::types::AbiType;
    /// let ty: AbiType = "(uint256,bool[3])".parse().unwrap();
    /// assert_eq!(ty.static_words(), Some(4));
    /// assert_eq!(AbiType::Bytes.static_words(), None);
    /// ```
    pub fn static_words(&self) -> Option<usize> {
        match self {
            AbiType::Int(_)
            | AbiType::Uint(_)
            | AbiType::Bool
            | AbiType::Address
            | AbiType::FixedBytes(_) => Some(1),
            AbiType::Bytes | AbiType::String | AbiType::Array(_) => None,
            AbiType::FixedArray(array) => array
                .ty
                .static_words()?
                .checked_mul(array.num_elements),
            AbiType::Tuple(tuple) => tuple
                .components
                .iter()
                .try_fold(0usize, |acc, c| acc.checked_add(c.ty.static_words()?)),
        }
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiType::Int(ty) => write!(f, "int{}", ty.num_bits()),
            AbiType::Uint(ty) => write!(f, "uint{}", ty.num_bits()),
            AbiType::Bool => write!(f, "bool"),
            AbiType::Address => write!(f, "address"),
            AbiType::FixedBytes(ty) => write!(f, "bytes{}", ty.size()),
            AbiType::Bytes => write!(f, "bytes"),
            AbiType::String => write!(f, "string"),
            AbiType::FixedArray(array) => write!(f, "{}", array),
            AbiType::Array(elem) => write!(f, "{}[]", elem),
            AbiType::Tuple(tuple) => write!(f, "{}", tuple),
        }
    }
}

impl FromStr for AbiType {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse_type(s)
    }
}
