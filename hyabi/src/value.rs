//! Typed values.
//!
//! A [`Value`] is an [`AbiType`] that carries a concrete value. Values are
//! built either directly or by a [`Mapper`](crate::mapper::Mapper) from a
//! native representation. Integer values are arbitrary-precision; whether they
//! fit their declared width is checked when encoding.
use num_bigint::{BigInt, BigUint};
use strum::EnumIs;

use crate::{
    address::Address,
    error::{AbiError, AbiResult},
    types::{
        AbiType,
        aggregate::{ArrayType, TupleParam, TupleType},
        primary::{FixedBytesType, IntType},
    },
};

#[derive(Debug, Clone, PartialEq, Eq, EnumIs)]
pub enum Value {
    Int { ty: IntType, value: BigInt },
    Uint { ty: IntType, value: BigUint },
    Bool(bool),
    Address(Address),
    FixedBytes { ty: FixedBytesType, bytes: Vec<u8> },
    Bytes(Vec<u8>),
    String(String),
    /// Items of a `T[N]`. The element type is kept so that dynamic-ness does
    /// not depend on the items.
    FixedArray { ty: ArrayType, items: Vec<Value> },
    /// Items of a `T[]`.
    Array { elem: AbiType, items: Vec<Value> },
    Tuple(TupleValue),
}

impl Value {
    /// `uint<bits>` value.
    ///
    /// # Panics
    ///
    /// Panics if `bits` is not a valid width, see [`AbiType::uint`]. Build a
    /// [`Value::Uint`] from [`IntType::new`] for untrusted widths. The range
    /// of `value` is checked when encoding.
    pub fn uint(bits: u32, value: impl Into<BigUint>) -> Self {
        match IntType::new(bits) {
            Some(ty) => Value::Uint {
                ty,
                value: value.into(),
            },
            None => panic!("invalid integer width: {bits}"),
        }
    }

    /// `int<bits>` value.
    ///
    /// # Panics
    ///
    /// Panics if `bits` is not a valid width, see [`Value::uint`].
    pub fn int(bits: u32, value: impl Into<BigInt>) -> Self {
        match IntType::new(bits) {
            Some(ty) => Value::Int {
                ty,
                value: value.into(),
            },
            None => panic!("invalid integer width: {bits}"),
        }
    }

    /// `bytes<size>` value. The length of `bytes` is checked when encoding.
    ///
    /// # Panics
    ///
    /// Panics if `size` is not in `1..=32`, like [`AbiType::fixed_bytes`]. Use
    /// [`FixedBytesType::new`] for untrusted sizes.
    pub fn fixed_bytes(size: usize, bytes: impl Into<Vec<u8>>) -> Self {
        match FixedBytesType::new(size) {
            Some(ty) => Value::FixedBytes {
                ty,
                bytes: bytes.into(),
            },
            None => panic!("invalid fixed bytes size: {size}"),
        }
    }

    /// Dynamic array of `elem`. Every item must have type `elem`.
    pub fn array(elem: AbiType, items: Vec<Value>) -> AbiResult<Self> {
        check_items(&elem, &items)?;
        Ok(Value::Array { elem, items })
    }

    /// Fixed array whose length is the number of items.
    pub fn fixed_array(elem: AbiType, items: Vec<Value>) -> AbiResult<Self> {
        check_items(&elem, &items)?;
        Ok(Value::FixedArray {
            ty: ArrayType::new(elem, items.len()),
            items,
        })
    }

    /// The type this value is an instance of.
    pub fn abi_type(&self) -> AbiType {
        match self {
            Value::Int { ty, .. } => AbiType::Int(*ty),
            Value::Uint { ty, .. } => AbiType::Uint(*ty),
            Value::Bool(_) => AbiType::Bool,
            Value::Address(_) => AbiType::Address,
            Value::FixedBytes { ty, .. } => AbiType::FixedBytes(*ty),
            Value::Bytes(_) => AbiType::Bytes,
            Value::String(_) => AbiType::String,
            Value::FixedArray { ty, .. } => AbiType::FixedArray(ty.clone()),
            Value::Array { elem, .. } => AbiType::Array(Box::new(elem.clone())),
            Value::Tuple(tuple) => AbiType::Tuple(tuple.abi_type()),
        }
    }

    /// Whether the encoded length of this value depends on its content.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Value::Bytes(_) | Value::String(_) | Value::Array { .. } => true,
            Value::FixedArray { ty, .. } => ty.ty.is_dynamic(),
            Value::Tuple(tuple) => tuple.is_dynamic(),
            Value::Int { .. }
            | Value::Uint { .. }
            | Value::Bool(_)
            | Value::Address(_)
            | Value::FixedBytes { .. } => false,
        }
    }
}

fn check_items(elem: &AbiType, items: &[Value]) -> AbiResult<()> {
    for item in items {
        let ty = item.abi_type();
        if &ty != elem {
            return Err(AbiError::unmappable(
                elem,
                format!("array item has type `{}`", ty),
            ));
        }
    }
    Ok(())
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Address> for Value {
    fn from(value: Address) -> Self {
        Value::Address(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<TupleValue> for Value {
    fn from(value: TupleValue) -> Self {
        Value::Tuple(value)
    }
}

macro_rules! value_from_uint {
    ($typ:ty, $bits:expr) => {
        impl From<$typ> for Value {
            fn from(value: $typ) -> Self {
                Value::uint($bits, value)
            }
        }
    };
}

macro_rules! value_from_int {
    ($typ:ty, $bits:expr) => {
        impl From<$typ> for Value {
            fn from(value: $typ) -> Self {
                Value::int($bits, value)
            }
        }
    };
}

value_from_uint! { u8, 8 }
value_from_uint! { u16, 16 }
value_from_uint! { u32, 32 }
value_from_uint! { u64, 64 }
value_from_uint! { u128, 128 }
value_from_int! { i8, 8 }
value_from_int! { i16, 16 }
value_from_int! { i32, 32 }
value_from_int! { i64, 64 }
value_from_int! { i128, 128 }

/// An ordered list of named values. Unnamed elements carry an empty name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TupleValue {
    elements: Vec<(String, Value)>,
}

impl TupleValue {
    pub fn new(elements: Vec<(String, Value)>) -> Self {
        Self { elements }
    }

    pub fn unnamed(values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            elements: values.into_iter().map(|v| (String::new(), v)).collect(),
        }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.elements.len()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.elements
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.elements.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.elements.iter().map(|(_, v)| v)
    }

    pub fn is_dynamic(&self) -> bool {
        self.values().any(Value::is_dynamic)
    }

    pub fn abi_type(&self) -> TupleType {
        self.elements
            .iter()
            .map(|(name, value)| TupleParam::new(name.clone(), value.abi_type()))
            .collect()
    }
}

impl FromIterator<(String, Value)> for TupleValue {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_conversions_pick_matching_widths() {
        assert_eq!(Value::from(7u8).abi_type(), AbiType::uint(8));
        assert_eq!(Value::from(-7i64).abi_type(), AbiType::int(64));
        assert_eq!(Value::from(true).abi_type(), AbiType::Bool);
        assert_eq!(Value::from("hi").abi_type(), AbiType::String);
    }

    #[test]
    fn dynamic_flag_follows_declared_types() {
        // An empty array of a static element type is still dynamic.
        let empty = Value::array(AbiType::Bool, vec![]).unwrap();
        assert!(empty.is_dynamic());

        let fixed = Value::fixed_array(AbiType::uint(8), vec![1u8.into(), 2u8.into()]).unwrap();
        assert!(!fixed.is_dynamic());
        assert_eq!(fixed.abi_type().to_string(), "uint8[2]");

        let tuple = TupleValue::unnamed([Value::from(1u32), Value::Bytes(vec![])]);
        assert!(tuple.is_dynamic());
        assert_eq!(tuple.abi_type().to_string(), "(uint32,bytes)");
    }

    #[test]
    fn array_items_must_match_element_type() {
        let err = Value::array(AbiType::uint(8), vec![1u16.into()]).unwrap_err();
        assert!(err.is_unmappable());
    }

    #[test]
    fn tuple_lookup_by_name() {
        let tuple = TupleValue::new(vec![
            ("to".to_string(), Value::Address(Address::ZERO)),
            ("ok".to_string(), true.into()),
        ]);
        assert_eq!(tuple.get("ok"), Some(&Value::Bool(true)));
        assert_eq!(tuple.get("missing"), None);
        assert_eq!(tuple.arity(), 2);
    }

    #[test]
    #[should_panic(expected = "invalid integer width: 12")]
    fn invalid_width_panics_in_value_constructor() {
        let _ = Value::uint(12, 1u8);
    }

    #[test]
    #[should_panic(expected = "invalid fixed bytes size: 33")]
    fn invalid_size_panics_in_value_constructor() {
        let _ = Value::fixed_bytes(33, vec![0u8; 4]);
    }
}
