//! ABI encoding of typed values.
//!
//! Encoding shape
//!  - Scalars occupy exactly one word; see [`scalar`].
//!  - `bytes` and `string` are a length word followed by the padded data.
//!  - Tuples and fixed arrays use the head/tail layout; dynamic arrays prefix
//!    it with an element count. See [`composite`].
use crate::{error::AbiResult, value::Value, value::TupleValue, word::Words};

pub mod composite;
pub mod scalar;

/// Anything that can be laid out as a sequence of ABI words.
pub trait AbiEncodable {
    /// Whether the encoded length depends on the value rather than the type.
    fn is_dynamic(&self) -> bool;

    fn encode_abi(&self) -> AbiResult<Words>;
}

impl<T: AbiEncodable> AbiEncodable for &T {
    #[inline]
    fn is_dynamic(&self) -> bool {
        (*self).is_dynamic()
    }

    #[inline]
    fn encode_abi(&self) -> AbiResult<Words> {
        (*self).encode_abi()
    }
}

impl AbiEncodable for Value {
    fn is_dynamic(&self) -> bool {
        Value::is_dynamic(self)
    }

    fn encode_abi(&self) -> AbiResult<Words> {
        match self {
            Value::Int { ty, value } => scalar::encode_int(value, *ty).map(Words::from),
            Value::Uint { ty, value } => scalar::encode_uint(value, *ty).map(Words::from),
            Value::Bool(value) => Ok(scalar::encode_bool(*value).into()),
            Value::Address(address) => Ok(scalar::encode_address(address).into()),
            Value::FixedBytes { ty, bytes } => {
                scalar::encode_fixed_bytes(bytes, ty.size()).map(Words::from)
            }
            Value::Bytes(bytes) => Ok(scalar::encode_bytes(bytes)),
            Value::String(text) => Ok(scalar::encode_bytes(text.as_bytes())),
            Value::FixedArray { ty, items } => composite::encode_fixed_array(items, ty.num_elements),
            Value::Array { items, .. } => composite::encode_array(items),
            Value::Tuple(tuple) => tuple.encode_abi(),
        }
    }
}

impl AbiEncodable for TupleValue {
    fn is_dynamic(&self) -> bool {
        TupleValue::is_dynamic(self)
    }

    fn encode_abi(&self) -> AbiResult<Words> {
        composite::encode_tuple(self.values())
    }
}

impl Value {
    /// Encode and flatten into bytes.
    pub fn encode(&self) -> AbiResult<Vec<u8>> {
        Ok(self.encode_abi()?.to_bytes())
    }
}

impl TupleValue {
    /// Encode and flatten into bytes. This is the layout of a call's argument
    /// list.
    pub fn encode(&self) -> AbiResult<Vec<u8>> {
        Ok(self.encode_abi()?.to_bytes())
    }
}
