//! Value mapping: native values to typed [`Value`]s.
//!
//! The encoder never looks at native values directly. A [`Mapper`] is consulted
//! once per top-level value to coerce it into the shape of the requested
//! [`AbiType`]. [`JsonMapper`] is the default mapper and works on
//! [`serde_json::Value`]s.
use num_bigint::{BigInt, BigUint, Sign};
use serde::Deserialize;
use serde_json::Value as Json;

use crate::{
    address::Address,
    error::{AbiError, AbiResult},
    types::{
        AbiType,
        aggregate::{ArrayType, TupleType},
        primary::{FixedBytesType, IntType},
    },
    value::{TupleValue, Value},
};

/// Coerces a native value into a typed value.
pub trait Mapper: Send + Sync {
    fn map(&self, native: &Json, ty: &AbiType) -> AbiResult<Value>;
}

/// Tunables of [`JsonMapper`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapperOptions {
    /// Hexadecimal strings (bytes, addresses) must start with `0x`.
    pub require_hex_prefix: bool,

    /// Integers may be given as decimal strings, e.g. `"1000"`.
    pub allow_decimal_strings: bool,

    /// `bytesN` inputs shorter than N are right-padded instead of rejected.
    pub allow_short_fixed_bytes: bool,
}

impl Default for MapperOptions {
    fn default() -> Self {
        Self {
            require_hex_prefix: false,
            allow_decimal_strings: true,
            allow_short_fixed_bytes: true,
        }
    }
}

/// Maps JSON values onto ABI types.
///
/// | type          | accepted JSON                                        |
/// |---------------|------------------------------------------------------|
/// | `intN/uintN`  | integer number, `0x` hex string, decimal string      |
/// | `bool`        | boolean                                              |
/// | `address`     | 40 hex digits                                        |
/// | `bytesN/bytes`| hex string or array of byte numbers                  |
/// | `string`      | string                                               |
/// | `T[N]`/`T[]`  | array (exactly N items for `T[N]`)                   |
/// | tuple         | array (positional) or object keyed by component name |
#[derive(Debug, Clone, Default)]
pub struct JsonMapper {
    options: MapperOptions,
}

impl JsonMapper {
    pub fn new(options: MapperOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MapperOptions {
        &self.options
    }

    fn map_int(&self, native: &Json, ty: IntType, signed: bool) -> AbiResult<Value> {
        let abi_ty = if signed {
            AbiType::Int(ty)
        } else {
            AbiType::Uint(ty)
        };
        let value = match native {
            Json::Number(n) => {
                if let Some(v) = n.as_u64() {
                    BigInt::from(v)
                } else if let Some(v) = n.as_i64() {
                    BigInt::from(v)
                } else {
                    return Err(AbiError::unmappable(abi_ty, format!("`{}` is not an integer", n)));
                }
            }
            Json::String(s) => self.parse_integer(s, &abi_ty)?,
            other => return Err(AbiError::unmappable(abi_ty, describe(other))),
        };

        if signed {
            return Ok(Value::Int { ty, value });
        }
        match value.into_parts() {
            (Sign::Minus, magnitude) => Err(AbiError::overflow(
                format!("-{}", magnitude),
                abi_ty,
            )),
            (_, magnitude) => Ok(Value::Uint {
                ty,
                value: magnitude,
            }),
        }
    }

    /// Parse an optionally negative `0x` hex or decimal integer string. Only
    /// ASCII digits are accepted: no whitespace, `+` or `_` separators.
    fn parse_integer(&self, s: &str, ty: &AbiType) -> AbiResult<BigInt> {
        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (radix, digits) = if let Some(hex) = unsigned.strip_prefix("0x") {
            (16, hex)
        } else if self.options.allow_decimal_strings {
            (10, unsigned)
        } else {
            return Err(AbiError::unmappable(
                ty,
                format!("decimal string `{}` not allowed, use `0x` hex", s),
            ));
        };
        let invalid = || AbiError::unmappable(ty, format!("`{}` is not a valid integer", s));
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return Err(invalid());
        }
        let magnitude = BigUint::parse_bytes(digits.as_bytes(), radix).ok_or_else(invalid)?;

        let sign = if negative { Sign::Minus } else { Sign::Plus };
        Ok(BigInt::from_biguint(sign, magnitude))
    }

    fn map_bytes(&self, native: &Json, ty: &AbiType) -> AbiResult<Vec<u8>> {
        match native {
            Json::String(s) => {
                let digits = match s.strip_prefix("0x") {
                    Some(digits) => digits,
                    None if self.options.require_hex_prefix => {
                        return Err(AbiError::unmappable(
                            ty,
                            format!("`{}` is missing the `0x` prefix", s),
                        ));
                    }
                    None => s.as_str(),
                };
                hex::decode(digits)
                    .map_err(|e| AbiError::unmappable(ty, format!("invalid hex `{}`: {}", s, e)))
            }
            Json::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_u64()
                        .and_then(|b| u8::try_from(b).ok())
                        .ok_or_else(|| {
                            AbiError::unmappable(ty, format!("`{}` is not a byte", item))
                        })
                })
                .collect(),
            other => Err(AbiError::unmappable(ty, describe(other))),
        }
    }

    fn map_fixed_bytes(&self, native: &Json, ty: FixedBytesType) -> AbiResult<Value> {
        let abi_ty = AbiType::FixedBytes(ty);
        let bytes = self.map_bytes(native, &abi_ty)?;
        if !self.options.allow_short_fixed_bytes && bytes.len() < ty.size() {
            return Err(AbiError::unmappable(
                abi_ty,
                format!("expected {} bytes, got {}", ty.size(), bytes.len()),
            ));
        }
        // Longer inputs are rejected by the encoder with `TooLong`.
        Ok(Value::FixedBytes { ty, bytes })
    }

    fn map_address(&self, native: &Json) -> AbiResult<Value> {
        match native {
            Json::String(s) => {
                if self.options.require_hex_prefix && !s.starts_with("0x") {
                    return Err(AbiError::unmappable(
                        AbiType::Address,
                        format!("`{}` is missing the `0x` prefix", s),
                    ));
                }
                s.parse::<Address>().map(Value::Address)
            }
            other => Err(AbiError::unmappable(AbiType::Address, describe(other))),
        }
    }

    fn map_items(&self, native: &Json, elem: &AbiType, ty: &AbiType) -> AbiResult<Vec<Value>> {
        match native {
            Json::Array(items) => items.iter().map(|item| self.map(item, elem)).collect(),
            other => Err(AbiError::unmappable(ty, describe(other))),
        }
    }

    fn map_fixed_array(&self, native: &Json, array: &ArrayType) -> AbiResult<Value> {
        let ty = AbiType::FixedArray(array.clone());
        let items = self.map_items(native, &array.ty, &ty)?;
        if items.len() != array.num_elements {
            return Err(AbiError::unmappable(
                ty,
                format!("expected {} items, got {}", array.num_elements, items.len()),
            ));
        }
        Ok(Value::FixedArray {
            ty: array.clone(),
            items,
        })
    }

    fn map_tuple(&self, native: &Json, tuple: &TupleType) -> AbiResult<TupleValue> {
        match native {
            Json::Array(items) => {
                if items.len() != tuple.arity() {
                    return Err(AbiError::unmappable(
                        tuple,
                        format!("expected {} items, got {}", tuple.arity(), items.len()),
                    ));
                }
                tuple
                    .iter()
                    .zip(items)
                    .map(|(component, item)| -> AbiResult<(String, Value)> {
                        Ok((component.name.clone(), self.map(item, &component.ty)?))
                    })
                    .collect()
            }
            Json::Object(fields) => tuple
                .iter()
                .map(|component| -> AbiResult<(String, Value)> {
                    let item = fields.get(&component.name).ok_or_else(|| {
                        AbiError::unmappable(
                            tuple,
                            format!("missing field `{}`", component.name),
                        )
                    })?;
                    Ok((component.name.clone(), self.map(item, &component.ty)?))
                })
                .collect(),
            other => Err(AbiError::unmappable(tuple, describe(other))),
        }
    }
}

impl Mapper for JsonMapper {
    fn map(&self, native: &Json, ty: &AbiType) -> AbiResult<Value> {
        match ty {
            AbiType::Int(int) => self.map_int(native, *int, true),
            AbiType::Uint(int) => self.map_int(native, *int, false),
            AbiType::Bool => match native {
                Json::Bool(b) => Ok(Value::Bool(*b)),
                other => Err(AbiError::unmappable(ty, describe(other))),
            },
            AbiType::Address => self.map_address(native),
            AbiType::FixedBytes(fixed) => self.map_fixed_bytes(native, *fixed),
            AbiType::Bytes => self.map_bytes(native, ty).map(Value::Bytes),
            AbiType::String => match native {
                Json::String(s) => Ok(Value::String(s.clone())),
                other => Err(AbiError::unmappable(ty, describe(other))),
            },
            AbiType::FixedArray(array) => self.map_fixed_array(native, array),
            AbiType::Array(elem) => Ok(Value::Array {
                elem: elem.as_ref().clone(),
                items: self.map_items(native, elem, ty)?,
            }),
            AbiType::Tuple(tuple) => self.map_tuple(native, tuple).map(Value::Tuple),
        }
    }
}

fn describe(native: &Json) -> String {
    let kind = match native {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    };
    format!("unexpected {}", kind)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn map(native: Json, ty: &str) -> AbiResult<Value> {
        JsonMapper::default().map(&native, &ty.parse().unwrap())
    }

    #[test]
    fn integers_from_numbers_and_strings() {
        assert_eq!(map(json!(255), "uint8").unwrap(), Value::uint(8, 255u32));
        assert_eq!(map(json!("0xff"), "uint8").unwrap(), Value::uint(8, 255u32));
        assert_eq!(map(json!("1000"), "uint256").unwrap(), Value::uint(256, 1000u32));
        assert_eq!(map(json!(-5), "int16").unwrap(), Value::int(16, -5));
        assert_eq!(map(json!("-0x10"), "int16").unwrap(), Value::int(16, -16));

        // Range is checked by the encoder, not the mapper.
        assert_eq!(map(json!(256), "uint8").unwrap(), Value::uint(8, 256u32));
    }

    #[test]
    fn integer_rejections() {
        assert!(map(json!(-1), "uint8").unwrap_err().is_overflow());
        assert!(map(json!(1.5), "uint8").unwrap_err().is_unmappable());
        assert!(map(json!("twelve"), "uint8").unwrap_err().is_unmappable());
        assert!(map(json!(true), "int8").unwrap_err().is_unmappable());

        // Only plain ASCII digits after an optional `-` and `0x`.
        for garbage in ["-+5", "+5", "1_000", "0x_ff", " 7 ", "", "-", "0x", "--1", "0x-1"] {
            let err = map(json!(garbage), "int256").unwrap_err();
            assert!(err.is_unmappable(), "`{}` should be rejected", garbage);
        }

        let strict = JsonMapper::new(MapperOptions {
            allow_decimal_strings: false,
            ..Default::default()
        });
        let err = strict.map(&json!("10"), &AbiType::uint(8)).unwrap_err();
        assert!(err.is_unmappable());
        assert!(strict.map(&json!("0x0a"), &AbiType::uint(8)).is_ok());
    }

    #[test]
    fn byte_sequences() {
        assert_eq!(map(json!("0x010203"), "bytes").unwrap(), Value::Bytes(vec![1, 2, 3]));
        assert_eq!(map(json!([1, 2, 3]), "bytes").unwrap(), Value::Bytes(vec![1, 2, 3]));
        assert_eq!(
            map(json!("0xabcd"), "bytes4").unwrap(),
            Value::fixed_bytes(4, vec![0xab, 0xcd])
        );
        assert!(map(json!([256]), "bytes").unwrap_err().is_unmappable());
        assert!(map(json!("0xabc"), "bytes").unwrap_err().is_unmappable());

        let strict = JsonMapper::new(MapperOptions {
            require_hex_prefix: true,
            allow_short_fixed_bytes: false,
            ..Default::default()
        });
        assert!(strict.map(&json!("abcd"), &AbiType::Bytes).unwrap_err().is_unmappable());
        let err = strict
            .map(&json!("0xabcd"), &AbiType::fixed_bytes(4))
            .unwrap_err();
        assert!(err.is_unmappable());
        assert!(strict.map(&json!("0xabcd0000"), &AbiType::fixed_bytes(4)).is_ok());
    }

    #[test]
    fn addresses_booleans_and_strings() {
        let addr = map(json!("0x000000000000000000000000000000000000dead"), "address").unwrap();
        assert!(addr.is_address());
        assert_eq!(map(json!(false), "bool").unwrap(), Value::Bool(false));
        assert_eq!(map(json!("hi"), "string").unwrap(), Value::from("hi"));
        assert!(map(json!(1), "bool").unwrap_err().is_unmappable());
        assert!(map(json!("0x1234"), "address").unwrap_err().is_unmappable());
    }

    #[test]
    fn arrays_and_tuples() {
        let array = map(json!([1, 2, 3]), "uint8[]").unwrap();
        assert_eq!(array.abi_type().to_string(), "uint8[]");

        assert!(map(json!([1, 2]), "uint8[3]").unwrap_err().is_unmappable());
        assert!(map(json!([1, 2, 3]), "uint8[3]").is_ok());

        let positional = map(json!(["0x01", true]), "(bytes payload,bool flag)").unwrap();
        let named = map(json!({"flag": true, "payload": "0x01"}), "(bytes payload,bool flag)").unwrap();
        assert_eq!(positional, named);
        let Value::Tuple(tuple) = named else {
            panic!("expected a tuple");
        };
        assert_eq!(tuple.get("flag"), Some(&Value::Bool(true)));

        assert!(map(json!({"flag": true}), "(bytes payload,bool flag)")
            .unwrap_err()
            .is_unmappable());
        assert!(map(json!([true]), "(bytes,bool)").unwrap_err().is_unmappable());
    }
}
