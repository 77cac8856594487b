//! Ethereum contract ABI encoding.
//!
//! Values are described by an [`AbiType`] (parsed from a canonical signature
//! such as `"(uint256,bytes)[]"`), coerced from native JSON values by a
//! [`Mapper`], and laid out as a sequence of 32-byte [`Word`]s using the
//! head/tail encoding for composites.
//!
//! ```rust
//! use hyabi::{encode_values, parse_tuple};
//! use serde_json::json;
//!
//! let args = parse_tuple("(uint256,bool)").unwrap();
//! let bytes = encode_values(&args, &[json!(1), json!(true)]).unwrap();
//! assert_eq!(bytes.len(), 64);
//! assert_eq!(bytes[31], 1);
//! assert_eq!(bytes[63], 1);
//! ```
#![allow(clippy::manual_is_multiple_of)]

pub mod address;
pub mod config;
pub mod encoder;
pub mod encoding;
pub mod error;
pub mod mapper;
pub mod types;
pub mod value;
pub mod word;

pub use address::Address;
pub use config::Config;
pub use encoder::{Encoder, encode_value, encode_values, must_encode_value, must_encode_values};
pub use encoding::AbiEncodable;
pub use error::{AbiError, AbiResult};
pub use mapper::{JsonMapper, Mapper, MapperOptions};
pub use types::{
    AbiType,
    aggregate::{ArrayType, TupleParam, TupleType},
    parser::{parse_tuple, parse_type},
    primary::{FixedBytesType, IntType},
};
pub use value::{TupleValue, Value};
pub use word::{WORD_LENGTH, Word, Words};
