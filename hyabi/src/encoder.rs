//! Encoder facade.
//!
//! Validates arity, maps native values through the configured
//! [`Mapper`](crate::mapper::Mapper), lays them out with the head/tail
//! algorithm and flattens the words into bytes.
use log::debug;
use serde_json::Value as Json;

use crate::{
    config::Config,
    encoding::AbiEncodable,
    error::{AbiError, AbiResult},
    types::{AbiType, aggregate::TupleType},
    value::{TupleValue, Value},
};

#[derive(Debug, Clone, Default)]
pub struct Encoder {
    config: Config,
}

impl Encoder {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Map `native` onto `ty` and encode it.
    pub fn encode_value(&self, ty: &AbiType, native: &Json) -> AbiResult<Vec<u8>> {
        debug!("Encoding a value of type {}", ty);
        let value = self.config.mapper.map(native, ty)?;
        self.encode_typed(&value)
    }

    /// Map every value onto the matching component of `ty` and encode them
    /// as one tuple, which is how call arguments are packed.
    ///
    /// Fails with [`AbiError::ArityMismatch`] if the number of values differs
    /// from the number of components.
    pub fn encode_values(&self, ty: &TupleType, natives: &[Json]) -> AbiResult<Vec<u8>> {
        if ty.arity() != natives.len() {
            return Err(AbiError::ArityMismatch {
                expected: ty.arity(),
                found: natives.len(),
            });
        }
        debug!("Encoding {} values as {}", natives.len(), ty);

        let tuple = ty
            .iter()
            .zip(natives)
            .map(|(component, native)| -> AbiResult<(String, Value)> {
                let value = self.config.mapper.map(native, &component.ty)?;
                Ok((component.name.clone(), value))
            })
            .collect::<AbiResult<TupleValue>>()?;
        Ok(tuple.encode_abi()?.to_bytes())
    }

    /// Encode an already typed value; no mapping takes place.
    pub fn encode_typed(&self, value: &Value) -> AbiResult<Vec<u8>> {
        Ok(value.encode_abi()?.to_bytes())
    }
}

/// [`Encoder::encode_value`] with the default configuration.
pub fn encode_value(ty: &AbiType, native: &Json) -> AbiResult<Vec<u8>> {
    Encoder::default().encode_value(ty, native)
}

/// [`Encoder::encode_values`] with the default configuration.
pub fn encode_values(ty: &TupleType, natives: &[Json]) -> AbiResult<Vec<u8>> {
    Encoder::default().encode_values(ty, natives)
}

/// Like [`encode_value`] but panics on error.
pub fn must_encode_value(ty: &AbiType, native: &Json) -> Vec<u8> {
    match encode_value(ty, native) {
        Ok(bytes) => bytes,
        Err(err) => panic!("{}", err),
    }
}

/// Like [`encode_values`] but panics on error.
pub fn must_encode_values(ty: &TupleType, natives: &[Json]) -> Vec<u8> {
    match encode_values(ty, natives) {
        Ok(bytes) => bytes,
        Err(err) => panic!("{}", err),
    }
}
