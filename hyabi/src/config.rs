//! Encoder configuration.
//!
//! There is no process-wide configuration: every [`Encoder`](crate::encoder::Encoder)
//! owns a [`Config`]. [`Config::default`] is the documented default and maps
//! JSON values with [`JsonMapper`] using [`MapperOptions::default`].
//!
//! Mapper options can also be loaded from TOML:
//!
//! ```toml
//! [mapper]
//! require_hex_prefix = true
//! allow_decimal_strings = false
//! ```
use std::{fmt, sync::Arc};

use log::debug;
use serde::Deserialize;

use crate::{
    error::AbiResult,
    mapper::{JsonMapper, Mapper, MapperOptions},
};

#[derive(Clone)]
pub struct Config {
    /// Mapper consulted for every top-level value before encoding.
    pub mapper: Arc<dyn Mapper>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    mapper: MapperOptions,
}

impl Config {
    pub fn new(mapper: Arc<dyn Mapper>) -> Self {
        Self { mapper }
    }

    /// Replace the mapper, keeping everything else.
    pub fn with_mapper(mut self, mapper: impl Mapper + 'static) -> Self {
        self.mapper = Arc::new(mapper);
        self
    }

    /// Default configuration with [`JsonMapper`] options read from a TOML
    /// document. Missing keys keep their default value.
    pub fn from_toml_str(src: &str) -> AbiResult<Self> {
        let file: ConfigFile = toml::from_str(src)?;
        debug!("Loaded encoder configuration: {:?}", file.mapper);
        Ok(Self::new(Arc::new(JsonMapper::new(file.mapper))))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Arc::new(JsonMapper::default()))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config").finish_non_exhaustive()
    }
}
