use strum::EnumIs;
use thiserror::Error;

#[derive(Debug, EnumIs, Error)]
pub enum AbiError {
    /// The number of supplied values differs from the number of slots to fill.
    #[error("Expected {expected} values, got {found}.")]
    ArityMismatch { expected: usize, found: usize },

    /// A numeric value does not fit into the declared integer width.
    #[error("Value `{value}` does not fit into type `{ty}`.")]
    Overflow { value: String, ty: String },

    /// A byte sequence is longer than the slot it must be written into.
    #[error("Cannot fit {len} bytes into a slot of at most {max} bytes.")]
    TooLong { len: usize, max: usize },

    /// The mapper could not coerce a native value into the requested type.
    #[error("Cannot map value to type `{ty}`: {reason}.")]
    Unmappable { ty: String, reason: String },

    /// A type signature could not be parsed.
    #[error("Invalid type signature `{input}`: {}", reasons.join("; "))]
    InvalidType { input: String, reasons: Vec<String> },

    /// Encoder configuration could not be loaded.
    #[error("Failed to parse encoder configuration: {0}")]
    InvalidConfig(#[from] toml::de::Error),
}

pub type AbiResult<T> = Result<T, AbiError>;

impl AbiError {
    pub(crate) fn unmappable(ty: impl ToString, reason: impl Into<String>) -> Self {
        AbiError::Unmappable {
            ty: ty.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn overflow(value: impl ToString, ty: impl ToString) -> Self {
        AbiError::Overflow {
            value: value.to_string(),
            ty: ty.to_string(),
        }
    }
}
