//! Aggregate types
//!
//! Composite descriptors built on top of [`AbiType`]:
//! - `ArrayType`: a fixed-length array (`T[N]`).
//! - `TupleType`: an ordered list of optionally named components.
//!
//! Dynamic arrays (`T[]`) only need their element type and are stored inline
//! in [`AbiType::Array`].
use std::fmt;

use crate::types::AbiType;

/// Fixed-length array type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArrayType {
    pub ty: Box<AbiType>,
    pub num_elements: usize,
}

impl ArrayType {
    pub fn new(ty: AbiType, num_elements: usize) -> Self {
        Self {
            ty: Box::new(ty),
            num_elements,
        }
    }
}

impl fmt::Display for ArrayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.ty, self.num_elements)
    }
}

/// A single tuple component. Unnamed components carry an empty name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TupleParam {
    pub name: String,
    pub ty: AbiType,
}

impl TupleParam {
    pub fn new(name: impl Into<String>, ty: AbiType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn unnamed(ty: AbiType) -> Self {
        Self::new(String::new(), ty)
    }
}

/// Tuple type. Also describes the argument list of a contract call.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TupleType {
    pub components: Vec<TupleParam>,
}

impl TupleType {
    pub fn new(components: Vec<TupleParam>) -> Self {
        Self { components }
    }

    /// Build a tuple of unnamed components.
    pub fn unnamed(types: impl IntoIterator<Item = AbiType>) -> Self {
        Self {
            components: types.into_iter().map(TupleParam::unnamed).collect(),
        }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.components.len()
    }

    pub fn is_dynamic(&self) -> bool {
        self.components.iter().any(|c| c.ty.is_dynamic())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TupleParam> {
        self.components.iter()
    }
}

impl FromIterator<TupleParam> for TupleType {
    fn from_iter<T: IntoIterator<Item = TupleParam>>(iter: T) -> Self {
        Self {
            components: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for TupleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", component.ty)?;
        }
        write!(f, ")")
    }
}
