use std::{collections::HashSet, fmt::Display};

use crate::{AliasDescriptor, NativeType, Value};

/// A built-in scalar type such as `int` or `double`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimitiveDescriptor {
    name: String,
    native: NativeType,
}

impl PrimitiveDescriptor {
    pub fn new(
        name: impl Into<String>,
        native: NativeType,
    ) -> Self {
        Self {
            name: name.into(),
            native,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn native(&self) -> NativeType {
        self.native
    }

    /// The primitives every registry created with builtins starts out with.
    pub fn builtins() -> Vec<Self> {
        [
            ("void", NativeType::Void),
            ("bool", NativeType::Bool),
            ("char", NativeType::Char),
            ("int", NativeType::Int32),
            ("long", NativeType::Int64),
            ("float", NativeType::Float32),
            ("double", NativeType::Float64),
            ("handle", NativeType::Handle),
        ]
        .into_iter()
        .map(|(name, native)| Self::new(name, native))
        .collect()
    }
}

/// A pointer into extension memory. The pointee is kept for display only.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerDescriptor {
    pointee: Box<Descriptor>,
}

impl PointerDescriptor {
    pub fn new(pointee: Descriptor) -> Self {
        Self {
            pointee: Box::new(pointee),
        }
    }

    pub fn pointee(&self) -> &Descriptor {
        &self.pointee
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Descriptor {
    Primitive(PrimitiveDescriptor),
    Pointer(PointerDescriptor),
    Alias(AliasDescriptor),
}

impl Descriptor {
    /// The name the descriptor is known by, without resolving anything.
    pub fn type_name(&self) -> String {
        match self {
            Self::Primitive(p) => p.name().to_string(),
            Self::Pointer(p) => format!("{}*", p.pointee().type_name()),
            Self::Alias(a) => a.name().to_string(),
        }
    }

    pub const fn is_alias(&self) -> bool {
        matches!(self, Self::Alias(_))
    }

    /// Resolves this descriptor using `visited` as the trail of typedef names
    /// already followed in the current chain.
    ///
    /// Concrete descriptors resolve to themselves.
    pub fn resolve_with(
        &self,
        visited: &mut HashSet<String>,
    ) -> crate::Result<Descriptor> {
        match self {
            Self::Alias(alias) => alias.resolve_with(visited),
            concrete => Ok(concrete.clone()),
        }
    }

    pub fn resolve(&self) -> crate::Result<Descriptor> {
        self.resolve_with(&mut HashSet::new())
    }

    pub fn native_type(&self) -> crate::Result<NativeType> {
        match self {
            Self::Primitive(p) => Ok(p.native()),
            Self::Pointer(_) => Ok(NativeType::Pointer),
            Self::Alias(alias) => alias.native_type(),
        }
    }

    /// Converts the raw argument words at `offset` into a value of this type.
    pub fn convert(
        &self,
        args: &[i32],
        offset: usize,
    ) -> crate::Result<Value> {
        match self {
            Self::Primitive(p) => p.native().read(args, offset),
            Self::Pointer(_) => NativeType::Pointer.read(args, offset),
            Self::Alias(alias) => alias.convert(args, offset),
        }
    }
}

impl Display for Descriptor {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Alias(alias) => Display::fmt(alias, f),
            concrete => f.write_str(&concrete.type_name()),
        }
    }
}

impl From<PrimitiveDescriptor> for Descriptor {
    fn from(value: PrimitiveDescriptor) -> Self {
        Self::Primitive(value)
    }
}

impl From<PointerDescriptor> for Descriptor {
    fn from(value: PointerDescriptor) -> Self {
        Self::Pointer(value)
    }
}

impl From<AliasDescriptor> for Descriptor {
    fn from(value: AliasDescriptor) -> Self {
        Self::Alias(value)
    }
}
