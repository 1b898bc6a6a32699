use std::fmt::Display;

use extbind_errors::ConversionError;

/// How a type is represented on the native side of an extension call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeType {
    Void,
    Bool,
    Char,
    Int32,
    Int64,
    Float32,
    Float64,
    /// Opaque handle owned by the runtime
    Handle,
    /// 32-bit address into extension memory
    Pointer,
}

impl NativeType {
    /// Number of 32-bit argument words a value of this type occupies.
    pub const fn word_count(&self) -> usize {
        match self {
            Self::Void => 0,
            Self::Int64 | Self::Float64 => 2,
            _ => 1,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Handle => "handle",
            Self::Pointer => "pointer",
        }
    }

    /// Reads a value of this type from the raw argument words at `offset`.
    ///
    /// Two-word values are stored low word first.
    pub fn read(
        &self,
        args: &[i32],
        offset: usize,
    ) -> crate::Result<Value> {
        let words = words(args, offset, self.word_count())?;

        Ok(match self {
            Self::Void => Value::Void,
            Self::Bool => Value::Bool(words[0] != 0),
            Self::Char => {
                let unit = words[0] as u16;
                let c = char::from_u32(u32::from(unit)).ok_or_else(|| {
                    ConversionError::invalid_argument(words[0], offset, self.as_str())
                        .unlocated()
                        .build()
                })?;
                Value::Char(c)
            },
            Self::Int32 => Value::Int32(words[0]),
            Self::Handle => Value::Handle(words[0]),
            Self::Pointer => Value::Pointer(words[0] as u32),
            Self::Float32 => Value::Float32(f32::from_bits(words[0] as u32)),
            Self::Int64 => Value::Int64(join(words[0], words[1])),
            Self::Float64 => Value::Float64(f64::from_bits(join(words[0], words[1]) as u64)),
        })
    }
}

impl Display for NativeType {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn words(
    args: &[i32],
    offset: usize,
    needed: usize,
) -> crate::Result<&[i32]> {
    offset
        .checked_add(needed)
        .and_then(|end| args.get(offset..end))
        .ok_or_else(|| {
            ConversionError::out_of_bounds(offset, needed, args.len())
                .unlocated()
                .build()
        })
}

fn join(
    lo: i32,
    hi: i32,
) -> i64 {
    (i64::from(hi) << 32) | i64::from(lo as u32)
}

/// A value converted from raw argument words.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Void,
    Bool(bool),
    Char(char),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Handle(i32),
    Pointer(u32),
}

impl Value {
    pub const fn native_type(&self) -> NativeType {
        match self {
            Self::Void => NativeType::Void,
            Self::Bool(_) => NativeType::Bool,
            Self::Char(_) => NativeType::Char,
            Self::Int32(_) => NativeType::Int32,
            Self::Int64(_) => NativeType::Int64,
            Self::Float32(_) => NativeType::Float32,
            Self::Float64(_) => NativeType::Float64,
            Self::Handle(_) => NativeType::Handle,
            Self::Pointer(_) => NativeType::Pointer,
        }
    }
}
