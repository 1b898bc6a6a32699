//! Value conversion errors (ECV).
//! Raised when raw argument words cannot be turned into a value.

define_domain_errors! {
    /// Value conversion errors (ECV domain)
    pub enum ConversionError {
        /// ECV2001: Operation is not available on this descriptor kind
        UnsupportedOperation {
            code: (CV, Validation, 1),
            message: "cannot {operation} '{name}': typedefs must be resolved",
            help: "resolve the typedef and call the operation on the resolved descriptor",
            fields: { operation: String, name: String },
        },

        /// ECV2002: Argument word is not a valid value of the type
        InvalidArgument {
            code: (CV, Validation, 2),
            message: "argument word {word:#x} at offset {offset} is not a valid {ty}",
            fields: { word: i32, offset: usize, ty: String },
        },

        /// ECV4001: Not enough argument words
        ArgumentOutOfBounds {
            code: (CV, Missing, 1),
            message: "reading {needed} argument word(s) at offset {offset} exceeds the {available} available",
            help: "the argument layout does not match the declared parameter types",
            fields: { offset: usize, needed: usize, available: usize },
        },
    }
}

impl ConversionError {
    pub fn unsupported(
        operation: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::UnsupportedOperation {
            operation: operation.into(),
            name: name.into(),
            span: None,
        }
    }

    pub fn invalid_argument(
        word: i32,
        offset: usize,
        ty: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            word,
            offset,
            ty: ty.into(),
            span: None,
        }
    }

    pub fn out_of_bounds(
        offset: usize,
        needed: usize,
        available: usize,
    ) -> Self {
        Self::ArgumentOutOfBounds {
            offset,
            needed,
            available,
            span: None,
        }
    }
}
