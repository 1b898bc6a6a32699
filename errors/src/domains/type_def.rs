//! Type definition errors (ETY).
//! Errors raised while registering descriptors.

define_domain_errors! {
    /// Type definition errors (ETY domain)
    pub enum TypeDefError {
        /// ETY0001: Name cannot be used for a type
        InvalidTypeName {
            code: (TY, Syntax, 1),
            message: "invalid type name: '{name}'",
            help: "type names must be non-empty and contain no whitespace or '*'",
            fields: { name: String },
        },

        /// ETY3001: Duplicate type registration
        DuplicateType {
            code: (TY, Conflict, 1),
            message: "duplicate type '{name}' already registered",
            help: "rename the type to avoid conflict",
            fields: { name: String },
        },
    }
}

impl TypeDefError {
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidTypeName {
            name: name.into(),
            span: None,
        }
    }

    pub fn duplicate_type(name: impl Into<String>) -> Self {
        Self::DuplicateType {
            name: name.into(),
            span: None,
        }
    }
}
