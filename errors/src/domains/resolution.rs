//! Type resolution errors (ETR).
//! Raised while following a typedef chain to its concrete descriptor.

define_domain_errors! {
    /// Type resolution errors (ETR domain)
    pub enum ResolutionError {
        /// ETR1001: The referenced type is not registered
        UndefinedType {
            code: (TR, Resolution, 1),
            message: "unknown type: '{name}'",
            help: "check spelling or declare the type before it is referenced",
            fields: { name: String },
        },

        /// ETR5001: A typedef chain revisits itself
        CircularDefinition {
            code: (TR, Cycle, 1),
            message: "circular definition of '{name}'",
            help: "break the cycle by pointing one typedef at a concrete type",
            fields: { name: String },
        },

        /// ETR5002: A typedef chain is longer than the configured limit
        AliasDepthExceeded {
            code: (TR, Cycle, 2),
            message: "typedef chain starting at '{name}' exceeds the maximum depth of {limit}",
            help: "shorten the chain or raise `max_alias_depth`",
            fields: { name: String, limit: usize },
        },

        /// ETR9001: The registry backing a typedef is gone
        RegistryUnavailable {
            code: (TR, Internal, 1),
            message: "type registry for '{name}' has been dropped",
            help: "keep the registry alive for as long as its descriptors are in use",
            fields: { name: String },
        },
    }
}

impl ResolutionError {
    pub fn undefined_type(name: impl Into<String>) -> Self {
        Self::UndefinedType {
            name: name.into(),
            span: None,
        }
    }

    pub fn circular_definition(name: impl Into<String>) -> Self {
        Self::CircularDefinition {
            name: name.into(),
            span: None,
        }
    }

    pub fn depth_exceeded(
        name: impl Into<String>,
        limit: usize,
    ) -> Self {
        Self::AliasDepthExceeded {
            name: name.into(),
            limit,
            span: None,
        }
    }

    pub fn registry_unavailable(name: impl Into<String>) -> Self {
        Self::RegistryUnavailable {
            name: name.into(),
            span: None,
        }
    }
}
