//! Configuration errors (ECF).

define_domain_errors! {
    /// Configuration errors (ECF domain)
    pub enum ConfigError {
        /// ECF0001: Configuration sources could not be read or deserialized
        Load {
            code: (CF, Syntax, 1),
            message: "failed to load configuration from {path}: {reason}",
            fields: { path: String, reason: String },
        },

        /// ECF2001: Configuration values violate their constraints
        Invalid {
            code: (CF, Validation, 1),
            message: "invalid configuration in {path}: {reason}",
            help: "`max_alias_depth` must be between 1 and 4096",
            fields: { path: String, reason: String },
        },
    }
}

impl ConfigError {
    pub fn load(
        path: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::Load {
            path: path.into(),
            reason: reason.to_string(),
            span: None,
        }
    }

    pub fn invalid(
        path: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::Invalid {
            path: path.into(),
            reason: reason.to_string(),
            span: None,
        }
    }
}
