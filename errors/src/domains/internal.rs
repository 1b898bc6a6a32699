//! Internal errors (EIN).
//! Bugs in the generator, not in user declarations.

define_domain_errors! {
    /// Internal errors (EIN domain)
    pub enum InternalError {
        /// EIN9001: Internal error (generic)
        InternalError {
            code: (IN, Internal, 1),
            message: "internal error: {reason}",
            help: "this is a generator bug - please report it",
            fields: { reason: String },
        },
    }
}

impl InternalError {
    pub fn internal(reason: impl Into<String>) -> Self {
        Self::InternalError {
            reason: reason.into(),
            span: None,
        }
    }
}
