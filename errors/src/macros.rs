/// Declares a domain error enum.
///
/// Each variant carries an error code, a message template, optional help
/// text and its own fields. A `span` field is
/// appended to every variant.
#[macro_export]
macro_rules! define_domain_errors {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident {
                    code: ($domain:ident, $category:ident, $seq:literal),
                    message: $msg:literal
                    $(, help: $help:literal)?
                    $(, fields: { $($field:ident: $ftype:ty),* $(,)? })?
                    $(,)?
                }
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant {
                    $($($field: $ftype,)*)?
                    span: Option<$crate::Span>,
                },
            )*
        }

        impl $name {
            pub const fn error_code(&self) -> $crate::ErrorCode {
                match self {
                    $(
                        Self::$variant { .. } => $crate::ErrorCode::new(
                            $crate::Domain::$domain,
                            $crate::Category::$category,
                            $seq
                        ),
                    )*
                }
            }

            pub fn message(&self) -> String {
                match self {
                    $(
                        Self::$variant { $($($field,)*)? .. } => {
                            format!($msg $(, $($field = $field),*)?)
                        }
                    )*
                }
            }

            pub fn help_text(&self) -> Option<&'static str> {
                match self {
                    $(
                        Self::$variant { .. } => $crate::define_domain_errors!(@help $($help)?),
                    )*
                }
            }

            pub fn span(&self) -> Option<$crate::Span> {
                match self {
                    $(Self::$variant { span, .. } => *span,)*
                }
            }

            pub fn with_span(mut self, new_span: $crate::Span) -> Self {
                match &mut self {
                    $(Self::$variant { span, .. } => *span = Some(new_span),)*
                }
                self
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.message())
            }
        }

        impl std::error::Error for $name {}
    };

    (@help) => { None };
    (@help $help:literal) => { Some($help) };
}

/// Wires a domain error enum into [`crate::CompilerError`] and the span builder.
macro_rules! impl_domain_error {
    ($name:ident => $variant:ident) => {
        impl $crate::DomainError for $name {
            fn into_compiler_error(self) -> $crate::CompilerError {
                $crate::CompilerError::$variant(self)
            }

            fn with_span(
                self,
                span: $crate::Span,
            ) -> Self {
                $name::with_span(self, span)
            }
        }

        impl $name {
            /// Starts a builder locating this error at `span`.
            pub fn at(
                self,
                span: impl Into<$crate::Span>,
            ) -> $crate::ErrorBuilder<$crate::Spanned, Self> {
                $crate::ErrorBuilder::new(self).at(span)
            }

            /// Locates this error at `span` when one is known.
            pub fn at_opt(
                self,
                span: Option<$crate::Span>,
            ) -> $crate::CompilerError {
                $crate::ErrorBuilder::new(self).at_opt(span)
            }

            /// Starts a builder for an error with no source location.
            pub fn unlocated(self) -> $crate::ErrorBuilder<$crate::Unlocated, Self> {
                $crate::ErrorBuilder::new(self).unlocated()
            }
        }

        impl From<$name> for $crate::CompilerError {
            fn from(e: $name) -> Self {
                $crate::CompilerError::$variant(e)
            }
        }
    };
}
