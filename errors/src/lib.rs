//! Unified error handling for the extbind binding generator.
//!
//! Every error carries an `E[Domain][Category][Sequence]` code, a message,
//! optional help text and an optional declaration span, and can be rendered
//! through miette.
//!
//! ```
//! use extbind_errors::{CompilerError, ResolutionError, Span};
//!
//! let err: CompilerError = ResolutionError::undefined_type("int")
//!     .at(Span::new(8, 11))
//!     .build();
//!
//! assert_eq!(err.error_code().to_string(), "ETR1001");
//! ```

#![allow(clippy::large_enum_variant)]

mod code;
mod diagnostic;
#[macro_use]
mod macros;
mod builder;
mod span;

pub mod domains;

pub use builder::{DomainError, ErrorBuilder, SourceContext, Spanned, Unlocated, Unspanned};
pub use code::{Category, Domain, ErrorCode};
pub use diagnostic::{DiagnosticBuilder, SpanDiagnostic};
pub use span::Span;

pub use domains::{ConfigError, ConversionError, InternalError, ResolutionError, TypeDefError};

use std::{path::PathBuf, sync::Arc};

/// Unified error type for all generator operations.
#[derive(Debug, Clone, PartialEq)]
pub enum CompilerError {
    TypeDef(TypeDefError),
    Resolution(ResolutionError),
    Conversion(ConversionError),
    Config(ConfigError),
    Internal(InternalError),

    /// Error with attached declaration source.
    WithSource {
        inner: Box<CompilerError>,
        path: PathBuf,
        source: Arc<String>,
    },

    /// Multiple errors collected during one pass.
    Multiple(Vec<CompilerError>),
}

impl CompilerError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::TypeDef(e) => e.error_code(),
            Self::Resolution(e) => e.error_code(),
            Self::Conversion(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Internal(e) => e.error_code(),
            Self::WithSource { inner, .. } => inner.error_code(),
            Self::Multiple(errs) => {
                errs.first()
                    .map(|e| e.error_code())
                    .unwrap_or_else(|| ErrorCode::new(Domain::IN, Category::Internal, 1))
            },
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::TypeDef(e) => e.message(),
            Self::Resolution(e) => e.message(),
            Self::Conversion(e) => e.message(),
            Self::Config(e) => e.message(),
            Self::Internal(e) => e.message(),
            Self::WithSource { inner, .. } => inner.message(),
            Self::Multiple(errs) => {
                if errs.len() == 1 {
                    errs[0].message()
                } else {
                    format!("{} errors occurred", errs.len())
                }
            },
        }
    }

    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            Self::TypeDef(e) => e.help_text(),
            Self::Resolution(e) => e.help_text(),
            Self::Conversion(e) => e.help_text(),
            Self::Config(e) => e.help_text(),
            Self::Internal(e) => e.help_text(),
            Self::WithSource { inner, .. } => inner.help_text(),
            Self::Multiple(_) => None,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::TypeDef(e) => e.span(),
            Self::Resolution(e) => e.span(),
            Self::Conversion(e) => e.span(),
            Self::Config(e) => e.span(),
            Self::Internal(e) => e.span(),
            Self::WithSource { inner, .. } => inner.span(),
            Self::Multiple(errs) => errs.first().and_then(|e| e.span()),
        }
    }

    /// Wraps this error with declaration source context.
    pub fn with_source(
        self,
        path: impl Into<PathBuf>,
        source: impl Into<String>,
    ) -> Self {
        Self::WithSource {
            inner: Box::new(self),
            path: path.into(),
            source: Arc::new(source.into()),
        }
    }

    /// Extracts source information from nested `WithSource` wrappers.
    pub fn extract_source(&self) -> Option<(&std::path::Path, &str)> {
        match self {
            Self::WithSource {
                inner,
                path,
                source,
            } => {
                inner
                    .extract_source()
                    .or(Some((path.as_path(), source.as_str())))
            },
            _ => None,
        }
    }

    /// Strips source wrappers.
    pub fn root(&self) -> &Self {
        match self {
            Self::WithSource { inner, .. } => inner.root(),
            other => other,
        }
    }

    /// Flattens nested `Multiple` groups into their leaf errors.
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::Multiple(errs) => {
                errs.into_iter()
                    .flat_map(Self::flatten)
                    .collect()
            },
            other => vec![other],
        }
    }

    /// Collapses a list of errors: one error stays itself, several become `Multiple`.
    pub fn collect(mut errs: Vec<Self>) -> Option<Self> {
        match errs.len() {
            0 => None,
            1 => errs.pop(),
            _ => Some(Self::Multiple(errs)),
        }
    }

    fn diagnostic(&self) -> DiagnosticBuilder {
        let related = match self {
            Self::Multiple(errs) if errs.len() > 1 => {
                errs.iter()
                    .map(|e| e.diagnostic().build())
                    .collect()
            },
            _ => Vec::new(),
        };

        let mut builder =
            DiagnosticBuilder::new(self.error_code(), self.message())
                .help_opt(self.help_text())
                .span_opt(self.span())
                .related(related);

        if let Some((path, source)) = self.extract_source() {
            builder = builder.source(path, source);
        }

        builder
    }

    /// Converts to a miette Report for display.
    pub fn to_report(&self) -> miette::Report {
        self.diagnostic().into_report()
    }
}

impl std::fmt::Display for CompilerError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CompilerError {}

impl From<std::convert::Infallible> for CompilerError {
    fn from(_: std::convert::Infallible) -> Self {
        unreachable!()
    }
}

pub type Result<T, E = CompilerError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_generation() {
        let err: CompilerError = ResolutionError::circular_definition("Loop")
            .unlocated()
            .build();
        assert_eq!(err.error_code().to_string(), "ETR5001");
    }

    #[test]
    fn error_message() {
        let err: CompilerError = ResolutionError::undefined_type("int")
            .unlocated()
            .build();
        assert_eq!(err.message(), "unknown type: 'int'");
    }

    #[test]
    fn error_with_source() {
        let err: CompilerError = ResolutionError::undefined_type("int")
            .at(Span::new(8, 11))
            .build()
            .with_source("gfx.idl", "typedef int IntPtr;");

        let (path, source) = err.extract_source().unwrap();
        assert_eq!(path.to_str().unwrap(), "gfx.idl");
        assert_eq!(source, "typedef int IntPtr;");
        assert_eq!(err.span(), Some(Span::new(8, 11)));
        assert!(matches!(err.root(), CompilerError::Resolution(_)));
    }

    #[test]
    fn multiple_errors() {
        let err = CompilerError::collect(vec![
            ResolutionError::undefined_type("A").into(),
            ResolutionError::undefined_type("B").into(),
        ])
        .unwrap();
        assert_eq!(err.message(), "2 errors occurred");
        assert_eq!(err.error_code().to_string(), "ETR1001");
        assert_eq!(err.flatten().len(), 2);
    }

    #[test]
    fn collect_single_and_empty() {
        assert!(CompilerError::collect(Vec::new()).is_none());

        let single = CompilerError::collect(vec![TypeDefError::duplicate_type("int").into()]);
        assert!(matches!(single, Some(CompilerError::TypeDef(_))));
    }

    #[test]
    fn report_renders_code() {
        use miette::Diagnostic;

        let err: CompilerError = ConversionError::unsupported("convert", "IntPtr").into();
        let report = err.to_report();
        assert_eq!(
            report.to_string(),
            "cannot convert 'IntPtr': typedefs must be resolved"
        );
        assert_eq!(
            report.code().map(|c| c.to_string()),
            Some("ECV2001".to_string())
        );
        assert_eq!(report.severity(), Some(miette::Severity::Error));
    }
}
