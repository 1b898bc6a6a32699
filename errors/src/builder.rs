//! Type-enforced error builder for span attachment.
//!
//! Every error either carries an explicit span or is explicitly marked as
//! unlocated before it can be turned into a [`CompilerError`].
//!
//! ```
//! use extbind_errors::{ResolutionError, Span};
//!
//! let located = ResolutionError::undefined_type("int").at(Span::new(8, 11)).build();
//! let floating = ResolutionError::undefined_type("int").unlocated().build();
//! assert_eq!(located.span(), Some(Span::new(8, 11)));
//! assert_eq!(floating.span(), None);
//! ```

use crate::{CompilerError, Span};
use std::sync::Arc;

/// No span decision made yet.
pub struct Unspanned;

/// A span has been attached.
pub struct Spanned(pub(crate) Span);

/// Explicitly without location.
pub struct Unlocated;

/// Declaration source attached to an error for rich diagnostics.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: Arc<str>,
}

impl SourceContext {
    pub fn new(
        name: impl Into<String>,
        content: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Implemented for every domain error enum.
pub trait DomainError: Sized {
    /// Wraps the error in its [`CompilerError`] variant.
    fn into_compiler_error(self) -> CompilerError;

    /// Replaces the span carried by the error.
    fn with_span(
        self,
        span: Span,
    ) -> Self;
}

/// Builds a [`CompilerError`] once the span state `S` has been decided.
pub struct ErrorBuilder<S, E> {
    error: E,
    span_state: S,
    source: Option<SourceContext>,
}

impl<E: DomainError> ErrorBuilder<Unspanned, E> {
    /// Starts a builder with no span decision.
    pub fn new(error: E) -> Self {
        Self {
            error,
            span_state: Unspanned,
            source: None,
        }
    }

    /// Attach a span.
    pub fn at(
        self,
        span: impl Into<Span>,
    ) -> ErrorBuilder<Spanned, E> {
        ErrorBuilder {
            error: self.error,
            span_state: Spanned(span.into()),
            source: self.source,
        }
    }

    /// Attach an optional span, marking the error unlocated on `None`.
    pub fn at_opt(
        self,
        span: Option<Span>,
    ) -> CompilerError {
        match span {
            Some(s) => self.at(s).build(),
            None => self.unlocated().build(),
        }
    }

    /// Explicitly mark as having no location.
    pub fn unlocated(self) -> ErrorBuilder<Unlocated, E> {
        ErrorBuilder {
            error: self.error,
            span_state: Unlocated,
            source: self.source,
        }
    }
}

impl<E: DomainError> ErrorBuilder<Spanned, E> {
    /// Attach the declaration source for rendering.
    pub fn in_source(
        mut self,
        source: &SourceContext,
    ) -> Self {
        self.source = Some(source.clone());
        self
    }

    /// Build the error, wrapping it in `WithSource` when a source is attached.
    pub fn build(self) -> CompilerError {
        let err = self.error.with_span(self.span_state.0);
        let mut result = err.into_compiler_error();

        if let Some(source) = self.source {
            result = CompilerError::WithSource {
                inner: Box::new(result),
                path: source.name.into(),
                source: Arc::new(source.content.to_string()),
            };
        }

        result
    }
}

impl<E: DomainError> ErrorBuilder<Unlocated, E> {
    /// Build the error without a span.
    pub fn build(self) -> CompilerError {
        self.error.into_compiler_error()
    }
}
