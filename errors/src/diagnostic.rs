//! miette integration for rendering compiler errors.

use crate::{ErrorCode, Span};
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::Path;

/// A diagnostic with optional source span, ready for miette rendering.
#[derive(Debug)]
pub struct SpanDiagnostic {
    code: String,
    message: String,
    src: Option<NamedSource<String>>,
    span: Option<SourceSpan>,
    help: Option<String>,
    related: Vec<SpanDiagnostic>,
}

impl SpanDiagnostic {
    pub fn new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            src: None,
            span: None,
            help: None,
            related: Vec::new(),
        }
    }

    pub fn with_source(
        mut self,
        path: impl AsRef<Path>,
        source: impl Into<String>,
    ) -> Self {
        self.src = Some(NamedSource::new(
            path.as_ref().display().to_string(),
            source.into(),
        ));
        self
    }

    pub fn with_span(
        mut self,
        span: Span,
    ) -> Self {
        self.span = Some(span.into());
        self
    }

    pub fn with_help(
        mut self,
        help: impl Into<String>,
    ) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn with_related(
        mut self,
        related: Vec<SpanDiagnostic>,
    ) -> Self {
        self.related = related;
        self
    }
}

impl std::fmt::Display for SpanDiagnostic {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SpanDiagnostic {}

impl Diagnostic for SpanDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(&self.code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.src
            .as_ref()
            .map(|s| s as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        let span = self.span?;
        Some(Box::new(std::iter::once(
            miette::LabeledSpan::new_with_span(Some(self.message.clone()), span),
        )))
    }

    fn related<'a>(&'a self) -> Option<Box<dyn Iterator<Item = &'a dyn Diagnostic> + 'a>> {
        if self.related.is_empty() {
            return None;
        }
        Some(Box::new(
            self.related
                .iter()
                .map(|d| d as &dyn Diagnostic),
        ))
    }
}

/// Collects the parts of a diagnostic before building it.
pub struct DiagnosticBuilder {
    code: ErrorCode,
    message: String,
    help: Option<String>,
    span: Option<Span>,
    path: Option<std::path::PathBuf>,
    source: Option<String>,
    related: Vec<SpanDiagnostic>,
}

impl DiagnosticBuilder {
    pub fn new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            help: None,
            span: None,
            path: None,
            source: None,
            related: Vec::new(),
        }
    }

    pub fn help_opt(
        mut self,
        help: Option<&'static str>,
    ) -> Self {
        self.help = help.map(String::from);
        self
    }

    pub fn span_opt(
        mut self,
        span: Option<Span>,
    ) -> Self {
        self.span = span;
        self
    }

    pub fn source(
        mut self,
        path: impl Into<std::path::PathBuf>,
        source: impl Into<String>,
    ) -> Self {
        self.path = Some(path.into());
        self.source = Some(source.into());
        self
    }

    pub fn related(
        mut self,
        related: Vec<SpanDiagnostic>,
    ) -> Self {
        self.related = related;
        self
    }

    pub fn build(self) -> SpanDiagnostic {
        let mut diag = SpanDiagnostic::new(self.code, self.message)
            .with_related(self.related);

        if let (Some(path), Some(source)) = (self.path, self.source) {
            diag = diag.with_source(path, source);
        }

        if let Some(span) = self.span {
            diag = diag.with_span(span);
        }

        if let Some(help) = self.help {
            diag = diag.with_help(help);
        }

        diag
    }

    pub fn into_report(self) -> miette::Report {
        miette::Report::new(self.build())
    }
}
