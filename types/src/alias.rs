use std::{collections::HashSet, fmt::Display};

use extbind_errors::{ConversionError, ResolutionError, Span};

use crate::{Descriptor, NativeType, TypeRegistry, Value, registry::WeakRegistry};

/// A typedef: a named reference to another type that must be resolved
/// through the registry before it can be used.
///
/// Nothing is cached. Every resolution walks the chain again against the
/// registry's current contents, so typedefs declared before their targets
/// start resolving once the targets are registered.
#[derive(Clone)]
pub struct AliasDescriptor {
    alias_name: String,
    target_name: String,
    registry: WeakRegistry,
    span: Option<Span>,
}

impl AliasDescriptor {
    pub fn new(
        registry: &TypeRegistry,
        alias_name: impl Into<String>,
        target_name: impl Into<String>,
    ) -> Self {
        Self {
            alias_name: alias_name.into(),
            target_name: target_name.into(),
            registry: registry.downgrade(),
            span: None,
        }
    }

    /// Records where the typedef was declared so errors can point at it.
    pub fn with_span(
        mut self,
        span: impl Into<Span>,
    ) -> Self {
        self.span = Some(span.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.alias_name
    }

    pub fn target(&self) -> &str {
        &self.target_name
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }

    fn registry(&self) -> crate::Result<TypeRegistry> {
        self.registry
            .upgrade()
            .ok_or_else(|| {
                ResolutionError::registry_unavailable(&self.alias_name).at_opt(self.span)
            })
    }

    /// Follows this typedef one link: looks the target up and records this
    /// typedef in `visited`.
    fn step(
        &self,
        visited: &mut HashSet<String>,
    ) -> crate::Result<Descriptor> {
        let target = self
            .registry()?
            .try_lookup(&self.target_name)?
            .ok_or_else(|| ResolutionError::undefined_type(&self.target_name).at_opt(self.span))?;

        if visited.contains(&self.alias_name) {
            return Err(ResolutionError::circular_definition(&self.alias_name).at_opt(self.span));
        }
        visited.insert(self.alias_name.clone());

        tracing::trace!(
            target: "type-registry",
            alias = %self.alias_name,
            to = %self.target_name,
            "followed typedef"
        );

        Ok(target)
    }

    /// Resolves the chain starting at this typedef.
    ///
    /// `visited` holds the typedef names already followed in the current
    /// chain and is extended in place; pass a fresh set per independent
    /// chain. Chains longer than the registry's `max_alias_depth` fail.
    pub fn resolve_with(
        &self,
        visited: &mut HashSet<String>,
    ) -> crate::Result<Descriptor> {
        let limit = self
            .registry()?
            .config()
            .max_alias_depth;

        let mut next = self.step(visited)?;
        let mut depth = 1;
        let mut exceeded = false;

        // Past the limit the walk goes on so that a cycle is still reported
        // as one. It stays finite: every step adds a new name to `visited`.
        loop {
            match next {
                Descriptor::Alias(alias) => {
                    exceeded |= depth >= limit;
                    depth += 1;
                    next = alias.step(visited)?;
                },
                _ if exceeded => {
                    return Err(
                        ResolutionError::depth_exceeded(&self.alias_name, limit).at_opt(self.span)
                    );
                },
                concrete => return concrete.resolve_with(visited),
            }
        }
    }

    pub fn resolve(&self) -> crate::Result<Descriptor> {
        self.resolve_with(&mut HashSet::new())
    }

    pub fn native_type(&self) -> crate::Result<NativeType> {
        self.resolve()?.native_type()
    }

    /// Always fails: only a resolved descriptor can convert arguments.
    pub fn convert(
        &self,
        _args: &[i32],
        _offset: usize,
    ) -> crate::Result<Value> {
        Err(ConversionError::unsupported("convert", &self.alias_name).at_opt(self.span))
    }

    /// Diagnostic rendering, resolved with a fresh trail every time.
    pub fn describe(&self) -> crate::Result<String> {
        Ok(format!("name = {}", self.resolve()?))
    }
}

impl Display for AliasDescriptor {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self.describe() {
            Ok(text) => f.write_str(&text),
            Err(err) => write!(f, "name = <unresolved: {err}>"),
        }
    }
}

impl std::fmt::Debug for AliasDescriptor {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("AliasDescriptor")
            .field("alias_name", &self.alias_name)
            .field("target_name", &self.target_name)
            .field("span", &self.span)
            .finish_non_exhaustive()
    }
}

impl PartialEq for AliasDescriptor {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.alias_name == other.alias_name
            && self.target_name == other.target_name
            && self.span == other.span
            && self.registry.ptr_eq(&other.registry)
    }
}
