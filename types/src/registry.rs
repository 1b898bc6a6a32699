use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, Weak},
};

use extbind_errors::{CompilerError, InternalError, ResolutionError, TypeDefError};

use crate::{AliasDescriptor, Descriptor, PointerDescriptor, PrimitiveDescriptor, ResolveConfig};

struct RegistryInner {
    types: Mutex<BTreeMap<String, Descriptor>>,
    config: ResolveConfig,
}

/// The module-wide table mapping type names to descriptors.
///
/// Cloning is cheap and every clone refers to the same table.
#[derive(Clone)]
pub struct TypeRegistry {
    inner: Arc<RegistryInner>,
}

/// Non-owning handle held by typedefs stored inside the registry.
#[derive(Clone)]
pub struct WeakRegistry {
    inner: Weak<RegistryInner>,
}

impl WeakRegistry {
    pub fn upgrade(&self) -> Option<TypeRegistry> {
        self.inner
            .upgrade()
            .map(|inner| TypeRegistry { inner })
    }

    pub fn ptr_eq(
        &self,
        other: &Self,
    ) -> bool {
        self.inner.ptr_eq(&other.inner)
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::with_config(ResolveConfig::default())
    }

    pub fn with_config(config: ResolveConfig) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                types: Mutex::default(),
                config,
            }),
        }
    }

    /// A registry pre-populated with [`PrimitiveDescriptor::builtins`].
    pub fn with_builtins() -> Self {
        Self::with_config_and_builtins(ResolveConfig::default())
    }

    pub fn with_config_and_builtins(config: ResolveConfig) -> Self {
        let types = PrimitiveDescriptor::builtins()
            .into_iter()
            .map(|p| (p.name().to_string(), Descriptor::Primitive(p)))
            .collect();

        Self {
            inner: Arc::new(RegistryInner {
                types: Mutex::new(types),
                config,
            }),
        }
    }

    pub fn config(&self) -> &ResolveConfig {
        &self.inner.config
    }

    pub fn downgrade(&self) -> WeakRegistry {
        WeakRegistry {
            inner: Arc::downgrade(&self.inner),
        }
    }

    fn with_lock<F, R>(
        &self,
        f: F,
    ) -> crate::Result<R>
    where
        F: FnOnce(&BTreeMap<String, Descriptor>) -> R, {
        self.inner
            .types
            .lock()
            .map(|guard| f(&guard))
            .map_err(|_| {
                InternalError::internal("type registry lock poisoned")
                    .unlocated()
                    .build()
            })
    }

    fn with_lock_mut<F, R>(
        &self,
        f: F,
    ) -> crate::Result<R>
    where
        F: FnOnce(&mut BTreeMap<String, Descriptor>) -> R, {
        self.inner
            .types
            .lock()
            .map(|mut guard| f(&mut guard))
            .map_err(|_| {
                InternalError::internal("type registry lock poisoned")
                    .unlocated()
                    .build()
            })
    }

    fn is_valid_name(name: &str) -> bool {
        !name.is_empty()
            && !name
                .chars()
                .any(|c| c.is_whitespace() || c == '*')
    }

    /// Registers `descriptor` under `name`.
    pub fn register(
        &self,
        name: impl Into<String>,
        descriptor: impl Into<Descriptor>,
    ) -> crate::Result<()> {
        let name = name.into();
        let descriptor = descriptor.into();
        let span = match &descriptor {
            Descriptor::Alias(alias) => alias.span(),
            _ => None,
        };

        if !Self::is_valid_name(&name) {
            return Err(TypeDefError::invalid_name(name).at_opt(span));
        }

        self.with_lock_mut(|types| {
            if types.contains_key(&name) {
                return Err(TypeDefError::duplicate_type(&name).at_opt(span));
            }
            tracing::trace!(target: "type-registry", %name, kind = %descriptor.type_name(), "registered");
            types.insert(name, descriptor);
            Ok(())
        })?
    }

    /// Declares `name` as a typedef of `target`.
    ///
    /// The target does not have to be registered yet.
    pub fn declare_alias(
        &self,
        name: impl Into<String>,
        target: impl Into<String>,
    ) -> crate::Result<()> {
        let name = name.into();
        let alias = AliasDescriptor::new(self, name.clone(), target);
        self.register(name, alias)
    }

    /// Like [`Self::declare_alias`] for a typedef declared at `span`.
    pub fn declare_alias_at(
        &self,
        name: impl Into<String>,
        target: impl Into<String>,
        span: impl Into<extbind_errors::Span>,
    ) -> crate::Result<()> {
        let name = name.into();
        let alias = AliasDescriptor::new(self, name.clone(), target).with_span(span);
        self.register(name, alias)
    }

    /// Looks `name` up, treating each trailing `*` as one level of pointer.
    pub fn try_lookup(
        &self,
        name: &str,
    ) -> crate::Result<Option<Descriptor>> {
        let mut base = name.trim();
        let mut depth = 0;
        while let Some(rest) = base.strip_suffix('*') {
            base = rest.trim_end();
            depth += 1;
        }

        let found = self.with_lock(|types| types.get(base).cloned())?;

        Ok(found.map(|descriptor| {
            (0..depth).fold(descriptor, |pointee, _| {
                PointerDescriptor::new(pointee).into()
            })
        }))
    }

    /// Looks `name` up, returning `None` when it is not registered.
    /// Looks a name up, folding failures into `None`.
    ///
    /// A poisoned lock is logged as an error; use [`Self::try_lookup`] to
    /// observe it.
    pub fn lookup(
        &self,
        name: &str,
    ) -> Option<Descriptor> {
        or_logged(self.try_lookup(name), "lookup")
    }

    pub fn contains(
        &self,
        name: &str,
    ) -> bool {
        self.lookup(name).is_some()
    }

    /// Registered names in order. Empty if the lock is poisoned.
    pub fn names(&self) -> Vec<String> {
        or_logged(
            self.with_lock(|types| types.keys().cloned().collect()),
            "names",
        )
    }

    pub fn len(&self) -> usize {
        or_logged(self.with_lock(|types| types.len()), "len")
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolves the type registered as `name` down to a concrete descriptor.
    #[tracing::instrument(level = "TRACE", target = "type-registry", skip(self))]
    pub fn resolve(
        &self,
        name: &str,
    ) -> crate::Result<Descriptor> {
        self.try_lookup(name)?
            .ok_or_else(|| {
                ResolutionError::undefined_type(name)
                    .unlocated()
                    .build()
            })?
            .resolve()
    }

    /// Resolves every registered type, each chain with its own trail.
    ///
    /// All failures are reported together.
    pub fn resolve_all(&self) -> crate::Result<BTreeMap<String, Descriptor>> {
        let snapshot = self.with_lock(|types| types.clone())?;
        tracing::debug!(target: "type-registry", count = snapshot.len(), "resolve_all: starting");

        let mut resolved = BTreeMap::new();
        let mut errors = Vec::new();

        for (name, descriptor) in snapshot {
            match descriptor.resolve() {
                Ok(concrete) => {
                    resolved.insert(name, concrete);
                },
                Err(err) => {
                    tracing::debug!(target: "type-registry", %name, error = %err, "resolve_all: failed");
                    errors.push(err);
                },
            }
        }

        match CompilerError::collect(errors) {
            Some(err) => Err(err),
            None => {
                tracing::debug!(target: "type-registry", "resolve_all: complete");
                Ok(resolved)
            },
        }
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn or_logged<T: Default>(
    result: crate::Result<T>,
    operation: &str,
) -> T {
    result.unwrap_or_else(|err| {
        tracing::error!(target: "type-registry", %err, operation, "type registry unavailable");
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use extbind_errors::Span;

    use super::*;
    use crate::NativeType;

    fn registry() -> TypeRegistry {
        extbind_testing::logging();
        TypeRegistry::with_builtins()
    }

    fn int() -> Descriptor {
        PrimitiveDescriptor::new("int", NativeType::Int32).into()
    }

    #[test]
    fn builtins_are_registered() {
        let registry = registry();
        for builtin in PrimitiveDescriptor::builtins() {
            assert_eq!(
                registry.lookup(builtin.name()),
                Some(Descriptor::Primitive(builtin.clone()))
            );
        }
        assert!(TypeRegistry::new().is_empty());
    }

    #[test]
    fn lookup_of_unknown_name_is_none() {
        let registry = registry();
        assert_eq!(registry.lookup("size_t"), None);
        assert!(!registry.contains("size_t"));
    }

    #[test_case::test_case("int*", 1; "single")]
    #[test_case::test_case("int **", 2; "double")]
    #[test_case::test_case(" int * * * ", 3; "spaced triple")]
    fn pointer_suffixes_wrap_the_base(
        name: &str,
        depth: usize,
    ) {
        let registry = registry();
        let mut found = registry.lookup(name).unwrap();
        for _ in 0..depth {
            assert_eq!(found.native_type().unwrap(), NativeType::Pointer);
            found = match found {
                Descriptor::Pointer(p) => p.pointee().clone(),
                other => panic!("expected pointer, got {other:?}"),
            };
        }
        assert_eq!(found, int());
    }

    #[test]
    fn pointer_to_unknown_type_is_none() {
        assert_eq!(registry().lookup("size_t*"), None);
    }

    #[test]
    fn duplicate_registration_fails() {
        let registry = registry();
        let err = registry
            .register("int", PrimitiveDescriptor::new("int", NativeType::Int64))
            .unwrap_err();
        assert_eq!(err, CompilerError::TypeDef(TypeDefError::duplicate_type("int")));
        assert_eq!(registry.lookup("int"), Some(int()));
    }

    #[test]
    fn duplicate_alias_points_at_its_declaration() {
        let registry = registry();
        let err = registry
            .declare_alias_at("int", "long", 30..33)
            .unwrap_err();
        assert_eq!(err.span(), Some(Span::new(30, 33)));
    }

    #[test_case::test_case(""; "empty")]
    #[test_case::test_case("unsigned int"; "whitespace")]
    #[test_case::test_case("int*"; "pointer")]
    fn invalid_names_are_rejected(name: &str) {
        let err = registry()
            .declare_alias(name, "int")
            .unwrap_err();
        assert_eq!(err.error_code().to_string(), "ETY0001");
    }

    #[test]
    fn resolve_follows_chain_to_concrete() {
        let registry = registry();
        registry.declare_alias("A", "B").unwrap();
        registry.declare_alias("B", "C").unwrap();
        registry
            .register("C", PrimitiveDescriptor::new("C", NativeType::Float64))
            .unwrap();

        let c = registry.lookup("C").unwrap();
        let resolved = registry.resolve("A").unwrap();
        assert_eq!(resolved, c);
        assert!(!resolved.is_alias());
        assert_eq!(
            registry.lookup("A").unwrap().native_type().unwrap(),
            c.native_type().unwrap()
        );
    }

    #[test]
    fn resolve_is_idempotent() {
        let registry = registry();
        registry.declare_alias("Count", "Size").unwrap();
        registry.declare_alias("Size", "long").unwrap();

        let first = registry.resolve("Count").unwrap();
        let second = registry.resolve("Count").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn resolving_unknown_name_fails() {
        let err = registry()
            .resolve("Widget")
            .unwrap_err();
        assert_eq!(
            err,
            CompilerError::Resolution(ResolutionError::undefined_type("Widget"))
        );
    }

    #[test]
    fn two_step_cycle_is_circular() {
        let registry = registry();
        registry.declare_alias("A", "B").unwrap();
        registry.declare_alias("B", "A").unwrap();

        let err = registry.resolve("A").unwrap_err();
        assert_eq!(
            err,
            CompilerError::Resolution(ResolutionError::circular_definition("A"))
        );
    }

    #[test]
    fn self_reference_is_circular() {
        let registry = registry();
        registry.declare_alias("Loop", "Loop").unwrap();

        let err = registry.resolve("Loop").unwrap_err();
        assert_eq!(
            err,
            CompilerError::Resolution(ResolutionError::circular_definition("Loop"))
        );
        extbind_testing::assert_snapshot!(err.message(), @"circular definition of 'Loop'");
    }

    #[test]
    fn typedef_to_pointer_resolves_to_pointer() {
        let registry = registry();
        registry.declare_alias("IntPtr", "int*").unwrap();

        let resolved = registry.resolve("IntPtr").unwrap();
        assert_eq!(resolved, PointerDescriptor::new(int()).into());
        assert_eq!(resolved.to_string(), "int*");
    }

    #[test]
    fn later_registrations_are_observed() {
        let registry = registry();
        registry.declare_alias("Color", "Rgb").unwrap();
        assert!(registry.resolve("Color").is_err());

        registry
            .register("Rgb", PrimitiveDescriptor::new("Rgb", NativeType::Int32))
            .unwrap();
        assert_eq!(
            registry
                .resolve("Color")
                .unwrap()
                .type_name(),
            "Rgb"
        );
    }

    #[test]
    fn resolve_all_collects_every_failure() {
        let registry = registry();
        registry.declare_alias("Good", "int").unwrap();
        registry.declare_alias("Missing", "size_t").unwrap();
        registry.declare_alias("Loop", "Loop").unwrap();

        let err = registry.resolve_all().unwrap_err();
        let mut messages: Vec<_> = err
            .flatten()
            .iter()
            .map(|e| e.message())
            .collect();
        messages.sort();
        assert_eq!(
            messages,
            vec![
                "circular definition of 'Loop'".to_string(),
                "unknown type: 'size_t'".to_string(),
            ]
        );
    }

    #[test]
    fn resolve_all_returns_concrete_descriptors() {
        let registry = registry();
        registry.declare_alias("Good", "int").unwrap();
        registry.declare_alias("Better", "Good").unwrap();

        let resolved = registry.resolve_all().unwrap();
        assert_eq!(resolved.len(), registry.len());
        assert_eq!(resolved["Better"], int());
        assert!(resolved.values().all(|d| !d.is_alias()));
    }

    #[test]
    fn concurrent_resolution_shares_the_registry() {
        let registry = registry();
        for i in 0..16 {
            let target = if i == 0 { "int".to_string() } else { format!("T{}", i - 1) };
            registry
                .declare_alias(format!("T{i}"), target)
                .unwrap();
        }

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| registry.resolve("T15")))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap().unwrap(), int());
            }
        });
    }

    #[test]
    fn poisoned_lock_is_an_internal_error() {
        let registry = registry();
        registry.declare_alias("IntPtr", "int").unwrap();

        let holder = registry.clone();
        let poisoned = std::thread::spawn(move || {
            let _: crate::Result<()> =
                holder.with_lock_mut(|_| panic!("panicked while holding the lock"));
        })
        .join();
        assert!(poisoned.is_err());

        let err = registry.try_lookup("int").unwrap_err();
        assert!(matches!(err, CompilerError::Internal(_)));
        assert!(matches!(
            registry.resolve("IntPtr").unwrap_err(),
            CompilerError::Internal(_)
        ));

        assert_eq!(registry.lookup("int"), None);
        assert!(registry.names().is_empty());
        assert_eq!(registry.len(), 0);
    }
}
