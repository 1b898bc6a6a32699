use extbind_errors::{CompilerError, ConversionError, ResolutionError, SourceContext};
use extbind_types::{
    Descriptor, NativeType, PrimitiveDescriptor, ResolveConfig, TypeRegistry, Value,
};

fn registry() -> TypeRegistry {
    extbind_testing::logging();
    TypeRegistry::with_builtins()
}

#[test]
fn int_ptr_resolves_to_int() {
    let registry = registry();
    registry.declare_alias("IntPtr", "int").unwrap();

    let alias = registry.lookup("IntPtr").unwrap();
    assert!(alias.is_alias());

    let resolved = alias.resolve().unwrap();
    assert_eq!(resolved, registry.lookup("int").unwrap());
    assert_eq!(alias.native_type().unwrap().to_string(), "int32");
}

#[test]
fn chain_matches_the_concrete_end() {
    let registry = registry();
    registry.declare_alias("A", "B").unwrap();
    registry.declare_alias("B", "C").unwrap();
    registry
        .register("C", PrimitiveDescriptor::new("C", NativeType::Int64))
        .unwrap();

    let a = registry.lookup("A").unwrap();
    let c = registry.lookup("C").unwrap();
    assert_eq!(a.resolve().unwrap(), c.resolve().unwrap());
    assert_eq!(a.native_type().unwrap(), c.native_type().unwrap());

    // converting goes through the resolved descriptor only
    assert_eq!(
        a.resolve()
            .unwrap()
            .convert(&[5, 0], 0)
            .unwrap(),
        Value::Int64(5)
    );
}

#[test]
fn convert_on_any_typedef_fails() {
    let registry = registry();
    registry.declare_alias("Good", "int").unwrap();
    registry.declare_alias("Broken", "missing").unwrap();
    registry.declare_alias("Loop", "Loop").unwrap();

    for name in ["Good", "Broken", "Loop"] {
        let err = registry
            .lookup(name)
            .unwrap()
            .convert(&[0; 4], 0)
            .unwrap_err();
        assert_eq!(
            err,
            CompilerError::Conversion(ConversionError::unsupported("convert", name))
        );
    }
}

#[test]
fn loop_names_itself() {
    let registry = registry();
    registry.declare_alias("Loop", "Loop").unwrap();

    let err = registry
        .lookup("Loop")
        .unwrap()
        .resolve()
        .unwrap_err();
    assert_eq!(
        err,
        CompilerError::Resolution(ResolutionError::circular_definition("Loop"))
    );
}

#[test]
fn report_points_at_the_declaration() {
    let source = "typedef size_t Size;";
    let registry = registry();
    registry
        .declare_alias_at("Size", "size_t", 8..14)
        .unwrap();

    let err = registry
        .resolve("Size")
        .unwrap_err()
        .with_source("gfx.idl", source);

    let rendered = format!("{:?}", err.to_report());
    assert!(rendered.contains("ETR1001"));
    assert!(rendered.contains("unknown type: 'size_t'"));

    let context = SourceContext::new("gfx.idl", source);
    let located = ResolutionError::undefined_type("size_t")
        .at(err.span().unwrap())
        .in_source(&context)
        .build();
    assert_eq!(located, err);
}

#[test]
fn configured_depth_applies_to_every_typedef() {
    extbind_testing::logging();
    let config = ResolveConfig::from_toml("max_alias_depth = 3").unwrap();
    let registry = TypeRegistry::with_config_and_builtins(config);
    for (name, target) in [("L1", "int"), ("L2", "L1"), ("L3", "L2"), ("L4", "L3")] {
        registry.declare_alias(name, target).unwrap();
    }

    let err = registry.resolve_all().unwrap_err();
    assert_eq!(
        err,
        CompilerError::Resolution(ResolutionError::depth_exceeded("L4", 3))
    );
    assert!(matches!(
        registry.resolve("L3").unwrap(),
        Descriptor::Primitive(_)
    ));
}
