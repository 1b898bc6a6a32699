//! Type descriptors for native extension bindings.
//!
//! A [`TypeRegistry`] maps type names to [`Descriptor`]s. Typedefs are
//! registered as [`AliasDescriptor`]s and resolved on demand, through any
//! number of intermediate typedefs, to a concrete descriptor:
//!
//! ```
//! use extbind_types::{NativeType, TypeRegistry};
//!
//! let registry = TypeRegistry::with_builtins();
//! registry.declare_alias("IntPtr", "int").unwrap();
//!
//! let alias = registry.lookup("IntPtr").unwrap();
//! assert_eq!(alias.native_type().unwrap(), NativeType::Int32);
//! assert!(alias.convert(&[42], 0).is_err());
//! assert!(alias.resolve().unwrap().convert(&[42], 0).is_ok());
//! ```

mod alias;
pub mod config;
mod descriptor;
mod native;
pub mod registry;

pub use crate::{
    alias::AliasDescriptor,
    config::ResolveConfig,
    descriptor::{Descriptor, PointerDescriptor, PrimitiveDescriptor},
    native::{NativeType, Value},
    registry::TypeRegistry,
};

pub type Result<T> = extbind_errors::Result<T>;
