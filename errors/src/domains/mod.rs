mod config;
mod conversion;
mod internal;
mod resolution;
mod type_def;

pub use config::ConfigError;
pub use conversion::ConversionError;
pub use internal::InternalError;
pub use resolution::ResolutionError;
pub use type_def::TypeDefError;

impl_domain_error!(ConfigError => Config);
impl_domain_error!(ConversionError => Conversion);
impl_domain_error!(InternalError => Internal);
impl_domain_error!(ResolutionError => Resolution);
impl_domain_error!(TypeDefError => TypeDef);
