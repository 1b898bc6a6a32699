use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File, FileFormat};
use extbind_errors::ConfigError;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Settings that govern typedef resolution.
///
/// Read from `extbind.toml` (optional) and overlaid by `EXTBIND_*`
/// environment variables.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Validate)]
#[serde(default)]
pub struct ResolveConfig {
    /// Longest typedef chain a single resolution may follow.
    #[validate(range(min = 1, max = 4096))]
    pub max_alias_depth: usize,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            max_alias_depth: 256,
        }
    }
}

impl ResolveConfig {
    pub const NAME: &'static str = "extbind.toml";
    pub const ENV_PREFIX: &'static str = "EXTBIND";

    pub fn path<S: AsRef<Path>>(dir: S) -> PathBuf {
        dir.as_ref().join(Self::NAME)
    }

    /// Loads from `dir` (the working directory when `None`) and the process environment.
    pub fn load<S: AsRef<Path>>(dir: Option<S>) -> crate::Result<Self> {
        Self::load_with_env(dir, None)
    }

    /// Like [`Self::load`] with an explicit environment in place of the process one.
    pub fn load_with_env<S: AsRef<Path>>(
        dir: Option<S>,
        env: Option<::config::Map<String, String>>,
    ) -> crate::Result<Self> {
        let file = match dir {
            Some(dir) => Self::path(dir),
            None => Self::path("./"),
        };
        let origin = file.display().to_string();

        tracing::debug!(path = %origin, "loading resolve config");

        let this: Self = Config::builder()
            .add_source(File::from(file).required(false))
            .add_source(
                Environment::with_prefix(Self::ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| {
                ConfigError::load(&origin, e)
                    .unlocated()
                    .build()
            })?;

        this.checked(&origin)
    }

    /// Parses TOML text directly.
    pub fn from_toml(src: &str) -> crate::Result<Self> {
        let this: Self = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| {
                ConfigError::load("<inline>", e)
                    .unlocated()
                    .build()
            })?;

        this.checked("<inline>")
    }

    fn checked(
        self,
        origin: &str,
    ) -> crate::Result<Self> {
        self.validate().map_err(|e| {
            ConfigError::invalid(origin, e)
                .unlocated()
                .build()
        })?;
        Ok(self)
    }
}
