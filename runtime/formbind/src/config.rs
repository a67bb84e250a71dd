//! Binder settings.
use crate::request::BodySizeLimit;
use crate::tags::{FILTER_TAG, OPT_OUT_TAG};

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
/// The knobs of a [`Binder`](crate::Binder).
///
/// Every field has a default, so an empty document is a valid configuration.
pub struct BinderConfig {
    /// The tag that excludes a field from binding when set to `-`.
    pub opt_out_tag: String,
    /// The tag that names the filter applied to text fields.
    pub filter_tag: String,
    /// Form keys starting with this prefix are ignored (`_` by default, for CSRF
    /// tokens and similar). An empty prefix disables the check.
    pub reserved_prefix: String,
    /// The limit applied to bodies buffered for JSON or XML decoding.
    pub body_size_limit: BodySizeLimit,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            opt_out_tag: OPT_OUT_TAG.to_owned(),
            filter_tag: FILTER_TAG.to_owned(),
            reserved_prefix: "_".to_owned(),
            body_size_limit: BodySizeLimit::default(),
        }
    }
}

#[cfg(feature = "config")]
mod load {
    use std::path::Path;

    use anyhow::Context;
    use figment::{
        Figment,
        providers::{Env, Format, Yaml},
    };

    use super::BinderConfig;

    /// The prefix of the environment variables that override configuration values.
    ///
    /// Nested fields are separated by a double underscore, e.g.
    /// `FORMBIND_BODY_SIZE_LIMIT__MODE=disabled`.
    pub const ENV_PREFIX: &str = "FORMBIND_";

    impl BinderConfig {
        /// Load the configuration from an optional YAML file, overridden by
        /// `FORMBIND_`-prefixed environment variables.
        ///
        /// If `path` is provided, the file must exist.
        pub fn load(path: Option<&Path>) -> Result<Self, ConfigLoadError> {
            let span = tracing::debug_span!(
                "Loading binder configuration",
                configuration.path = ?path,
            );
            let _guard = span.enter();

            let mut figment = Figment::new();
            if let Some(path) = path {
                figment = figment.merge(Yaml::file_exact(path));
            }
            figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

            let configuration: BinderConfig = figment
                .extract()
                .context("Failed to load the binder configuration")
                .map_err(ConfigLoadError)?;
            Ok(configuration)
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error(transparent)]
    /// The error returned by [`BinderConfig::load`].
    pub struct ConfigLoadError(pub(super) anyhow::Error);
}

#[cfg(feature = "config")]
pub use load::{ConfigLoadError, ENV_PREFIX};
