//! Environment variable source: XBEL_IMPORT__* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

pub const ENV_PREFIX: &str = "XBEL_IMPORT";
pub const ENV_SEPARATOR: &str = "__";

/// Add environment variable overlay to builder.
/// Nested keys use the separator too, e.g. `XBEL_IMPORT__LOGGING__LEVEL=debug`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    ))
}

/// Config keys currently overridden from the environment, lower-cased and
/// dot-joined the way the `config` crate sees them.
pub fn overridden_keys() -> Vec<String> {
    let prefix = format!("{}{}", ENV_PREFIX, ENV_SEPARATOR);
    let mut keys: Vec<String> = std::env::vars()
        .filter_map(|(name, _)| {
            name.strip_prefix(&prefix)
                .map(|key| key.to_lowercase().replace(ENV_SEPARATOR, "."))
        })
        .collect();
    keys.sort();
    keys
}
