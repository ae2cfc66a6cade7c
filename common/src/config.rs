use serde::de::DeserializeOwned;

/// The prefix for environment variable overrides, i.e. `CAD_LOG_LEVEL`
/// overrides the `log_level` field.
pub const ENV_PREFIX: &str = "CAD";

/// Loads a config struct from an optional file layered with environment
/// variables. The file is looked up by name with any supported extension
/// and is not required to exist; environment variables always win.
pub fn parse<C: DeserializeOwned>(config_file: &str) -> anyhow::Result<C> {
    let mut builder = config::Config::builder();

    if !config_file.is_empty() {
        builder = builder.add_source(config::File::with_name(config_file).required(false));
    }

    let config = builder
        .add_source(config::Environment::with_prefix(ENV_PREFIX))
        .build()?
        .try_deserialize()?;

    Ok(config)
}
