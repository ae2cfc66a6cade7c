use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber. `level` is an env-filter
/// directive string, e.g. `info` or `api=debug,info`. Calling this twice
/// is an error.
pub fn init(level: &str, json: bool) -> Result<()> {
    let env_filter = EnvFilter::try_new(level)?;

    let builder = tracing_subscriber::fmt()
        .with_file(true)
        .with_line_number(true)
        .with_env_filter(env_filter);

    if json {
        builder.json().try_init()
    } else {
        builder.pretty().try_init()
    }
    .map_err(|err| anyhow::anyhow!("failed to set global subscriber: {err}"))
}
