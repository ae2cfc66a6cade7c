use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use common::{logging, signal};
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;
use tokio::select;
use tokio::signal::unix::SignalKind;

mod api;
mod config;
mod database;
mod global;
mod social;
mod store;

#[cfg(test)]
mod tests;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::AppConfig::parse()?;

    logging::init(&config.log_level, config.log_json)?;

    tracing::debug!("config: {:#?}", config);

    let db = Arc::new(
        sqlx::PgPool::connect_with(
            PgConnectOptions::from_str(&config.database_url)?
                .disable_statement_logging()
                .to_owned(),
        )
        .await?,
    );

    sqlx::migrate!("./migrations").run(&*db).await?;

    let global = Arc::new(global::GlobalState::new(config, db));

    let api_future = tokio::spawn(api::run(global.clone()));

    // Listen on both sigint and sigterm, shut down when either is received
    let mut signal_handler = signal::SignalHandler::new()
        .with_signal(SignalKind::interrupt())
        .with_signal(SignalKind::terminate());

    select! {
        r = api_future => tracing::error!("api stopped unexpectedly: {:?}", r),
        _ = signal_handler.recv() => {
            tracing::info!("shutting down");
            global.shutdown.send(()).ok();
        },
    }

    Ok(())
}
