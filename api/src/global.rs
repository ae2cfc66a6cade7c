use std::sync::Arc;

use tokio::sync::broadcast;

use crate::config::AppConfig;
use crate::store::postgres::PgStore;

pub struct GlobalState {
    pub config: AppConfig,
    pub db: Arc<sqlx::PgPool>,
    pub store: PgStore,
    /// Fired once at shutdown; long-lived tasks subscribe and drain.
    pub shutdown: broadcast::Sender<()>,
}

impl GlobalState {
    pub fn new(config: AppConfig, db: Arc<sqlx::PgPool>) -> Self {
        let (shutdown, _) = broadcast::channel(1);

        Self {
            config,
            store: PgStore::new(db.clone()),
            db,
            shutdown,
        }
    }
}
