use std::str::FromStr;

use snafu::ResultExt;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::{info, instrument};

use crate::{
    Result, SqliteSettings,
    error::{ConnectionSnafu, MigrateSnafu},
};

#[derive(Debug, Clone)]
pub struct SqliteAdapter {
    pub(crate) pool: SqlitePool,
}

impl SqliteAdapter {
    #[instrument]
    pub async fn new(settings: &SqliteSettings) -> Result<SqliteAdapter> {
        let pool = if settings.is_in_memory() {
            let opts =
                SqliteConnectOptions::from_str("sqlite::memory:").context(ConnectionSnafu)?;
            // The database lives as long as its single connection.
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(opts)
                .await
                .context(ConnectionSnafu)?
        } else {
            let opts = SqliteConnectOptions::new()
                .filename(&settings.path)
                .create_if_missing(true);
            SqlitePoolOptions::new()
                .max_connections(settings.max_connections.max(1))
                .connect_with(opts)
                .await
                .context(ConnectionSnafu)?
        };

        info!(path = %settings.path, "opened database");

        Ok(SqliteAdapter { pool })
    }

    pub async fn do_migrations(&self) -> Result<()> {
        sqlx::migrate!()
            .run(&self.pool)
            .await
            .context(MigrateSnafu)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
