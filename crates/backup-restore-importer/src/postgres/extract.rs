use async_trait::async_trait;
use backup_restore_settings::DBSettings;
use sqlx::{
    Connection,
    postgres::{PgConnectOptions, PgConnection},
};
use tracing::info;

use crate::error::RunError;

pub const ALIVE_SSNS_QUERY: &str = "SELECT ssn FROM criminal_records WHERE status = 'alive'";

/// Reads the answer out of the restored database.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Identifiers in the order the database returns them.
    async fn alive_identifiers(&self, db: &DBSettings) -> Result<Vec<String>, RunError>;
}

/// Queries PostgreSQL directly rather than going through the CLI client.
pub struct PgExtractor;

#[async_trait]
impl Extractor for PgExtractor {
    async fn alive_identifiers(&self, db: &DBSettings) -> Result<Vec<String>, RunError> {
        let options = PgConnectOptions::new()
            .host(&db.host)
            .port(db.port)
            .username(&db.user)
            .password(&db.password)
            .database(&db.name);

        let mut conn = PgConnection::connect_with(&options).await?;

        let ssns = sqlx::query_scalar::<_, String>(ALIVE_SSNS_QUERY)
            .fetch_all(&mut conn)
            .await?;

        conn.close().await?;
        info!("Query returned {} rows", ssns.len());
        Ok(ssns)
    }
}
