use std::sync::Arc;

use backup_restore_settings::Settings;
use serde_json::Value;
use tracing::{debug, info};

pub mod cleanup;
pub mod download;
pub mod dump;
mod error;
pub mod model;
pub mod postgres;
mod progress;

pub use cleanup::DumpArtifacts;
pub use error::RunError;

use crate::{
    model::Solution,
    postgres::{Extractor, PgExtractor, PsqlRestorer, Restorer},
};

pub struct BackupRestore {
    pub client: reqwest::Client,
    pub config: Arc<Settings>,
    restorer: Box<dyn Restorer>,
    extractor: Box<dyn Extractor>,
}

impl BackupRestore {
    pub fn new(config: Settings) -> Self {
        let restorer = PsqlRestorer::new(config.psql.binary.clone());
        Self::with_backends(config, restorer, PgExtractor)
    }

    pub fn with_backends(
        config: Settings,
        restorer: impl Restorer + 'static,
        extractor: impl Extractor + 'static,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            config: Arc::new(config),
            restorer: Box::new(restorer),
            extractor: Box::new(extractor),
        }
    }

    pub fn artifacts(&self) -> DumpArtifacts {
        DumpArtifacts::from_settings(&self.config)
    }

    /// Solves the challenge and returns the service's verdict. The dump files
    /// are removed afterwards whether or not solving succeeded, except in debug
    /// mode.
    pub async fn run(&self) -> Result<Value, RunError> {
        let result = self.solve().await;

        if self.config.debug {
            info!("Skipping cleanup of temporary files in debug mode");
        } else {
            self.artifacts().cleanup();
        }

        result
    }

    async fn solve(&self) -> Result<Value, RunError> {
        let problem = self.fetch_problem().await?;
        let artifacts = self.artifacts();

        let compressed = dump::decode_dump(&problem.dump)?;
        dump::save_dump(&compressed, &artifacts.compressed)?;
        dump::decompress_gzip_file(&artifacts.compressed, &artifacts.sql)?;

        if !self.restorer.restore(&artifacts.sql, &self.config.db).await? {
            return Err(RunError::RestoreFailed);
        }

        let alive_ssns = self.extractor.alive_identifiers(&self.config.db).await?;
        info!("Found {} alive SSNs", alive_ssns.len());

        let solution = Solution { alive_ssns };
        debug!("Solution: {solution:?}");

        self.submit_solution(&solution).await
    }
}
