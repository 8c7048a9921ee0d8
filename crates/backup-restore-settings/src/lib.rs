use std::path::PathBuf;

use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;

pub const PROBLEM_URL: &str = "https://hackattic.com/challenges/backup_restore/problem";
pub const SOLVE_URL: &str = "https://hackattic.com/challenges/backup_restore/solve";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub debug: bool,
    pub workdir: PathBuf,
    pub dump_file: String,
    pub challenge: ChallengeSettings,
    pub db: DBSettings,
    pub psql: PsqlSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChallengeSettings {
    pub problem_url: String,
    pub solve_url: String,
    pub access_token: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DBSettings {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PsqlSettings {
    pub binary: String,
}

impl Settings {
    pub fn get() -> Result<Self, ConfigError> {
        let mut config = Self::defaults()?;

        let etc_config = PathBuf::from("/etc/backup-restore/config.toml");
        if etc_config.exists() {
            config = config.add_source(File::from(etc_config));
        }

        let default_config = PathBuf::from("config.toml");
        if default_config.exists() {
            config = config.add_source(File::from(default_config));
        }

        config
            .add_source(
                Environment::with_prefix("BACKUP_RESTORE")
                    .try_parsing(true)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override_option("challenge.access_token", std::env::var("ACCESS_TOKEN").ok())?
            .set_override_option("db.password", std::env::var("PG_PASSWORD").ok())?
            .build()?
            .try_deserialize()
    }

    /// Built-in values for everything except the secrets, which default to
    /// empty strings until the environment provides them.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("debug", false)?
            .set_default("workdir", ".")?
            .set_default("dump_file", "dataset_dump.sql")?
            .set_default("challenge.problem_url", PROBLEM_URL)?
            .set_default("challenge.solve_url", SOLVE_URL)?
            .set_default("challenge.access_token", "")?
            .set_default("db.user", "postgres")?
            .set_default("db.password", "")?
            .set_default("db.host", "localhost")?
            .set_default("db.port", 5432)?
            .set_default("db.name", "testdb")?
            .set_default("psql.binary", "psql")
    }

    pub fn compressed_dump_path(&self) -> PathBuf {
        self.workdir.join(format!("{}.gz", self.dump_file))
    }

    pub fn sql_dump_path(&self) -> PathBuf {
        self.workdir.join(&self.dump_file)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_point_at_local_postgres() -> Result<(), ConfigError> {
        let settings: Settings = Settings::defaults()?.build()?.try_deserialize()?;

        assert!(!settings.debug);
        assert_eq!(settings.challenge.problem_url, PROBLEM_URL);
        assert_eq!(settings.challenge.solve_url, SOLVE_URL);
        assert_eq!(settings.db.host, "localhost");
        assert_eq!(settings.db.port, 5432);
        assert_eq!(settings.db.name, "testdb");
        assert_eq!(settings.psql.binary, "psql");
        assert_eq!(
            settings.compressed_dump_path(),
            PathBuf::from("./dataset_dump.sql.gz")
        );
        assert_eq!(settings.sql_dump_path(), PathBuf::from("./dataset_dump.sql"));
        Ok(())
    }

    #[test]
    fn secrets_override_defaults() -> Result<(), ConfigError> {
        let settings: Settings = Settings::defaults()?
            .set_override_option("challenge.access_token", Some("t0k3n"))?
            .set_override_option("db.password", Some("hunter2"))?
            .build()?
            .try_deserialize()?;

        assert_eq!(settings.challenge.access_token, "t0k3n");
        assert_eq!(settings.db.password, "hunter2");
        assert_eq!(settings.db.user, "postgres");
        Ok(())
    }
}
