use std::{path::Path, process::Stdio};

use async_trait::async_trait;
use backup_restore_settings::DBSettings;
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::error::RunError;

/// Loads a plain SQL dump into the target database.
#[async_trait]
pub trait Restorer: Send + Sync {
    /// `Ok(false)` means the restore ran and reported failure; `Err` means it
    /// could not be attempted at all.
    async fn restore(&self, sql_file: &Path, db: &DBSettings) -> Result<bool, RunError>;
}

/// Runs the dump through the `psql` command-line client.
pub struct PsqlRestorer {
    binary: String,
}

impl PsqlRestorer {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn command(&self, sql_file: &Path, db: &DBSettings) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .arg("--host")
            .arg(&db.host)
            .arg("--port")
            .arg(db.port.to_string())
            .arg("--username")
            .arg(&db.user)
            .arg("--dbname")
            .arg(&db.name)
            .arg("--no-password")
            .arg("--set")
            .arg("ON_ERROR_STOP=1")
            .arg("--file")
            .arg(sql_file)
            // Never on the command line, where it would show up in the process list.
            .env("PGPASSWORD", &db.password)
            .stdin(Stdio::null());
        command
    }
}

#[async_trait]
impl Restorer for PsqlRestorer {
    async fn restore(&self, sql_file: &Path, db: &DBSettings) -> Result<bool, RunError> {
        info!(
            "Importing {} into {}:{}/{}",
            sql_file.display(),
            db.host,
            db.port,
            db.name
        );

        let output = self.command(sql_file, db).output().await?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        debug!("Return code: {:?}", output.status.code());
        if output.status.success() {
            if !stdout.trim().is_empty() {
                debug!("Output: {}", stdout.trim());
            }
            if !stderr.trim().is_empty() {
                debug!("Error: {}", stderr.trim());
            }
            return Ok(true);
        }

        error!("{} exited with {}", self.binary, output.status);
        if !stdout.trim().is_empty() {
            error!("Output: {}", stdout.trim());
        }
        if !stderr.trim().is_empty() {
            error!("Error: {}", stderr.trim());
        }
        Ok(false)
    }
}

#[cfg(test)]
mod test {
    use std::ffi::OsStr;

    use super::*;

    fn db() -> DBSettings {
        DBSettings {
            user: "restorer".to_string(),
            password: "hunter2".to_string(),
            host: "db.internal".to_string(),
            port: 5433,
            name: "challenge".to_string(),
        }
    }

    #[test]
    fn password_is_passed_through_env_only() {
        let command = PsqlRestorer::new("psql").command(Path::new("/tmp/dump.sql"), &db());
        let command = command.as_std();

        let args = command
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect::<Vec<_>>();

        assert_eq!(
            args,
            [
                "--host",
                "db.internal",
                "--port",
                "5433",
                "--username",
                "restorer",
                "--dbname",
                "challenge",
                "--no-password",
                "--set",
                "ON_ERROR_STOP=1",
                "--file",
                "/tmp/dump.sql",
            ]
        );
        assert!(!args.iter().any(|arg| arg.contains("hunter2")));

        let password = command
            .get_envs()
            .find(|(key, _)| *key == "PGPASSWORD")
            .and_then(|(_, value)| value);
        assert_eq!(password, Some(OsStr::new("hunter2")));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn exit_status_decides_success() -> anyhow::Result<()> {
        let dump = Path::new("/dev/null");

        assert!(PsqlRestorer::new("true").restore(dump, &db()).await?);
        assert!(!PsqlRestorer::new("false").restore(dump, &db()).await?);
        Ok(())
    }

    #[tokio::test]
    async fn missing_client_is_an_io_error() {
        let result = PsqlRestorer::new("definitely-not-a-psql-binary")
            .restore(Path::new("dump.sql"), &db())
            .await;

        assert!(matches!(result, Err(RunError::Io(_))));
    }
}
