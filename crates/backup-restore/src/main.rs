use std::process::ExitCode;

use backup_restore_importer::{BackupRestore, DumpArtifacts};
use backup_restore_settings::Settings;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const CONFIG_ERROR: u8 = 2;

#[derive(Parser, Debug)]
#[command(about = "Restore the challenge database dump and report the alive SSNs")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Fetch, restore, query and submit (the default)
    Run {
        #[arg(long, help = "Log request details and keep the dump files")]
        debug: bool,
    },
    /// Remove dump files left behind by a debug run
    Cleanup,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match Settings::get() {
        Ok(config) => config,
        Err(err) => {
            init_tracing(false);
            error!("Failed to load configuration: {err}");
            return ExitCode::from(CONFIG_ERROR);
        }
    };

    let command = cli.command.unwrap_or(Command::Run { debug: false });
    if let Command::Run { debug: true } = command {
        config.debug = true;
    }
    init_tracing(config.debug);

    match command {
        Command::Run { .. } => run(config).await,
        Command::Cleanup => {
            let removed = DumpArtifacts::from_settings(&config).cleanup();
            info!("Removed {removed} file(s)");
            ExitCode::SUCCESS
        }
    }
}

async fn run(config: Settings) -> ExitCode {
    if config.challenge.access_token.is_empty() {
        error!("ACCESS_TOKEN is not set");
        return ExitCode::from(CONFIG_ERROR);
    }

    let runner = BackupRestore::new(config);
    match runner.run().await {
        Ok(verdict) => {
            println!("Result: {verdict}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "backup_restore=debug,backup_restore_importer=debug"
    } else {
        "backup_restore=info,backup_restore_importer=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod test {
    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn run_is_the_default_command() {
        let cli = Cli::parse_from(["backup-restore"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_debug_flag() {
        let cli = Cli::parse_from(["backup-restore", "run", "--debug"]);
        assert!(matches!(cli.command, Some(Command::Run { debug: true })));
    }

    #[test]
    fn parses_cleanup() {
        let cli = Cli::parse_from(["backup-restore", "cleanup"]);
        assert!(matches!(cli.command, Some(Command::Cleanup)));
    }
}
