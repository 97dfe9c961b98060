use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use vlc_check::app;
use vlc_check::config::{self, CheckerConfig};
use vlc_check::source::videolan::VideolanSource;
use vlc_check::store::Store;

#[derive(Parser)]
#[command(name = "vlc-check")]
#[command(version, about = "VLC Media Player update checker")]
struct Cli {
    /// Check for updates now (also the default action)
    #[arg(long)]
    check: bool,

    /// Override the auto-detected current VLC version
    #[arg(long, value_name = "VERSION")]
    current: Option<String>,

    /// Show the update check history
    #[arg(long, conflicts_with_all = ["check", "list_versions"])]
    history: bool,

    /// List all recorded VLC versions
    #[arg(long, conflicts_with = "check")]
    list_versions: bool,

    /// Database file location
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,
}

/// Send diagnostics to a log file in the data dir, keeping stdout for the
/// user-facing report. The guard must stay alive for the process lifetime.
fn init_tracing() -> Option<WorkerGuard> {
    let data_dir = config::data_dir();
    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        eprintln!("Warning: could not create data dir {:?}: {}", data_dir, e);
        return None;
    }

    let appender = tracing_appender::rolling::never(&data_dir, "vlc-check.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Some(guard)
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let checker_config = CheckerConfig::load();

    let db_path = cli.db.unwrap_or_else(config::db_path);
    let store = Store::open(&db_path)?;

    // Checking is the default when no mode flag is given
    if cli.check || (!cli.history && !cli.list_versions) {
        let current_version =
            app::resolve_current(&checker_config, cli.current.as_deref()).await;
        let source = VideolanSource::new(&checker_config);

        let reachable = app::run_check(&store, &source, &current_version).await;
        return if reachable {
            Ok(ExitCode::SUCCESS)
        } else {
            Ok(ExitCode::from(1))
        };
    }

    if cli.history {
        app::run_history(&store)?;
    } else {
        app::run_list_versions(&store)?;
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = init_tracing();

    let result = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build tokio runtime")
        .block_on(run(cli));

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
