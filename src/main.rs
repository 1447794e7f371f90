//! proxy-commands binary entry point.

use std::io::BufRead;
use std::process::ExitCode;
use std::sync::Arc;

use proxy_commands::api::{self, AppState};
use proxy_commands::catalog::{Catalog, CatalogStore};
use proxy_commands::cli::{self, Args};
use proxy_commands::command::{CommandContext, Dispatcher};
use proxy_commands::config::Config;
use proxy_commands::logging;
use proxy_commands::session::{BanList, SessionSet};
use proxy_commands::shutdown::{listen_for_os_signals, ShutdownSignal};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Run with --help for usage.");
            return ExitCode::FAILURE;
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }
    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    logging::init(Some(config.log_filter()));

    match run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "proxy-commands stopped with an error");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args, config: Config) -> proxy_commands::Result<()> {
    info!("proxy-commands v{}", env!("CARGO_PKG_VERSION"));

    let catalog = Catalog::from_config(&config)?;
    info!(
        servers = catalog.server_names().count(),
        groups = catalog.group_names().count(),
        "catalog loaded"
    );
    let store = match args.config {
        Some(path) => CatalogStore::with_source(catalog, path),
        None => CatalogStore::new(catalog),
    };

    let shutdown = ShutdownSignal::new();
    listen_for_os_signals(shutdown.clone());

    let ctx = CommandContext::new(
        Arc::new(SessionSet::new()),
        Arc::new(store),
        Arc::new(BanList::new()),
        shutdown.clone(),
    );
    let dispatcher = Arc::new(Dispatcher::with_builtins(ctx)?);
    info!(commands = dispatcher.registry().len(), "commands registered");

    if !args.no_stdin {
        spawn_stdin_console(Arc::clone(&dispatcher));
    }

    let console = config.to_console_config()?;
    api::serve(console, AppState::new(dispatcher), shutdown).await
}

/// Run command lines typed on standard input as the console caller.
///
/// Runs on its own thread; it is abandoned when the process exits.
fn spawn_stdin_console(dispatcher: Arc<Dispatcher>) {
    let spawned = std::thread::Builder::new()
        .name("stdin-console".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!(error = %e, "stdin console closed");
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }

                let reply = dispatcher.dispatch(None, &line);
                if !reply.is_empty() {
                    println!("{}", reply);
                }
            }
        });

    if let Err(e) = spawned {
        warn!(error = %e, "could not start stdin console");
    }
}
