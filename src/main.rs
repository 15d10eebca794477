use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use coi_serve::cli::Args;
use coi_serve::config::{AppState, Config};
use coi_serve::{logger, server};

const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

fn main() -> ExitCode {
    let args = Args::parse();

    let cfg = match Config::load(args.config.as_deref(), &args.overrides()) {
        Ok(cfg) => cfg,
        Err(e) => {
            // Logger not configured yet
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    logger::init(&cfg.logging.level);

    match run(cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cfg: Config) -> coi_serve::Result<()> {
    // Create Tokio runtime, sizing worker threads from configuration
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    let result = runtime.block_on(async_main(cfg));
    // Do not wait on connections that are still open
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    result
}

async fn async_main(cfg: Config) -> coi_serve::Result<()> {
    let addr = cfg.get_socket_addr()?;
    let state = Arc::new(AppState::new(cfg)?);
    let listener = server::create_listener(addr)?;

    logger::log_server_start(&listener.local_addr()?, &state.config, &state.root);

    server::start_server_loop(listener, state, async {
        let reason = server::shutdown_signal().await;
        logger::log_shutdown(reason);
    })
    .await;

    Ok(())
}
