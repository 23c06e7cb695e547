use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

mod config;
mod content;
mod handler;
mod http;
mod logger;
mod pages;
mod pipeline;
mod routing;
mod server;

use content::{ContentSource, HttpContentClient};
use server::SignalHandler;

/// Config file used when `-c/--config` is absent (extension optional)
const DEFAULT_CONFIG_PATH: &str = "config";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = parse_config_path(std::env::args().skip(1))?;
    let cfg = config::Config::load_from(&config_path)?;

    // Worker count from config, CPU cores otherwise
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

/// `site-server [-c|--config <path>]`
fn parse_config_path(mut args: impl Iterator<Item = String>) -> Result<String, String> {
    let mut path = DEFAULT_CONFIG_PATH.to_string();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-c" | "--config" => {
                path = args
                    .next()
                    .ok_or_else(|| format!("{arg} requires a path"))?;
            }
            other => {
                if let Some(value) = other.strip_prefix("--config=") {
                    path = value.to_string();
                } else {
                    return Err(format!(
                        "Unknown argument '{other}'\nUsage: site-server [-c|--config <path>]"
                    ));
                }
            }
        }
    }
    Ok(path)
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    logger::init(&cfg)?;

    let addr = cfg.get_socket_addr()?;
    let content: Arc<dyn ContentSource> = Arc::new(HttpContentClient::new(&cfg.content)?);
    let state = Arc::new(config::AppState::new(cfg, content)?);

    let listener = server::create_reusable_listener(addr)?;
    let active_connections = Arc::new(AtomicUsize::new(0));

    logger::log_server_start(&addr, &state.config);
    logger::log_route_table(&state.routes.paths());
    logger::log_pipeline(&state.pipeline.step_names());

    let signals = Arc::new(SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals));

    // Connections are served with spawn_local
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::start_server_loop(
            listener,
            state,
            active_connections,
            Arc::clone(&signals.shutdown),
        ))
        .await
}
