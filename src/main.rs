use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod product;
mod server;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> Result<(), BoxError> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::Config::load_from(&config_path)?;
    logger::init(&cfg)?;

    // Build the runtime by hand so `server.workers` can size it
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        if workers == 0 {
            return Err("server.workers must be at least 1".into());
        }
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), BoxError> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr)?;
    let state = Arc::new(config::AppState::new(&cfg));

    logger::log_server_start(&listener.local_addr()?, &cfg);

    server::start_server_loop(listener, state, server::shutdown_signal()).await?;
    Ok(())
}
