use std::sync::Arc;

mod config;
mod data;
mod handler;
mod logger;
mod response;
mod router;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;

    // Bind failure (port in use, invalid address) is fatal: propagate and
    // exit non-zero without retrying.
    let listener = server::create_reusable_listener(addr)?;

    let state = Arc::new(config::AppState::new(&cfg));
    let router = Arc::new(router::build_router());

    logger::log_server_start(&addr, &cfg);

    server::run(listener, router, state).await
}
