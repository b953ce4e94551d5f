use std::sync::Arc;
use std::{env, io};

use log::{error, info};
use tokio::net::TcpListener;
use tokio::signal;

use upkeep_calendar_proxy::cache::{self, ScheduleCache};
use upkeep_calendar_proxy::cli;
use upkeep_calendar_proxy::server::{self, AppState};

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = cli::parse(env::args().skip(1).collect());

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let state = Arc::new(AppState {
        upstream: args.upstream,
        cache: ScheduleCache::new(cache::Config {
            enabled: args.enable_cache,
            ttl: args.cache_ttl,
        }),
    });

    let listener = TcpListener::bind(args.address).await?;
    info!("listening at http://{}", args.address);

    axum::serve(listener, server::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
    }
}
