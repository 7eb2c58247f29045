use clap::Parser;
use kache::config::Config;
use kache::store::Store;
use kache::{server, Error};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::parse();

    let _ = tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .try_init()
        .map_err(|e| debug!("Failed to initialize global tracing: {}", e));

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    let store = Store::new();

    tokio::select! {
        res = server::run(listener, store, config.max_frame_size) => res,
        _ = signal::ctrl_c() => {
            info!("Shutting down");
            Ok(())
        }
    }
}
