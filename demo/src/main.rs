mod domains;
mod error;
mod handler;
mod http;
mod repositories;
mod server;

use std::{env, process, sync::Arc, time::Duration};

use repositories::{memory::MemoryUserRepository, UserRepository};
use respond::Options;
use server::Server;
use tracing_subscriber::EnvFilter;

const SERVER_ADDRESS: &str = "0.0.0.0:8080";

const TIMEOUT_DURATION: Duration = Duration::from_secs(15);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let server_address =
        env::var("SERVER_ADDRESS").unwrap_or_else(|_| SERVER_ADDRESS.to_string());
    let default_message = env::var("DEFAULT_MESSAGE")
        .is_ok_and(|value| matches!(value.as_str(), "1" | "true"));

    let state = AppState {
        repository: Arc::new(MemoryUserRepository::default()),
        options: Options::new().default_message(default_message),
    };

    let server = Server::new(state, handler::route_request);

    if let Err(err) = server.bind(server_address).await {
        tracing::error!(%err, "server failed");
        process::exit(1);
    }
}

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn UserRepository + Send + Sync>,
    pub options: Options,
}
