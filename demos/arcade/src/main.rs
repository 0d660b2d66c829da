//! Arcade demo: runs a Parlor relay server for the browser mini-games.
//!
//! Point the game clients at `ws://<host>:8080` (or whatever `ARCADE_ADDR`
//! says) and they take it from there: rooms are created on the first
//! join, so there is nothing to set up server-side.

use parlor::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ParlorError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr = std::env::var("ARCADE_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let server = ParlorServer::builder().bind(&addr).build().await?;
    tracing::info!(%addr, "arcade server listening");

    server.run().await
}
