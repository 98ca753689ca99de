//! Small site behind the secure-response middleware.
//!
//! ```text
//! cargo run --example hello_server [config.toml]
//! curl -i -H 'Host: example.org' http://127.0.0.1:8080/
//! ```

use std::path::Path;

use axum::{routing::get, Router};
use secure_response::config::load_config;
use secure_response::observability::init_tracing;
use secure_response::{SecureResponseConfig, SecureResponseLayers};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing("secure_response=debug,tower_http=debug")?;

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => {
            let mut config = SecureResponseConfig::default();
            config.proto_header = "X-Forwarded-Proto".into();
            config.ignore_paths = vec!["/health".into()];
            config.csp_coverage.default_src = "self".into();
            config.csp_coverage.img_src = "self data:".into();
            config
        }
    };

    let app = Router::new()
        .route("/", get(|| async { "Hello over HTTPS" }))
        .route("/health", get(|| async { "ok" }));
    let app = SecureResponseLayers::from_config(&config)?
        .apply(app)
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind("127.0.0.1:8080").await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    axum::serve(listener, app).await?;
    Ok(())
}
