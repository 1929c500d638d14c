#![allow(dead_code)]

use reqwest::Client;
use server::progress::ProgressBook;
use server::store::OpeningStore;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use trainer::client::HttpOpeningClient;
use trainer::config::TrainerConfig;

/// Catalogue shipped at the workspace root.
pub const OPENINGS_FILE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/openings.json");

/// A server bound to an ephemeral port for the lifetime of the test.
pub struct TestServer {
    pub base_url: String,
    pub progress_file: PathBuf,
}

impl TestServer {
    /// Build a URL for an API endpoint.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// An opening client pointed at this server.
    pub fn opening_client(&self) -> HttpOpeningClient {
        opening_client(&self.base_url)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.progress_file);
    }
}

/// Build a reqwest client for tests.
pub fn client() -> Client {
    Client::new()
}

/// Generate a unique suffix based on timestamp to avoid collisions.
pub fn unique_suffix() -> String {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}", ts % 1_000_000_000)
}

pub fn opening_client(base_url: &str) -> HttpOpeningClient {
    HttpOpeningClient::new(&TrainerConfig {
        api_url: base_url.to_string(),
        request_timeout: Duration::from_secs(5),
    })
    .unwrap()
}

/// Start the opening service on 127.0.0.1 with the bundled catalogue and a
/// fresh progress file.
pub async fn spawn_server() -> TestServer {
    let store = Arc::new(OpeningStore::load(OPENINGS_FILE).unwrap());
    let progress_file = std::env::temp_dir().join(format!(
        "chesswiz-progress-it-{}-{}.json",
        std::process::id(),
        unique_suffix()
    ));
    let progress = ProgressBook::empty(&progress_file).shared();
    let app = server::build_router(store, progress, server::cors_layer(None));

    TestServer {
        base_url: serve(app).await,
        progress_file,
    }
}

/// Serve `app` on an ephemeral port and return its base URL.
pub async fn serve(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

/// An address nothing is listening on.
pub async fn dead_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
