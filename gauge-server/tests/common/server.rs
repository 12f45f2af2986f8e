//! Test server harness for integration tests.
//!
//! Spins up the real application router on a random localhost port so
//! tests can exercise the HTTP API with a plain reqwest client.

use std::net::SocketAddr;

use gauge_core::GaugeStore;
use gauge_server::{build_router, AppState};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A running gauge server bound to an ephemeral port.
pub struct TestServer {
    addr: SocketAddr,
    #[allow(dead_code)]
    store: GaugeStore,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server backed by a fresh in-memory store.
    #[allow(dead_code)]
    pub async fn start() -> Self {
        Self::start_with_store(GaugeStore::new()).await
    }

    /// Start a server around an existing store.
    ///
    /// Persistence tests use this to hand in a store with a data
    /// directory, simulating a configured deployment.
    pub async fn start_with_store(store: GaugeStore) -> Self {
        let port = portpicker::pick_unused_port().expect("no available port");
        let addr = SocketAddr::from(([127, 0, 0, 1], port));

        let app = build_router(AppState::new(store.clone()));

        let listener = TcpListener::bind(addr).await.expect("bind test listener");
        let addr = listener.local_addr().expect("listener addr");

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("test server error");
        });

        // Give the server a moment to start accepting connections
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        Self {
            addr,
            store,
            shutdown_tx: Some(shutdown_tx),
            handle,
        }
    }

    /// The store backing this server, for direct seeding and inspection.
    #[allow(dead_code)]
    pub fn store(&self) -> &GaugeStore {
        &self.store
    }

    /// Full URL for a path on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// URL of the export endpoint.
    #[allow(dead_code)]
    pub fn export_url(&self) -> String {
        self.url("/api/export")
    }

    /// Signal graceful shutdown and wait for the server task to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        let _ = tokio::time::timeout(tokio::time::Duration::from_secs(5), self.handle).await;
    }
}
