//! Remote content sources

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use ureq::Agent;

/// Errors from fetching a remote resource
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Fetch task failed: {0}")]
    Join(String),
}

/// Something that can fetch a text resource by URL
pub trait ContentSource: Send + Sync {
    fn fetch_text(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// HTTP source backed by a blocking ureq agent
///
/// Requests run on tokio's blocking pool so the runtime threads never wait
/// on the network.
#[derive(Clone)]
pub struct HttpSource {
    agent: Agent,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl ContentSource for HttpSource {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let agent = self.agent.clone();
        let url = url.to_string();
        tokio::task::spawn_blocking(move || fetch_blocking(&agent, &url))
            .await
            .map_err(|e| FetchError::Join(e.to_string()))?
    }
}

fn fetch_blocking(agent: &Agent, url: &str) -> Result<String, FetchError> {
    tracing::debug!("GET {}", url);

    let response = agent
        .get(url)
        .call()
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    if !(200..300).contains(&status) {
        return Err(FetchError::Status {
            status,
            url: url.to_string(),
        });
    }

    response
        .into_body()
        .read_to_string()
        .map_err(|e| FetchError::Decode(e.to_string()))
}

#[cfg(test)]
pub(crate) mod memory {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use tokio::sync::oneshot;

    use super::{ContentSource, FetchError};

    /// In-memory source for tests
    ///
    /// Unknown URLs answer with a 404. A gated URL does not answer until its
    /// gate is released, which lets tests interleave loads.
    #[derive(Default)]
    pub struct MemorySource {
        responses: Mutex<HashMap<String, Result<String, FetchError>>>,
        gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
        requests: Mutex<Vec<String>>,
    }

    impl MemorySource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(self, url: &str, body: &str) -> Self {
            self.insert(url, Ok(body.to_string()));
            self
        }

        pub fn with_error(self, url: &str, error: FetchError) -> Self {
            self.insert(url, Err(error));
            self
        }

        pub fn insert(&self, url: &str, response: Result<String, FetchError>) {
            self.responses
                .lock()
                .unwrap()
                .insert(url.to_string(), response);
        }

        /// Hold requests for `url` until the returned sender fires
        pub fn gate(&self, url: &str) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().insert(url.to_string(), rx);
            tx
        }

        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl ContentSource for MemorySource {
        async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
            self.requests.lock().unwrap().push(url.to_string());

            let gate = self.gates.lock().unwrap().remove(url);
            if let Some(gate) = gate {
                let _ = gate.await;
            }

            self.responses
                .lock()
                .unwrap()
                .get(url)
                .cloned()
                .unwrap_or_else(|| {
                    Err(FetchError::Status {
                        status: 404,
                        url: url.to_string(),
                    })
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};

    async fn spawn_store() -> String {
        let app = Router::new()
            .route("/posts.json", get(|| async { r#"[{"title":"A"}]"# }))
            .route(
                "/broken.md",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_http_source_fetches_text() {
        let base = spawn_store().await;
        let source = HttpSource::new(Duration::from_secs(5));
        let body = source.fetch_text(&format!("{}/posts.json", base)).await.unwrap();
        assert_eq!(body, r#"[{"title":"A"}]"#);
    }

    #[tokio::test]
    async fn test_http_source_reports_status() {
        let base = spawn_store().await;
        let source = HttpSource::new(Duration::from_secs(5));

        let err = source.fetch_text(&format!("{}/missing.md", base)).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));

        let err = source.fetch_text(&format!("{}/broken.md", base)).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_http_source_transport_error() {
        // Bind and drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = HttpSource::new(Duration::from_secs(5));
        let err = source
            .fetch_text(&format!("http://{}/posts.json", addr))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
