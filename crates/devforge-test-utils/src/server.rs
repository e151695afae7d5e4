//! API server test helpers.
//!
//! [`TestServer`] binds an ephemeral port on localhost and runs the real
//! [`Server`] loop in a background task. Requests go through a `hyper`
//! HTTP/1.1 client connection.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use devforge_config::AppConfig;
use devforge_core::{Server, ServerError, ToolRegistry};
use http_body_util::{BodyExt, Full};
use hyper::StatusCode;
use hyper::body::Bytes;
use hyper_util::rt::TokioIo;
use serde::de::DeserializeOwned;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Status and collected body of one response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl TestResponse {
    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "response body is not the expected JSON ({e}): {}",
                String::from_utf8_lossy(&self.body)
            )
        })
    }
}

/// A running API server on `127.0.0.1:<ephemeral>`.
pub struct TestServer {
    pub addr: SocketAddr,
    server: Arc<Server>,
    handle: JoinHandle<Result<(), ServerError>>,
}

impl TestServer {
    pub async fn start(config: AppConfig, registry: ToolRegistry) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().expect("listener has no local addr");

        let server = Arc::new(Server::new(config, Arc::new(registry)));
        let runner = Arc::clone(&server);
        let handle = tokio::spawn(async move { runner.run_on(listener).await });

        Self {
            addr,
            server,
            handle,
        }
    }

    /// Start with default config and the built-in catalog.
    pub async fn builtin() -> Self {
        Self::start(AppConfig::default(), ToolRegistry::with_builtin_tools(None)).await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(hyper::Method::GET, path, None).await
    }

    /// POST a JSON body.
    pub async fn post_json(&self, path: &str, body: &str) -> TestResponse {
        self.request(hyper::Method::POST, path, Some(body)).await
    }

    /// Send one request over a fresh HTTP/1.1 connection.
    pub async fn request(
        &self,
        method: hyper::Method,
        path: &str,
        body: Option<&str>,
    ) -> TestResponse {
        let stream = TcpStream::connect(self.addr)
            .await
            .expect("failed to connect to test server");

        let (mut sender, conn) =
            hyper::client::conn::http1::handshake::<_, Full<Bytes>>(TokioIo::new(stream))
                .await
                .expect("HTTP handshake failed");
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                tracing::warn!(error = %e, "Test client connection error");
            }
        });

        let mut builder = hyper::Request::builder()
            .method(method)
            .uri(path)
            .header("host", self.addr.to_string());
        if body.is_some() {
            builder = builder.header("content-type", "application/json");
        }
        let payload = body.map_or_else(Bytes::new, |b| Bytes::copy_from_slice(b.as_bytes()));
        let req = builder
            .body(Full::new(payload))
            .expect("failed to build request");

        let resp = sender.send_request(req).await.expect("request failed");
        let status = resp.status();
        let body = resp
            .into_body()
            .collect()
            .await
            .expect("failed to read response body")
            .to_bytes();

        TestResponse { status, body }
    }

    /// Request shutdown and wait for the server task to finish.
    ///
    /// The signal is resent until the task exits, since a server that has not
    /// subscribed yet would miss a single send.
    pub async fn stop(mut self) -> Result<(), ServerError> {
        loop {
            self.server.shutdown();
            match tokio::time::timeout(Duration::from_millis(50), &mut self.handle).await {
                Ok(joined) => return joined.expect("server task panicked"),
                Err(_) => continue,
            }
        }
    }
}
