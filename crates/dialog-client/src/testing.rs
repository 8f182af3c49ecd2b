//! Test utilities for dialog-client
//!
//! [`TestServer`] runs an axum router on a local port with a
//! [`DialogClient`] pointed at it. [`MockTransport`] replays scripted
//! responses without any network and records what was sent.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::net::TcpListener;

use crate::auth::BasicAuth;
use crate::error::TransportError;
use crate::request::RequestDescriptor;
use crate::transport::{RawResponse, ReqwestTransport, Transport};
use crate::{DialogClient, Result};

/// Version date used by test clients
pub const TEST_VERSION: &str = "2017-05-26";

/// A test server that automatically shuts down when dropped
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: DialogClient,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    /// Start serving `router` on an ephemeral port
    ///
    /// The bundled client authenticates as `test:secret`.
    ///
    /// ```ignore
    /// use dialog_client::testing::TestServer;
    ///
    /// let server = TestServer::start(router).await?;
    /// let page = server.client.list_workspaces(&ListOptions::default()).await?;
    /// ```
    pub async fn start<S>(router: axum::Router<S>) -> Result<Self>
    where
        S: Clone + Send + Sync + 'static,
        axum::Router<S>: Into<axum::Router>,
    {
        Self::start_with_timeout(router, Duration::from_secs(5), Duration::from_secs(2)).await
    }

    /// Start serving with custom client timeouts
    pub async fn start_with_timeout<S>(
        router: axum::Router<S>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self>
    where
        S: Clone + Send + Sync + 'static,
        axum::Router<S>: Into<axum::Router>,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let router: axum::Router = router.into();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        // Give server a moment to start
        tokio::time::sleep(Duration::from_millis(10)).await;

        let transport = ReqwestTransport::with_timeouts(timeout, connect_timeout)?;
        let client = DialogClient::with_transport(
            &format!("http://{}", addr),
            TEST_VERSION,
            Arc::new(transport),
        )?
        .credentials(BasicAuth::new("test", "secret"));

        Ok(Self {
            addr,
            client,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Get the base URL of the test server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get a reference to the client
    pub fn client(&self) -> &DialogClient {
        &self.client
    }

    /// Shutdown the server gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

enum Scripted {
    Response(RawResponse),
    Failure(String),
}

/// In-memory [`Transport`] that answers from a script
///
/// Each call pops the next scripted outcome; an exhausted script fails with
/// `TransportError::ConnectionFailed`. Every performed request is recorded.
#[derive(Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<RequestDescriptor>>,
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("pending", &self.script.lock().len())
            .field("calls", &self.requests.lock().len())
            .finish()
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response
    pub fn respond(&self, status: u16, body: impl Into<bytes::Bytes>) -> &Self {
        self.script
            .lock()
            .push_back(Scripted::Response(RawResponse::new(status, body)));
        self
    }

    /// Queue a response with a JSON body
    pub fn respond_json(&self, status: u16, body: serde_json::Value) -> &Self {
        self.respond(status, body.to_string())
    }

    /// Queue a network failure
    pub fn fail(&self, reason: impl Into<String>) -> &Self {
        self.script.lock().push_back(Scripted::Failure(reason.into()));
        self
    }

    /// Number of requests performed so far
    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    /// Requests performed so far, oldest first
    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<RequestDescriptor> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn perform(&self, request: &RequestDescriptor) -> std::result::Result<RawResponse, TransportError> {
        self.requests.lock().push(request.clone());
        match self.script.lock().pop_front() {
            Some(Scripted::Response(response)) => Ok(response),
            Some(Scripted::Failure(reason)) => Err(TransportError::ConnectionFailed(reason)),
            None => Err(TransportError::ConnectionFailed(
                "no scripted response".to_string(),
            )),
        }
    }
}

/// Build a client on top of a [`MockTransport`]
pub fn mock_client() -> Result<(DialogClient, Arc<MockTransport>)> {
    let transport = Arc::new(MockTransport::new());
    let client = DialogClient::with_transport(
        "https://dialog.example.com/api",
        TEST_VERSION,
        transport.clone(),
    )?;
    Ok((client, transport))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{Method, RequestBuilder};

    #[test]
    fn test_base_url_format() {
        let addr: SocketAddr = "127.0.0.1:8080".parse().unwrap();
        let url = format!("http://{}", addr);
        assert_eq!(url, "http://127.0.0.1:8080");
    }

    #[tokio::test]
    async fn test_mock_transport_replays_script() {
        let transport = MockTransport::new();
        transport.respond(200, "{}").fail("reset");
        let request = RequestBuilder::new(
            Method::Get,
            url::Url::parse("http://localhost/").unwrap(),
        )
        .build();

        let first = transport.perform(&request).await.unwrap();
        assert_eq!(first.status, 200);
        assert!(matches!(
            transport.perform(&request).await,
            Err(TransportError::ConnectionFailed(_))
        ));
        assert!(transport.perform(&request).await.is_err());
        assert_eq!(transport.calls(), 3);
    }
}
