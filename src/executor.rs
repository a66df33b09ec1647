//! Request execution.
//!
//! The [`Executor`] hands a [`RequestDescriptor`] to a [`Transport`] and
//! returns the raw status and body. Non-2xx responses are not treated as
//! errors here; the error mapper decides what they mean, since error bodies
//! often carry structured detail.
//!
//! [`HttpTransport`] performs real network I/O through `reqwest`.
//! [`MockTransport`] serves queued canned responses first and falls through
//! to another transport once its queue is drained, which keeps the whole
//! pipeline testable offline.

use std::{collections::VecDeque, sync::Arc, time::Duration};

use async_trait::async_trait;
use log::{debug, trace};
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    error::{Error, Result, map_transport},
    request::RequestDescriptor,
};

/// Status code and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    status: u16,
    body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a request and returns whatever the other side answered.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RequestDescriptor) -> Result<RawResponse>;
}

/// Transport backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client with the given request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(map_transport)?;
        Ok(Self { client })
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: RequestDescriptor) -> Result<RawResponse> {
        let (url, method, headers, body) = request.into_parts();

        let mut builder = self.client.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_transport)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_transport)?;

        Ok(RawResponse::new(status, body.to_vec()))
    }
}

/// A canned response served by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockResponse {
    pub body: String,
    pub status: u16,
}

/// Transport serving queued responses in FIFO order.
///
/// Once the queue is empty, requests go to the fallback transport. Every
/// request is recorded, in order, whether it was mocked or not.
pub struct MockTransport {
    queue: Mutex<VecDeque<MockResponse>>,
    requests: Mutex<Vec<RequestDescriptor>>,
    fallback: Arc<dyn Transport>,
}

impl MockTransport {
    pub fn new(fallback: Arc<dyn Transport>) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            fallback,
        }
    }

    /// A mock whose fallback is a real HTTP transport.
    pub fn over_http() -> Self {
        Self::new(Arc::new(HttpTransport::default()))
    }

    /// A mock with no network behind it; an empty queue yields a transport error.
    pub fn offline() -> Self {
        Self::new(Arc::new(Offline))
    }

    pub async fn queue_mock_response(&self, body: impl Into<String>) {
        self.queue_mock_response_with_status(body, 200).await;
    }

    pub async fn queue_mock_response_with_status(&self, body: impl Into<String>, status: u16) {
        self.queue.lock().await.push_back(MockResponse {
            body: body.into(),
            status,
        });
    }

    pub async fn pending(&self) -> usize {
        self.queue.lock().await.len()
    }

    /// Requests seen so far, oldest first.
    pub async fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: RequestDescriptor) -> Result<RawResponse> {
        self.requests.lock().await.push(request.clone());

        // the queue lock is released before any fallback I/O
        let next = self.queue.lock().await.pop_front();
        match next {
            Some(mock) => {
                trace!("serving mock response ({}) for {}", mock.status, request.url());
                Ok(RawResponse::new(mock.status, mock.body.into_bytes()))
            }
            None => self.fallback.send(request).await,
        }
    }
}

struct Offline;

#[async_trait]
impl Transport for Offline {
    async fn send(&self, request: RequestDescriptor) -> Result<RawResponse> {
        Err(Error::transport(format!(
            "no mock response queued for {} {}",
            request.method(),
            request.url()
        )))
    }
}

/// Runs built requests against a transport.
#[derive(Clone)]
pub struct Executor {
    transport: Arc<dyn Transport>,
}

impl Executor {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn http() -> Self {
        Self::new(Arc::new(HttpTransport::default()))
    }

    /// Consumes the descriptor and performs the exchange.
    pub async fn execute(&self, request: RequestDescriptor) -> Result<RawResponse> {
        let method = request.method().clone();
        let url = request.url().clone();

        let response = self.transport.send(request).await?;
        debug!("{} {} -> {}", method, url, response.status());

        Ok(response)
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::http()
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;
    use crate::{error::ErrorKind, request::AccessToken};

    fn request(path: &str) -> RequestDescriptor {
        let url = Url::parse(&format!("https://api.example.com/v1/{}", path)).unwrap();
        RequestDescriptor::create_request_for_url(url, &AccessToken::new("t")).unwrap()
    }

    #[tokio::test]
    async fn mock_responses_are_served_in_order() {
        let mock = Arc::new(MockTransport::offline());
        mock.queue_mock_response("A").await;
        mock.queue_mock_response_with_status("B", 404).await;
        let executor = Executor::new(mock.clone());

        let first = executor.execute(request("one")).await.unwrap();
        assert_eq!(first.status(), 200);
        assert_eq!(first.body(), b"A");

        let second = executor.execute(request("two")).await.unwrap();
        assert_eq!(second.status(), 404);
        assert_eq!(second.body(), b"B");
        assert!(!second.is_success());

        assert_eq!(mock.pending().await, 0);
    }

    #[tokio::test]
    async fn drained_queue_falls_through() {
        let mock = Arc::new(MockTransport::offline());
        let executor = Executor::new(mock.clone());

        let err = executor.execute(request("albums/x")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);

        let seen = mock.requests().await;
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].url().path(), "/v1/albums/x");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_queueing_and_serving_keeps_each_response_once() {
        const TASKS: usize = 8;
        const PER_TASK: usize = 25;

        let mock = Arc::new(MockTransport::offline());

        let producers: Vec<_> = (0..TASKS)
            .map(|p| {
                let mock = mock.clone();
                tokio::spawn(async move {
                    for j in 0..PER_TASK {
                        mock.queue_mock_response(format!("{}-{}", p, j)).await;
                        tokio::task::yield_now().await;
                    }
                })
            })
            .collect();
        for producer in producers {
            producer.await.unwrap();
        }
        assert_eq!(mock.pending().await, TASKS * PER_TASK);

        let consumers: Vec<_> = (0..TASKS)
            .map(|c| {
                let executor = Executor::new(mock.clone());
                tokio::spawn(async move {
                    let mut seen = Vec::with_capacity(PER_TASK);
                    for j in 0..PER_TASK {
                        let response = executor.execute(request(&format!("c{}/{}", c, j))).await;
                        seen.push(String::from_utf8(response.unwrap().body().to_vec()).unwrap());
                        tokio::task::yield_now().await;
                    }
                    seen
                })
            })
            .collect();

        let mut all = Vec::new();
        for consumer in consumers {
            let seen = consumer.await.unwrap();
            // responses queued by one producer come out in the order they went in
            let mut last = vec![None; TASKS];
            for body in &seen {
                let (p, j) = body.split_once('-').unwrap();
                let (p, j): (usize, usize) = (p.parse().unwrap(), j.parse().unwrap());
                assert!(last[p].is_none_or(|prev| prev < j), "{} after {:?}", body, last[p]);
                last[p] = Some(j);
            }
            all.extend(seen);
        }

        all.sort();
        all.dedup();
        assert_eq!(all.len(), TASKS * PER_TASK);
        assert_eq!(mock.pending().await, 0);
        assert_eq!(mock.requests().await.len(), TASKS * PER_TASK);
    }

    #[tokio::test]
    async fn mock_can_wrap_another_mock() {
        let inner = Arc::new(MockTransport::offline());
        inner.queue_mock_response("inner").await;
        let outer = Arc::new(MockTransport::new(inner.clone()));
        outer.queue_mock_response("outer").await;
        let executor = Executor::new(outer);

        assert_eq!(executor.execute(request("a")).await.unwrap().body(), b"outer");
        assert_eq!(executor.execute(request("b")).await.unwrap().body(), b"inner");
        assert_eq!(inner.requests().await.len(), 1);
    }
}
