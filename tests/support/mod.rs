// ABOUTME: Test support utilities.
// ABOUTME: Scripted fakes for the platform API and health probe, plus a tiny HTTP stub server.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Once;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::time::Instant;
use vigil::api::{ApiError, DeployApi, DeployRequest, HealthProbe, ProbeError};
use vigil::types::{DeployId, ServiceEndpoint, ServiceId};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env().add_directive("vigil=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Platform API fake that answers status queries from a script.
///
/// Once the script is used up, every further query reports `fallback`.
#[allow(dead_code)]
pub struct FakeApi {
    service_id: ServiceId,
    trigger_id: String,
    url: String,
    script: Mutex<VecDeque<Result<String, ApiError>>>,
    fallback: String,
    latency: Duration,
    status_calls: Mutex<Vec<(DeployId, Instant)>>,
    triggers: Mutex<Vec<DeployRequest>>,
}

#[allow(dead_code)]
impl FakeApi {
    pub fn new() -> Self {
        Self {
            service_id: ServiceId::new("srv-test"),
            trigger_id: "dep-test".to_string(),
            url: "https://app.example.com".to_string(),
            script: Mutex::new(VecDeque::new()),
            fallback: "build_in_progress".to_string(),
            latency: Duration::ZERO,
            status_calls: Mutex::new(Vec::new()),
            triggers: Mutex::new(Vec::new()),
        }
    }

    /// Answer the next status queries with these statuses, in order.
    pub fn with_statuses(self, statuses: &[&str]) -> Self {
        self.script
            .lock()
            .extend(statuses.iter().map(|s| Ok(s.to_string())));
        self
    }

    /// Answer the next status query with an error.
    pub fn then_error(self, error: ApiError) -> Self {
        self.script.lock().push_back(Err(error));
        self
    }

    pub fn with_fallback(mut self, status: &str) -> Self {
        self.fallback = status.to_string();
        self
    }

    pub fn with_trigger_id(mut self, id: &str) -> Self {
        self.trigger_id = id.to_string();
        self
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    /// Make trigger and URL lookups take this long to answer.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn status_calls(&self) -> Vec<(DeployId, Instant)> {
        self.status_calls.lock().clone()
    }

    pub fn status_call_count(&self) -> usize {
        self.status_calls.lock().len()
    }

    pub fn triggers(&self) -> Vec<DeployRequest> {
        self.triggers.lock().clone()
    }
}

#[async_trait]
impl DeployApi for FakeApi {
    fn service_id(&self) -> &ServiceId {
        &self.service_id
    }

    async fn trigger_deploy(&self, request: &DeployRequest) -> Result<DeployId, ApiError> {
        self.triggers.lock().push(request.clone());
        tokio::time::sleep(self.latency).await;
        Ok(DeployId::new(self.trigger_id.clone()))
    }

    async fn deploy_status(&self, deploy_id: &DeployId) -> Result<String, ApiError> {
        self.status_calls
            .lock()
            .push((deploy_id.clone(), Instant::now()));
        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(self.fallback.clone()))
    }

    async fn service_url(&self) -> Result<ServiceEndpoint, ApiError> {
        tokio::time::sleep(self.latency).await;
        Ok(ServiceEndpoint::parse(&self.url)?)
    }
}

/// Health probe fake: fails until probe number `healthy_from` (1-based).
#[allow(dead_code)]
pub struct FakeProbe {
    healthy_from: Option<u32>,
    calls: Mutex<Vec<(String, Instant)>>,
}

#[allow(dead_code)]
impl FakeProbe {
    pub fn healthy() -> Self {
        Self::healthy_from(1)
    }

    pub fn healthy_from(attempt: u32) -> Self {
        Self {
            healthy_from: Some(attempt),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn never_healthy() -> Self {
        Self {
            healthy_from: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, Instant)> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl HealthProbe for FakeProbe {
    async fn probe(&self, url: &str) -> Result<u16, ProbeError> {
        let attempt = {
            let mut calls = self.calls.lock();
            calls.push((url.to_string(), Instant::now()));
            calls.len() as u32
        };

        match self.healthy_from {
            Some(from) if attempt >= from => Ok(200),
            _ => Err(ProbeError::Status(503)),
        }
    }
}

/// A canned HTTP response served by [`serve`].
#[allow(dead_code)]
pub struct Canned {
    pub status: u16,
    pub body: String,
}

#[allow(dead_code)]
impl Canned {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Serve canned responses on a local port, one connection per response.
///
/// `responses` receives the server's base URL so bodies can point back at it.
/// Returns the base URL and a handle yielding each raw request received.
#[allow(dead_code)]
pub async fn serve(
    responses: impl FnOnce(&str) -> Vec<Canned>,
) -> (String, tokio::task::JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let responses = responses(&base_url);

    let handle = tokio::spawn(async move {
        let mut requests = Vec::new();
        for canned in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            requests.push(read_request(&mut socket).await);

            let response = format!(
                "HTTP/1.1 {} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                canned.status,
                canned.body.len(),
                canned.body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        }
        requests
    });

    (base_url, handle)
}

/// Read one request: headers, then as many body bytes as content-length says.
async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}
