//! Shared utilities for integration tests: a programmable mock of Keystone and the HA API.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use ha_notify::config::ApiConfig;

pub const TOKEN: &str = "gAAAAAtest-token";
pub const PROJECT_PATH: &str = "/v1/project-1";

/// A request as seen by the mock server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Canned response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl MockResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// Handle to a running mock.
#[derive(Clone)]
pub struct MockOpenStack {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockOpenStack {
    pub fn auth_url(&self) -> String {
        format!("http://{}/v3", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, suffix: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path.ends_with(suffix))
            .collect()
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            auth_url: self.auth_url(),
            project_name: "service".into(),
            project_domain_id: "default".into(),
            username: "masakari".into(),
            user_domain_id: "default".into(),
            password: "secret".into(),
            region_name: Some("RegionOne".into()),
            request_timeout_secs: 5,
            api_retry_max: 3,
            api_retry_interval: 0,
            ..ApiConfig::default()
        }
    }
}

/// Keystone token response whose catalog points the `ha` service back at `addr`.
pub fn token_response(addr: SocketAddr) -> MockResponse {
    let body = serde_json::json!({
        "token": {
            "expires_at": "2099-01-01T00:00:00.000000Z",
            "catalog": [
                {
                    "type": "identity",
                    "endpoints": [
                        {"interface": "public", "region": "RegionOne", "url": format!("http://{}/v3", addr)}
                    ]
                },
                {
                    "type": "ha",
                    "endpoints": [
                        {"interface": "admin", "region": "RegionOne", "url": "http://127.0.0.1:9/v1/admin"},
                        {"interface": "public", "region": "RegionOne", "url": format!("http://{}{}", addr, PROJECT_PATH)}
                    ]
                }
            ]
        }
    });
    MockResponse::new(201, body.to_string()).with_header("X-Subject-Token", TOKEN)
}

/// Accepted-notification body echoing `hostname`.
pub fn accepted(hostname: &str) -> MockResponse {
    let body = serde_json::json!({
        "notification": {
            "notification_uuid": "9e66dc1a-0a4e-4c2c-9b1e-6a3d1f0c7a11",
            "status": "new",
            "type": "COMPUTE_HOST",
            "hostname": hostname,
            "source_host_uuid": "3f4c1d2e-1111-2222-3333-444455556666"
        }
    });
    MockResponse::new(202, body.to_string())
}

/// Start a mock serving Keystone tokens and delegating notification calls to `ha`.
///
/// `ha` receives the 0-based index of the notification call.
pub async fn start_openstack<F>(ha: F) -> MockOpenStack
where
    F: Fn(u32, &RecordedRequest) -> MockResponse + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let calls = Arc::new(AtomicU32::new(0));
    let ha = Arc::new(ha);

    let recorded = requests.clone();
    tokio::spawn(async move {
        loop {
            let (socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };
            let recorded = recorded.clone();
            let calls = calls.clone();
            let ha = ha.clone();
            tokio::spawn(async move {
                let (reader, mut writer) = socket.into_split();
                let Some(request) = read_request(BufReader::new(reader)).await else {
                    return;
                };
                recorded.lock().unwrap().push(request.clone());

                let response = if request.path.ends_with("/auth/tokens") {
                    token_response(addr)
                } else if request.path == format!("{}/notifications", PROJECT_PATH) {
                    ha(calls.fetch_add(1, Ordering::SeqCst), &request)
                } else {
                    MockResponse::new(404, "not found")
                };

                let _ = writer.write_all(render(&response).as_bytes()).await;
                let _ = writer.shutdown().await;
            });
        }
    });

    MockOpenStack { addr, requests }
}

/// An address nothing listens on.
pub async fn refused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

async fn read_request<R>(mut reader: BufReader<R>) -> Option<RecordedRequest>
where
    R: tokio::io::AsyncRead + Unpin,
{
    let mut line = String::new();
    reader.read_line(&mut line).await.ok()?;
    let mut parts = line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut headers = Vec::new();
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header).await.ok()? == 0 {
            break;
        }
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    let length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).await.ok()?;

    Some(RecordedRequest {
        method,
        path,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

fn render(response: &MockResponse) -> String {
    let status_text = match response.status {
        200 => "200 OK",
        201 => "201 Created",
        202 => "202 Accepted",
        400 => "400 Bad Request",
        401 => "401 Unauthorized",
        404 => "404 Not Found",
        409 => "409 Conflict",
        500 => "500 Internal Server Error",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    };

    let mut out = format!("HTTP/1.1 {}\r\n", status_text);
    out.push_str("Content-Type: application/json\r\n");
    for (name, value) in &response.headers {
        out.push_str(&format!("{}: {}\r\n", name, value));
    }
    out.push_str(&format!(
        "Content-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.body.len(),
        response.body
    ));
    out
}
