//! In-memory transports and a canned-response server for unit tests.

use crate::error::{FetchError, FetchResult};
use crate::net::{Fetcher, HttpResponse, Reachability};
use crate::types::Port;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Reachability fake: only explicitly opened `(host, port)` pairs answer.
#[derive(Default)]
pub struct FakeReachability {
    open: HashSet<(String, u16)>,
    attempts: Mutex<Vec<(String, Port)>>,
}

impl FakeReachability {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(mut self, host: &str, ports: &[u16]) -> Self {
        for &port in ports {
            self.open.insert((host.to_string(), port));
        }
        self
    }

    /// Ports checked for `host`, in call order.
    pub fn attempts(&self, host: &str) -> Vec<Port> {
        self.attempts
            .lock()
            .unwrap()
            .iter()
            .filter(|(h, _)| h == host)
            .map(|(_, port)| *port)
            .collect()
    }
}

#[async_trait]
impl Reachability for FakeReachability {
    async fn is_reachable(&self, host: &str, port: Port) -> bool {
        self.attempts.lock().unwrap().push((host.to_string(), port));
        tokio::task::yield_now().await;
        self.open.contains(&(host.to_string(), port.as_u16()))
    }
}

/// Scripted reply for one URL.
#[derive(Debug, Clone)]
pub enum Reply {
    Status(u16, u64),
    Redirect(u16, &'static str),
    Refused,
    BodyCut(u16),
}

/// Fetcher fake: URLs without a script are refused.
#[derive(Default)]
pub struct FakeFetcher {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, url: &str, reply: Reply) -> Self {
        self.replies.insert(url.to_string(), reply);
        self
    }

    /// Every URL requested, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, host: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|url| url.ends_with(&format!("://{}", host)))
            .collect()
    }
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap()
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn get(&self, url: &str) -> FetchResult<HttpResponse> {
        self.calls.lock().unwrap().push(url.to_string());
        tokio::task::yield_now().await;

        match self.replies.get(url).cloned().unwrap_or(Reply::Refused) {
            Reply::Status(code, size) => Ok(HttpResponse::new(url, status(code), size)),
            Reply::Redirect(code, location) => {
                Ok(HttpResponse::new(url, status(code), 0).with_location(location))
            }
            Reply::Refused => Err(FetchError::Transport("connection refused".to_string())),
            Reply::BodyCut(code) => Err(FetchError::Body {
                status: status(code),
                reason: "connection closed before message completed".to_string(),
            }),
        }
    }
}

/// A listener that answers exactly one connection with a canned response.
pub struct OneShotServer {
    pub addr: SocketAddr,
    request: oneshot::Receiver<String>,
}

impl OneShotServer {
    /// Raw request text received by the server.
    pub async fn request(self) -> String {
        self.request.await.unwrap_or_default()
    }
}

pub async fn serve_once(response: &'static str) -> OneShotServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        if let Ok((mut stream, _)) = listener.accept().await {
            let mut buf = vec![0u8; 8192];
            let n = stream.read(&mut buf).await.unwrap_or(0);
            let _ = tx.send(String::from_utf8_lossy(&buf[..n]).into_owned());
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    OneShotServer { addr, request: rx }
}
