//! Shared HTTP client tuned for probing.
//!
//! Certificate validation is disabled, redirects are never followed, and
//! every request carries a randomly chosen browser `User-Agent`. One client
//! is built per run and shared by all probe workers; its connection pool
//! handles concurrent use.

use super::limiter::HostLimiter;
use super::traits::{Fetcher, HttpResponse};
use crate::config::TLS_HANDSHAKE_TIMEOUT;
use crate::error::{ConfigError, ConfigResult, FetchError, FetchResult};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::header::{ACCEPT, LOCATION, USER_AGENT};
use reqwest::{redirect, Method};
use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;

/// Idle connections kept per host.
const MAX_IDLE_PER_HOST: usize = 250;

/// Browser signatures rotated across requests.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/15.1 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/110.0.0.0 Safari/537.36",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 14_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.0 Mobile/15A372 Safari/604.1",
    "Mozilla/5.0 (Windows NT 6.1; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Firefox/112.0",
    "Mozilla/5.0 (Linux; Android 11; SM-G991B) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/93.0.4577.82 Mobile Safari/537.36",
    "Mozilla/5.0 (Linux x86_64; rv:91.0) Gecko/20100101 Firefox/91.0",
    "Mozilla/5.0 (Linux x86_64; rv:96.0) Gecko/20100101 Firefox/96.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.10; rv:57.0) Gecko/20100101 Firefox/57.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 12_1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/97.0.4692.99 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 12.1; rv:91.0) Gecko/20100101 Firefox/91.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 12.1; rv:96.0) Gecko/20100101 Firefox/96.0",
    "Mozilla/5.0 (Windows NT 10.0; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/63.0.3239.132 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/63.0.3239.84 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/97.0.4692.99 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; WOW64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/97.0.4692.99 Safari/537.36 OPR/83.0.4254.16",
    "Mozilla/5.0 (X11; Fedora; Linux x86_64; rv:57.0) Gecko/20100101 Firefox/57.0",
    "Mozilla/5.0 (X11; Fedora; Linux x86_64; rv:91.0) Gecko/20100101 Firefox/91.0",
    "Mozilla/5.0 (X11; Fedora; Linux x86_64; rv:96.0) Gecko/20100101 Firefox/96.0",
    "Mozilla/5.0 (X11; Linux i686; rv:91.0) Gecko/20100101 Firefox/91.0",
    "Mozilla/5.0 (X11; Linux i686; rv:96.0) Gecko/20100101 Firefox/96.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/63.0.3239.108 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/63.0.3239.132 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/63.0.3239.84 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/97.0.4692.99 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/97.0.4692.99 Safari/537.36 OPR/83.0.4254.16",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Ubuntu Chromium/63.0.3239.84 Chrome/63.0.3239.84 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64; rv:57.0) Gecko/20100101 Firefox/57.0",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:91.0) Gecko/20100101 Firefox/91.0",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:96.0) Gecko/20100101 Firefox/96.0",
];

/// Pick a user agent uniformly at random.
pub fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// Render a reqwest error with its full source chain.
///
/// reqwest's own message is usually just "error sending request"; the
/// useful part (refused, DNS, TLS) lives further down the chain.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// HTTP client for probing.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    limiter: Arc<HostLimiter>,
}

impl HttpClient {
    /// Build a client with the given overall request timeout.
    pub fn new(timeout: Duration) -> ConfigResult<Self> {
        Self::with_host_limiter(timeout, HostLimiter::default())
    }

    /// Build a client whose per-host concurrency is capped by `limiter`.
    pub fn with_host_limiter(timeout: Duration, limiter: HostLimiter) -> ConfigResult<Self> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .redirect(redirect::Policy::none())
            .timeout(timeout)
            .connect_timeout(TLS_HANDSHAKE_TIMEOUT)
            .pool_max_idle_per_host(MAX_IDLE_PER_HOST)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self {
            client,
            limiter: Arc::new(limiter),
        })
    }

    /// Send a request and drain the body, counting bytes.
    pub async fn fetch(&self, method: Method, url: &str) -> FetchResult<HttpResponse> {
        let _permit = self.limiter.acquire(url).await;

        let mut response = self
            .client
            .request(method, url)
            .header(USER_AGENT, random_user_agent())
            .header(ACCEPT, "*/*")
            .send()
            .await
            .map_err(|e| FetchError::Transport(describe(&e)))?;

        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let mut body_size = 0u64;
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => body_size += chunk.len() as u64,
                Ok(None) => break,
                Err(e) => {
                    return Err(FetchError::Body {
                        status,
                        reason: describe(&e),
                    })
                }
            }
        }

        Ok(HttpResponse {
            url: url.to_string(),
            status,
            location,
            body_size,
        })
    }

    /// GET `url` and return the body bytes. Non-2xx responses are errors.
    pub async fn get_bytes(&self, url: &str) -> FetchResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, random_user_agent())
            .header(ACCEPT, "*/*")
            .send()
            .await
            .map_err(|e| FetchError::Transport(describe(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport(format!("unexpected status {}", status)));
        }

        let bytes = response.bytes().await.map_err(|e| FetchError::Body {
            status,
            reason: describe(&e),
        })?;

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl Fetcher for HttpClient {
    async fn get(&self, url: &str) -> FetchResult<HttpResponse> {
        self.fetch(Method::GET, url).await
    }
}
