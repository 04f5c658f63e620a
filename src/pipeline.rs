//! Pipeline coordinator.
//!
//! Wires classification, validation and probing into a concurrent graph:
//!
//! ```text
//!             ┌── urls ─────────────────────────────┐
//! dispatch ───┤                                     ├─> probe pool ──> results
//!             └── hosts ──> validation pool ──> valid hosts ─┘
//! ```
//!
//! Each pool runs `threads` workers. Queues close through sender ownership:
//! every producer holds its own sender clone, so a queue closes exactly when
//! its last producer exits. The results stream therefore ends only after
//! both probe inputs are closed and drained.

use crate::config::ProbeConfig;
use crate::net::{validate_host, Fetcher, Reachability, ValidHost};
use crate::probe::{probe_host, probe_url};
use crate::storage::{Report, ReportStore};
use crate::types::{HostTarget, OutcomeRecord, Target, UrlTarget};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::mpsc::{self, Receiver, Sender, UnboundedReceiver, UnboundedSender};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// A queue receiver shared by every worker of a pool.
type SharedReceiver<T> = Arc<Mutex<Receiver<T>>>;

fn shared<T>(rx: Receiver<T>) -> SharedReceiver<T> {
    Arc::new(Mutex::new(rx))
}

/// Take the next item, or `None` once the queue is closed and drained.
async fn next<T>(rx: &SharedReceiver<T>) -> Option<T> {
    rx.lock().await.recv().await
}

/// Concurrent probing pipeline.
pub struct Pipeline<F: ?Sized, R: ?Sized> {
    config: Arc<ProbeConfig>,
    fetcher: Arc<F>,
    reachability: Arc<R>,
}

impl<F: ?Sized, R: ?Sized> Clone for Pipeline<F, R> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            fetcher: Arc::clone(&self.fetcher),
            reachability: Arc::clone(&self.reachability),
        }
    }
}

impl<F, R> Pipeline<F, R>
where
    F: Fetcher + ?Sized + 'static,
    R: Reachability + ?Sized + 'static,
{
    /// Create a pipeline sharing `fetcher` and `reachability` across all workers.
    pub fn new(config: ProbeConfig, fetcher: Arc<F>, reachability: Arc<R>) -> Self {
        Self {
            config: Arc::new(config),
            fetcher,
            reachability,
        }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Start processing `targets` and return the result stream.
    ///
    /// Records arrive in completion order. The stream ends once every
    /// target has been fully processed. Must be called within a Tokio runtime.
    pub fn spawn(&self, targets: Vec<String>) -> UnboundedReceiver<OutcomeRecord> {
        let workers = self.config.workers();

        let (url_tx, url_rx) = mpsc::channel::<UrlTarget>(workers);
        let (host_tx, host_rx) = mpsc::channel::<HostTarget>(workers);
        let (valid_tx, valid_rx) = mpsc::channel::<ValidHost>(workers);
        let (result_tx, result_rx) = mpsc::unbounded_channel();

        let dispatcher = tokio::spawn(dispatch(targets, url_tx, host_tx));

        let host_rx = shared(host_rx);
        let validators: Vec<JoinHandle<()>> = (0..workers)
            .map(|id| {
                tokio::spawn(validation_worker(
                    id,
                    Arc::clone(&host_rx),
                    valid_tx.clone(),
                    Arc::clone(&self.reachability),
                    Arc::clone(&self.config),
                ))
            })
            .collect();
        drop(valid_tx);

        let url_rx = shared(url_rx);
        let valid_rx = shared(valid_rx);
        let probers: Vec<JoinHandle<()>> = (0..workers)
            .map(|id| {
                tokio::spawn(probe_worker(
                    id,
                    Arc::clone(&url_rx),
                    Arc::clone(&valid_rx),
                    result_tx.clone(),
                    Arc::clone(&self.fetcher),
                ))
            })
            .collect();
        drop(result_tx);

        tokio::spawn(supervise(dispatcher, validators, probers));

        result_rx
    }

    /// Process `targets` to completion, collecting every record into `store`'s report.
    pub async fn run(&self, targets: Vec<String>, store: &ReportStore) -> Report {
        store.collect(self.spawn(targets)).await
    }
}

/// Classify each target once and route it to its queue.
///
/// Both queues close when this returns.
async fn dispatch(targets: Vec<String>, urls: Sender<UrlTarget>, hosts: Sender<HostTarget>) {
    let total = targets.len();

    for raw in targets {
        let sent = match Target::classify(&raw) {
            Target::Url(target) => urls.send(target).await.is_ok(),
            Target::Host(target) => hosts.send(target).await.is_ok(),
        };
        if !sent {
            debug!(target = %raw, "queue closed before dispatch finished");
        }
    }

    debug!(total, "dispatch complete");
}

async fn validation_worker<R>(
    id: usize,
    hosts: SharedReceiver<HostTarget>,
    valid: Sender<ValidHost>,
    reachability: Arc<R>,
    config: Arc<ProbeConfig>,
) where
    R: Reachability + ?Sized,
{
    while let Some(target) = next(&hosts).await {
        if let Some(host) = validate_host(&*reachability, &target.host, &config.candidate_ports).await {
            if valid.send(host).await.is_err() {
                debug!(worker = id, "valid-host queue closed");
                break;
            }
        }
    }
    debug!(worker = id, "validation worker done");
}

/// Serve both probe inputs without priority until both are exhausted.
async fn probe_worker<F>(
    id: usize,
    urls: SharedReceiver<UrlTarget>,
    hosts: SharedReceiver<ValidHost>,
    results: UnboundedSender<OutcomeRecord>,
    fetcher: Arc<F>,
) where
    F: Fetcher + ?Sized,
{
    let mut urls_open = true;
    let mut hosts_open = true;

    while urls_open || hosts_open {
        tokio::select! {
            target = next(&urls), if urls_open => match target {
                Some(target) => {
                    if let Some(record) = probe_url(&*fetcher, &target).await {
                        emit(&results, record);
                    }
                }
                None => urls_open = false,
            },
            host = next(&hosts), if hosts_open => match host {
                Some(host) => {
                    for record in probe_host(&*fetcher, &host.host).await {
                        emit(&results, record);
                    }
                }
                None => hosts_open = false,
            },
        }
    }
    debug!(worker = id, "probe worker done");
}

fn emit(results: &UnboundedSender<OutcomeRecord>, record: OutcomeRecord) {
    if results.send(record).is_err() {
        debug!("result stream dropped by consumer");
    }
}

/// Wait for every stage and surface worker panics.
async fn supervise(dispatcher: JoinHandle<()>, validators: Vec<JoinHandle<()>>, probers: Vec<JoinHandle<()>>) {
    if let Err(e) = dispatcher.await {
        error!(error = %e, "dispatcher failed");
    }

    for (stage, handles) in [("validation", validators), ("probe", probers)] {
        let failed = join_all(handles).await.into_iter().filter(Result::is_err).count();
        if failed > 0 {
            error!(stage, failed, "workers exited abnormally");
        } else {
            info!("{} pool finished", stage);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::{HttpClient, TcpReachability};
    use crate::testing::{serve_once, FakeFetcher, FakeReachability, Reply};
    use crate::types::{Port, PortSpec, Proto};
    use std::time::Duration;

    async fn collect(mut rx: UnboundedReceiver<OutcomeRecord>) -> Vec<OutcomeRecord> {
        let mut records = Vec::new();
        while let Some(record) = rx.recv().await {
            records.push(record);
        }
        records
    }

    fn pipeline(
        threads: usize,
        fetcher: FakeFetcher,
        reachability: FakeReachability,
    ) -> Pipeline<FakeFetcher, FakeReachability> {
        Pipeline::new(
            ProbeConfig::new().with_threads(threads),
            Arc::new(fetcher),
            Arc::new(reachability),
        )
    }

    /// 10 reachable hosts, 5 URLs, 5 unreachable hosts.
    fn mixed_fixture() -> (Vec<String>, FakeFetcher, FakeReachability) {
        let mut targets = Vec::new();
        let mut fetcher = FakeFetcher::new();
        let mut reachability = FakeReachability::new();

        for i in 0..10 {
            let host = format!("live{}.example", i);
            reachability = reachability.open(&host, &[80]);
            fetcher = match i % 3 {
                0 => fetcher.reply(&format!("http://{}", host), Reply::Status(200, i)),
                1 => fetcher.reply(&format!("https://{}", host), Reply::Redirect(301, "/home")),
                _ => fetcher,
            };
            targets.push(host);
        }
        for i in 0..5 {
            let url = format!("https://app{}.example/path", i);
            if i % 2 == 0 {
                fetcher = fetcher.reply(&url, Reply::Status(404, 7));
            }
            targets.push(url);
        }
        for i in 0..5 {
            targets.push(format!("dead{}.example", i));
        }

        (targets, fetcher, reachability)
    }

    #[tokio::test]
    async fn test_empty_input_closes_stream() {
        let pipeline = pipeline(4, FakeFetcher::new(), FakeReachability::new());
        assert!(collect(pipeline.spawn(Vec::new())).await.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_host_produces_nothing() {
        let fetcher = FakeFetcher::new().reply("http://dead.example", Reply::Status(200, 1));
        let pipeline = pipeline(2, fetcher, FakeReachability::new());

        let records = collect(pipeline.spawn(vec!["dead.example".to_string()])).await;

        assert!(records.is_empty());
        assert!(pipeline.fetcher.calls().is_empty());
        assert_eq!(pipeline.reachability.attempts("dead.example").len(), 2);
    }

    #[tokio::test]
    async fn test_url_targets_skip_validation() {
        let fetcher = FakeFetcher::new().reply("http://closed.example/x", Reply::Status(500, 3));
        let pipeline = pipeline(2, fetcher, FakeReachability::new());

        let records = collect(pipeline.spawn(vec!["http://closed.example/x".to_string()])).await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status.as_deref(), Some("500 Internal Server Error"));
        assert!(pipeline.reachability.attempts("closed.example").is_empty());
    }

    #[tokio::test]
    async fn test_failed_url_yields_one_error_record() {
        let pipeline = pipeline(2, FakeFetcher::new(), FakeReachability::new());

        let records = collect(pipeline.spawn(vec!["https://refused.example".to_string()])).await;

        assert_eq!(records.len(), 1);
        assert!(records[0].is_error);
        assert!(!records[0].error_message.as_deref().unwrap_or_default().is_empty());
        assert_eq!(pipeline.fetcher.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_host_on_both_ports_is_probed_once() {
        let fetcher = FakeFetcher::new().reply("http://both.example", Reply::Status(200, 1));
        let reachability = FakeReachability::new().open("both.example", &[80, 443]);
        let pipeline = pipeline(8, fetcher, reachability);

        let records = collect(pipeline.spawn(vec!["both.example".to_string()])).await;

        assert_eq!(records.len(), 1);
        assert_eq!(pipeline.fetcher.calls_for("both.example"), vec!["http://both.example"]);
    }

    #[tokio::test]
    async fn test_fallback_bound_per_host() {
        let (targets, fetcher, reachability) = mixed_fixture();
        let pipeline = pipeline(4, fetcher, reachability);

        let records = collect(pipeline.spawn(targets)).await;

        for i in 0..10 {
            let host = format!("live{}.example", i);
            let calls = pipeline.fetcher.calls_for(&host);
            assert!(calls.len() <= 2, "{} fetched {} times", host, calls.len());
            assert_eq!(calls[0], format!("http://{}", host));

            let http_ok = records
                .iter()
                .any(|r| r.host == host && r.proto == Proto::Http && !r.is_error);
            assert_eq!(calls.len() == 2, !http_ok, "{}", host);
        }
    }

    #[tokio::test]
    async fn test_same_records_regardless_of_thread_count() {
        let (targets, fetcher, reachability) = mixed_fixture();
        let mut single = collect(pipeline(1, fetcher, reachability).spawn(targets.clone())).await;

        let (_, fetcher, reachability) = mixed_fixture();
        let mut wide = collect(pipeline(50, fetcher, reachability).spawn(targets)).await;

        single.sort();
        wide.sort();
        assert_eq!(single, wide);

        for i in 0..5 {
            let host = format!("dead{}.example", i);
            assert!(single.iter().all(|r| r.host != host));
        }

        // 4 hosts stop at HTTP, 3 fail HTTP then redirect on HTTPS, 3 fail both;
        // 3 URLs answer and 2 are refused.
        assert_eq!(single.len(), 4 + 3 * 2 + 3 * 2 + 5);
        assert_eq!(single.iter().filter(|r| r.is_error).count(), 3 + 3 * 2 + 2);
    }

    #[tokio::test]
    async fn test_run_collects_report() {
        let (targets, fetcher, reachability) = mixed_fixture();
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path().join("report.json"));

        let report = pipeline(8, fetcher, reachability).run(targets, &store).await;

        assert_eq!(report.len(), 21);
        store.save(&report).unwrap();
        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn test_real_transports_url_mode() {
        let server = serve_once(
            "HTTP/1.1 301 Moved Permanently\r\nLocation: /login\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        let url = format!("http://{}", server.addr);

        let config = ProbeConfig::new()
            .with_threads(2)
            .with_ports(PortSpec::from_ports([Port::HTTP]).unwrap())
            .with_reachability_timeout(Duration::from_millis(200));
        let fetcher = Arc::new(HttpClient::new(Duration::from_secs(5)).unwrap());
        let reachability = Arc::new(TcpReachability::new(config.reachability_timeout));
        let pipeline = Pipeline::new(config, fetcher, reachability);

        let records = collect(pipeline.spawn(vec![url.clone(), "does-not-exist.invalid".to_string()])).await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].url, url);
        assert_eq!(records[0].status.as_deref(), Some("301 Moved Permanently"));
        assert_eq!(records[0].redirect_location.as_deref(), Some("/login"));
    }

    #[tokio::test]
    async fn test_trait_objects() {
        let fetcher: Arc<dyn Fetcher> = Arc::new(FakeFetcher::new().reply("http://a.example", Reply::Status(204, 0)));
        let reachability: Arc<dyn Reachability> = Arc::new(FakeReachability::new().open("a.example", &[443]));
        let pipeline = Pipeline::new(ProbeConfig::new().with_threads(3), fetcher, reachability);

        let records = collect(pipeline.spawn(vec!["a.example".to_string()])).await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status.as_deref(), Some("204 No Content"));
    }
}
