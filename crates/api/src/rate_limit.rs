use tokio::sync::mpsc::Sender;
use tracing::{debug, error};

#[derive(Debug, Clone)]
pub struct RateLimiter {
    rate_limit_per_interval: usize,
    interval_duration_ms: u128,
    timestamps: Vec<u128>,
}

impl RateLimiter {
    pub fn new(rate_limit_per_interval: usize, interval_duration_ms: u128) -> Self {
        assert!(rate_limit_per_interval > 0);
        Self {
            rate_limit_per_interval,
            interval_duration_ms,
            timestamps: vec![],
        }
    }

    fn now() -> u128 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system clock before unix epoch")
            .as_millis()
    }

    async fn rate_limit(&mut self) {
        let now = Self::now();
        self.timestamps.retain(|&t| t > now);
        if self.timestamps.len() >= self.rate_limit_per_interval {
            let sleep_duration = self.timestamps[0] - now;
            debug!("Rate limiting: sleeping for {} ms", sleep_duration);
            self.timestamps
                .push(now + sleep_duration + self.interval_duration_ms);
            tokio::time::sleep(std::time::Duration::from_millis(sleep_duration as u64)).await;
        } else {
            self.timestamps.push(now + self.interval_duration_ms);
        }
    }
}

/// HTTP transport that funnels every request through a worker enforcing
/// the upstream's published request budget.
#[derive(Debug, Clone)]
pub struct RateLimitedClient {
    receiver: Sender<ClientRequest>,
}

type TransportResult = Result<reqwest::Response, reqwest::Error>;

struct ClientRequest {
    request: reqwest::Request,
    reply: Sender<TransportResult>,
}

impl RateLimitedClient {
    // The upstream catalog allows 40 requests per 10 seconds.
    const DEFAULT_RATE_LIMIT: usize = 40;
    const DEFAULT_INTERVAL_MS: u128 = 10_000;

    pub fn new(rate_limit_per_interval: usize, interval_duration_ms: u128) -> Self {
        let (tx, mut rx) = tokio::sync::mpsc::channel::<ClientRequest>(100);
        tokio::spawn(async move {
            let mut rl = RateLimiter::new(rate_limit_per_interval, interval_duration_ms);
            let client = reqwest::Client::new();
            while let Some(ClientRequest { request, reply }) = rx.recv().await {
                rl.rate_limit().await;
                let client = client.clone();
                tokio::spawn(async move {
                    let response = client.execute(request).await;
                    if reply.send(response).await.is_err() {
                        error!("Transport reply dropped before delivery");
                    }
                });
            }
        });
        Self { receiver: tx }
    }

    pub async fn execute(&self, request: reqwest::Request) -> TransportResult {
        let (tx, mut rx) = tokio::sync::mpsc::channel(1);
        debug!("Dispatching {}", request.url().path());
        self.receiver
            .send(ClientRequest { request, reply: tx })
            .await
            .expect("transport worker is never dropped while a client handle exists");
        rx.recv()
            .await
            .expect("transport worker always answers each dispatched request")
    }
}

impl Default for RateLimitedClient {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RATE_LIMIT, Self::DEFAULT_INTERVAL_MS)
    }
}
