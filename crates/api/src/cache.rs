use std::num::NonZeroUsize;

use lru::LruCache;
use tokio::sync::mpsc::Sender;
use tracing::{debug, info};

use super::{endpoint::Endpoint, response::ClientResponse};

pub enum CacheRequest {
    LastCalled(Endpoint, Sender<CacheResponse>),
    LastResponse(Endpoint, Sender<CacheResponse>),
    Update(Endpoint, ClientResponse),
}

#[derive(Debug, Clone)]
pub enum CacheResponse {
    LastCalled(chrono::DateTime<chrono::Utc>),
    LastResponse(ClientResponse),
    None,
}

/// Remembers, per endpoint, when it was last fetched and what it last
/// returned, so requests can carry `If-Modified-Since` and a 304 can be
/// answered from the stored copy.
#[derive(Debug, Clone)]
pub struct ClientCache {
    pub receiver: Sender<CacheRequest>,
}

struct CacheEntry {
    last_called: chrono::DateTime<chrono::Utc>,
    response: ClientResponse,
}

pub struct CacheInner {
    entries: LruCache<Endpoint, CacheEntry>,
}

impl ClientCache {
    const CLEANUP_INTERVAL: u64 = 100;

    pub fn new() -> Self {
        let (tx, mut rx) = tokio::sync::mpsc::channel::<CacheRequest>(100);
        tokio::spawn(async move {
            let mut inner = CacheInner::new();
            let mut counter = 0;
            while let Some(request) = rx.recv().await {
                inner.handle_request(request).await;
                counter += 1;
                if counter == Self::CLEANUP_INTERVAL {
                    info!("Cleaning up response cache");
                    counter = 0;
                    inner.cleanup();
                }
            }
        });
        Self { receiver: tx }
    }

    pub async fn last_called(&self, endpoint: Endpoint) -> Option<chrono::DateTime<chrono::Utc>> {
        let (tx, mut rx) = tokio::sync::mpsc::channel(1);
        self.receiver
            .send(CacheRequest::LastCalled(endpoint, tx))
            .await
            .ok()?;
        match rx.recv().await? {
            CacheResponse::LastCalled(time) => Some(time),
            _ => None,
        }
    }

    pub async fn update(&self, endpoint: Endpoint, response: ClientResponse) {
        let _ = self
            .receiver
            .send(CacheRequest::Update(endpoint, response))
            .await;
    }

    pub async fn last_response(&self, endpoint: Endpoint) -> Option<ClientResponse> {
        let (tx, mut rx) = tokio::sync::mpsc::channel(1);
        self.receiver
            .send(CacheRequest::LastResponse(endpoint, tx))
            .await
            .ok()?;
        match rx.recv().await? {
            CacheResponse::LastResponse(response) => Some(response),
            _ => None,
        }
    }
}

impl Default for ClientCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheInner {
    const MAX_CACHE_TIME_S: i64 = 60 * 60; // 1 hour
    const MAX_ENTRIES: usize = 256;

    pub fn new() -> Self {
        Self {
            entries: LruCache::new(
                NonZeroUsize::new(Self::MAX_ENTRIES).expect("cache capacity is nonzero"),
            ),
        }
    }

    fn cleanup(&mut self) {
        let now = chrono::Utc::now();
        let stale: Vec<Endpoint> = self
            .entries
            .iter()
            .filter_map(|(k, v)| {
                if now.signed_duration_since(v.last_called).num_seconds() > Self::MAX_CACHE_TIME_S {
                    Some(k.clone())
                } else {
                    None
                }
            })
            .collect();
        for endpoint in stale {
            self.entries.pop(&endpoint);
        }
    }

    pub async fn handle_request(&mut self, request: CacheRequest) {
        match request {
            CacheRequest::LastCalled(endpoint, tx) => {
                self.handle_last_called(&endpoint, tx).await;
            }
            CacheRequest::Update(endpoint, resp) => {
                self.handle_update(endpoint, resp);
            }
            CacheRequest::LastResponse(endpoint, tx) => {
                self.handle_last_response(&endpoint, tx).await;
            }
        }
    }

    async fn handle_last_called(&mut self, endpoint: &Endpoint, tx: Sender<CacheResponse>) {
        let reply = match self.entries.get(endpoint) {
            Some(entry) => {
                debug!("Found last called time for {}", endpoint);
                CacheResponse::LastCalled(entry.last_called)
            }
            None => {
                debug!("No last called time for {}", endpoint);
                CacheResponse::None
            }
        };
        let _ = tx.send(reply).await;
    }

    async fn handle_last_response(&mut self, endpoint: &Endpoint, tx: Sender<CacheResponse>) {
        let reply = match self.entries.get(endpoint) {
            Some(entry) => {
                debug!("Found cached response for {}", endpoint);
                CacheResponse::LastResponse(entry.response.clone())
            }
            None => {
                debug!("No cached response for {}", endpoint);
                CacheResponse::None
            }
        };
        let _ = tx.send(reply).await;
    }

    fn handle_update(&mut self, endpoint: Endpoint, response: ClientResponse) {
        debug!("Updating cache for {}", endpoint);
        self.entries.put(
            endpoint,
            CacheEntry {
                last_called: chrono::Utc::now(),
                response,
            },
        );
    }
}

impl Default for CacheInner {
    fn default() -> Self {
        Self::new()
    }
}
