//! Background loading with a single active request.
//!
//! A [`NewsLoader`] runs each load on a tokio worker, never on the calling
//! thread, so a UI thread can start loads without blocking. Starting a new load
//! supersedes the previous one: the old task is aborted and its handle resolves
//! to `None`. Aborting drops the request future at its next await point, so a
//! socket read already in progress may still run briefly.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use log::{debug, warn};
use tokio::runtime::Handle;
use tokio::task::{AbortHandle, JoinHandle};

use crate::client::NewsClient;
use crate::model::FeedResult;

pub struct NewsLoader {
    client: Arc<NewsClient>,
    runtime: Handle,
    generation: Arc<AtomicU64>,
    active: Mutex<Option<AbortHandle>>,
}

/// Pending result of [`NewsLoader::load`]
pub struct LoadHandle {
    task: JoinHandle<FeedResult>,
    generation: u64,
    current: Arc<AtomicU64>,
}

impl NewsLoader {
    /// Loader that spawns its work on `runtime`
    pub fn new(client: Arc<NewsClient>, runtime: Handle) -> Self {
        Self {
            client,
            runtime,
            generation: Arc::new(AtomicU64::new(0)),
            active: Mutex::new(None),
        }
    }

    /// Loader bound to the runtime of the calling async context.
    ///
    /// Panics outside a tokio runtime, like [`Handle::current`].
    pub fn for_current_runtime(client: Arc<NewsClient>) -> Self {
        Self::new(client, Handle::current())
    }

    /// Start loading articles for `query`, superseding any load in flight
    pub fn load(&self, query: impl Into<String>) -> LoadHandle {
        let query = query.into();
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = active.take() {
            debug!("Superseding load {}", generation - 1);
            previous.abort();
        }

        let client = Arc::clone(&self.client);
        let task = self
            .runtime
            .spawn(async move { client.request_articles(&query).await });
        *active = Some(task.abort_handle());

        LoadHandle {
            task,
            generation,
            current: Arc::clone(&self.generation),
        }
    }

    /// Drop the outstanding load, if any; its handle resolves to `None`
    pub fn reset(&self) {
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(previous) = active.take() {
            previous.abort();
        }
    }
}

impl LoadHandle {
    /// True while no newer load or reset has happened
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }

    /// Wait for the load.
    ///
    /// Returns `None` when the load was superseded or reset, even if it had
    /// already finished, so stale results never reach the caller. A load that
    /// panicked is logged and also yields `None`.
    pub async fn outcome(self) -> Option<FeedResult> {
        let result = match self.task.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => {
                warn!("Load {} panicked: {}", self.generation, e);
                return None;
            }
            Err(_) => return None,
        };
        if self.current.load(Ordering::SeqCst) == self.generation {
            Some(result)
        } else {
            None
        }
    }
}
