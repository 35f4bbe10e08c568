use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, Mutex, PoisonError, RwLock, Weak},
    time::Duration,
};

use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::Throttle;
use crate::{config::ThrottleConfig, error::CoreError, metrics::MetricsHandle};

/// Concurrent registry of per-key [`Throttle`]s with a background cleaner.
///
/// Every key shares the window and limit given at construction. Throttles are
/// created on first use and evicted by the cleaner once all of their stamps
/// have expired.
///
/// Locking:
/// - `record` holds the registry read lock while it locks the key's own mutex,
///   so unrelated keys never wait on each other;
/// - the cleaner prunes under the read lock and removes idle entries under the
///   write lock after re-checking them, so an admission that slips in between
///   keeps its entry alive.
///
/// The cleaner stops when the map is dropped.
pub struct ThrottleMap {
    shared: Arc<Shared>,
    cancel: CancellationToken,
}

struct Shared {
    window: Duration,
    limit: usize,
    throttles: RwLock<HashMap<String, Mutex<Throttle>>>,
    metrics: MetricsHandle,
}

impl ThrottleMap {
    /// Build the map and start its cleaner on the current tokio runtime.
    pub fn spawn(cfg: &ThrottleConfig, metrics: MetricsHandle) -> Result<Self, CoreError> {
        cfg.validate()?;
        let rt = tokio::runtime::Handle::try_current().map_err(|_| CoreError::NoRuntime)?;

        let shared = Arc::new(Shared {
            window: cfg.window(),
            limit: cfg.limit,
            throttles: RwLock::new(HashMap::new()),
            metrics,
        });
        let cancel = CancellationToken::new();
        rt.spawn(run_cleaner(
            Arc::downgrade(&shared),
            cfg.cleaner_period(),
            cancel.clone(),
        ));

        debug!(
            window_secs = cfg.window_secs,
            limit = cfg.limit,
            cleaner_secs = cfg.cleaner_secs,
            "throttle map started"
        );
        Ok(Self { shared, cancel })
    }

    /// Admit or reject one event for `key`.
    pub fn record(&self, key: &str) -> bool {
        let admitted = self.shared.record(key, Instant::now());
        self.shared.metrics.record_admission(admitted);
        admitted
    }

    /// Run one cleaner pass immediately. Returns the number of keys evicted.
    pub fn sweep(&self) -> usize {
        self.shared.sweep(Instant::now())
    }

    /// Live keys and their current queue lengths.
    ///
    /// The cleaner runs concurrently, so a key's presence or absence here is
    /// only a point-in-time observation.
    pub fn snapshot(&self) -> BTreeMap<String, usize> {
        let map = self.shared.read();
        map.iter()
            .map(|(k, t)| (k.clone(), lock(t).queue_len()))
            .collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.shared.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.shared.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.read().is_empty()
    }
}

impl Drop for ThrottleMap {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl Shared {
    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Mutex<Throttle>>> {
        self.throttles.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Mutex<Throttle>>> {
        self.throttles.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, key: &str, now: Instant) -> bool {
        {
            let map = self.read();
            if let Some(t) = map.get(key) {
                return lock(t).record_at(now);
            }
        }

        let mut map = self.write();
        let t = map.entry(key.to_string()).or_insert_with(|| {
            trace!(key, "creating throttle");
            Mutex::new(Throttle::new(self.window, self.limit))
        });
        t.get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .record_at(now)
    }

    fn sweep(&self, now: Instant) -> usize {
        let idle: Vec<String> = {
            let map = self.read();
            map.iter()
                .filter_map(|(k, t)| {
                    let mut t = lock(t);
                    t.remove_expired_at(now);
                    t.is_empty().then(|| k.clone())
                })
                .collect()
        };
        if idle.is_empty() {
            return 0;
        }

        let mut map = self.write();
        let mut evicted = 0;
        for key in idle {
            let still_idle = map.get_mut(&key).is_some_and(|t| {
                t.get_mut()
                    .unwrap_or_else(PoisonError::into_inner)
                    .is_empty()
            });
            if still_idle {
                map.remove(&key);
                trace!(key = %key, "evicted idle throttle");
                evicted += 1;
            }
        }
        evicted
    }
}

fn lock(t: &Mutex<Throttle>) -> std::sync::MutexGuard<'_, Throttle> {
    t.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn run_cleaner(shared: Weak<Shared>, period: Duration, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let Some(shared) = shared.upgrade() else {
                    break;
                };
                let evicted = shared.sweep(Instant::now());
                if evicted > 0 {
                    debug!(evicted, remaining = shared.read().len(), "throttle cleaner pass");
                    shared.metrics.record_evictions(evicted as u64);
                }
            }
        }
    }
    trace!("throttle cleaner stopped");
}
