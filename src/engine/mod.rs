mod conflict;
mod error;
mod mutations;
pub mod occupancy;
mod queries;
mod store;

pub use conflict::{validate_creation, validate_name};
pub use error::SchedulingError;
pub use store::InMemoryEventRepository;

use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::clock::{Clock, SystemClock};
use crate::config::SchedulerConfig;
use crate::model::*;
use crate::repository::{EventRepository, RepoResult};

type KeyLock = Arc<Mutex<()>>;

/// Held lock on one key of a lock map. On drop the lock is released and the
/// map entry is removed unless another task still holds or awaits it, so the
/// maps only hold keys with requests in flight.
pub(super) struct KeyGuard<'a, K: Eq + Hash> {
    map: &'a DashMap<K, KeyLock>,
    key: K,
    guard: Option<OwnedMutexGuard<()>>,
}

impl<'a, K: Eq + Hash + Clone> KeyGuard<'a, K> {
    async fn acquire(map: &'a DashMap<K, KeyLock>, key: K) -> Self {
        // Clone the Arc out so the DashMap shard guard is released before awaiting.
        let lock = map.entry(key.clone()).or_default().clone();
        let guard = lock.lock_owned().await;
        Self {
            map,
            key,
            guard: Some(guard),
        }
    }
}

impl<K: Eq + Hash> Drop for KeyGuard<'_, K> {
    fn drop(&mut self) {
        self.guard.take();
        // Waiters hold their own clone of the Arc, so a count of 1 means only
        // the map references the lock. `remove_if` runs under the shard lock,
        // which `entry` also takes, so no new waiter can slip in between.
        self.map
            .remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 1);
    }
}

/// Orchestrates validation, conflict lookup, persistence and lifecycle
/// transitions for events.
///
/// The repository alone cannot make check-then-insert atomic, so the service
/// serializes writers itself: a per-name lock covers the uniqueness check and
/// cancellation, a per-room lock covers the conflict read and the insert.
/// Locks are always taken name first, then room.
pub struct EventService {
    repo: Arc<dyn EventRepository>,
    clock: Arc<dyn Clock>,
    config: SchedulerConfig,
    room_locks: DashMap<RoomId, KeyLock>,
    name_locks: DashMap<String, KeyLock>,
}

impl EventService {
    pub fn new(repo: Arc<dyn EventRepository>, clock: Arc<dyn Clock>, config: SchedulerConfig) -> Self {
        Self {
            repo,
            clock,
            config,
            room_locks: DashMap::new(),
            name_locks: DashMap::new(),
        }
    }

    /// Service over an in-memory repository and the system clock.
    pub fn in_memory(config: SchedulerConfig) -> Self {
        Self::new(
            Arc::new(InMemoryEventRepository::new()),
            Arc::new(SystemClock),
            config,
        )
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub(super) fn now(&self) -> Ms {
        self.clock.now_ms()
    }

    pub(super) async fn lock_room(&self, room_id: RoomId) -> KeyGuard<'_, RoomId> {
        KeyGuard::acquire(&self.room_locks, room_id).await
    }

    pub(super) async fn lock_name(&self, name: &str) -> KeyGuard<'_, String> {
        KeyGuard::acquire(&self.name_locks, name.to_string()).await
    }

    /// Run a repository call, recording latency and mapping its error.
    pub(super) async fn repo_call<T>(
        &self,
        op: &'static str,
        fut: impl Future<Output = RepoResult<T>>,
    ) -> Result<T, SchedulingError> {
        let started = std::time::Instant::now();
        let result = fut.await;
        metrics::histogram!(crate::observability::REPOSITORY_CALL_DURATION_SECONDS, "op" => op)
            .record(started.elapsed().as_secs_f64());
        result.map_err(|e| {
            tracing::warn!("repository {op} failed: {e}");
            SchedulingError::from(e)
        })
    }

    pub(super) fn repo(&self) -> &dyn EventRepository {
        self.repo.as_ref()
    }
}

/// Count a rejected request and pass the error through.
pub(super) fn rejected(op: &'static str, err: SchedulingError) -> SchedulingError {
    tracing::debug!("{op} rejected: {err}");
    metrics::counter!(
        crate::observability::REQUESTS_REJECTED_TOTAL,
        "op" => op,
        "reason" => err.kind()
    )
    .increment(1);
    err
}
