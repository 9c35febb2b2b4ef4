use async_trait::async_trait;

use crate::engine::SchedulingError;
use crate::model::{Event, EventId, RoomId, TimeRange};

/// Opaque storage failure. The scheduler never inspects it beyond the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryError(pub String);

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for RepositoryError {}

impl From<RepositoryError> for SchedulingError {
    fn from(e: RepositoryError) -> Self {
        SchedulingError::PersistenceFailure(e.0)
    }
}

pub type RepoResult<T> = Result<T, RepositoryError>;

/// Durable storage for events, provided by the host application.
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn save(&self, event: Event) -> RepoResult<Event>;

    async fn update(&self, event: Event) -> RepoResult<Event>;

    async fn find_by_id(&self, id: EventId) -> RepoResult<Option<Event>>;

    /// Exact match; names are unique across all statuses.
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Event>>;

    /// Scheduled events of one room, ordered by start.
    async fn find_by_room(&self, room_id: RoomId) -> RepoResult<Vec<Event>>;

    /// Scheduled events in `room_id` whose range overlaps `range` under
    /// half-open semantics.
    async fn find_overlapping(&self, room_id: RoomId, range: &TimeRange) -> RepoResult<Vec<Event>>;

    async fn find_all(&self) -> RepoResult<Vec<Event>>;
}
