use crate::model::{EventId, Ms, RoomId, TimeRange};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    InvalidTimeRange {
        start: Ms,
        end: Ms,
    },
    PastSchedule {
        start: Ms,
        now: Ms,
    },
    OverlapConflict {
        room_id: RoomId,
        range: TimeRange,
        conflicting: EventId,
    },
    DuplicateName(String),
    EventNotFound(String),
    AlreadyCancelled(String),
    InvalidName,
    LimitExceeded(&'static str),
    PersistenceFailure(String),
}

impl SchedulingError {
    /// Stable label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SchedulingError::InvalidTimeRange { .. } => "invalid_time_range",
            SchedulingError::PastSchedule { .. } => "past_schedule",
            SchedulingError::OverlapConflict { .. } => "overlap_conflict",
            SchedulingError::DuplicateName(_) => "duplicate_name",
            SchedulingError::EventNotFound(_) => "event_not_found",
            SchedulingError::AlreadyCancelled(_) => "already_cancelled",
            SchedulingError::InvalidName => "invalid_name",
            SchedulingError::LimitExceeded(_) => "limit_exceeded",
            SchedulingError::PersistenceFailure(_) => "persistence_failure",
        }
    }
}

impl std::fmt::Display for SchedulingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulingError::InvalidTimeRange { start, end } => {
                write!(f, "invalid time range: start {start} must be before end {end}")
            }
            SchedulingError::PastSchedule { start, now } => {
                write!(f, "cannot schedule in the past: start {start} is before now {now}")
            }
            SchedulingError::OverlapConflict {
                room_id,
                range,
                conflicting,
            } => write!(
                f,
                "[{}, {}) in room {room_id} overlaps event {conflicting}",
                range.start(),
                range.end()
            ),
            SchedulingError::DuplicateName(name) => {
                write!(f, "event with name \"{name}\" already exists")
            }
            SchedulingError::EventNotFound(name) => {
                write!(f, "event with name \"{name}\" not found")
            }
            SchedulingError::AlreadyCancelled(name) => {
                write!(f, "event \"{name}\" is already cancelled")
            }
            SchedulingError::InvalidName => write!(f, "event name must not be empty"),
            SchedulingError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
            SchedulingError::PersistenceFailure(e) => write!(f, "persistence failure: {e}"),
        }
    }
}

impl std::error::Error for SchedulingError {}
