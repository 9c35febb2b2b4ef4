use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::engine::SchedulingError;

/// Unix milliseconds — the only time type.
pub type Ms = i64;

pub type EventId = Ulid;

/// Opaque reference to a room owned outside this crate.
pub type RoomId = Ulid;

const MS_PER_MINUTE: Ms = 60_000;

/// Half-open interval `[start, end)` with `start < end`.
///
/// Fields are private so a `TimeRange` can only exist in its valid form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RangeParts")]
pub struct TimeRange {
    start: Ms,
    end: Ms,
}

#[derive(Deserialize)]
struct RangeParts {
    start: Ms,
    end: Ms,
}

impl TryFrom<RangeParts> for TimeRange {
    type Error = SchedulingError;

    fn try_from(parts: RangeParts) -> Result<Self, Self::Error> {
        TimeRange::new(parts.start, parts.end)
    }
}

impl TimeRange {
    pub fn new(start: Ms, end: Ms) -> Result<Self, SchedulingError> {
        if start >= end {
            return Err(SchedulingError::InvalidTimeRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Ms {
        self.start
    }

    pub fn end(&self) -> Ms {
        self.end
    }

    /// Width in ms, saturating at `Ms::MAX` for ranges spanning more than
    /// the whole `i64` line.
    pub fn duration_ms(&self) -> Ms {
        self.end.saturating_sub(self.start)
    }

    /// Whole minutes, truncated.
    pub fn duration_minutes(&self) -> i64 {
        self.duration_ms() / MS_PER_MINUTE
    }

    /// Touching ranges (`self.end == other.start`) do not overlap, so
    /// back-to-back bookings are allowed.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, instant: Ms) -> bool {
        self.start <= instant && instant < self.end
    }

    pub fn is_past(&self, now: Ms) -> bool {
        self.end < now
    }

    pub fn is_future(&self, now: Ms) -> bool {
        self.start > now
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    Scheduled,
    Cancelled,
}

/// A booking of one room for one time range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub room_id: RoomId,
    pub range: TimeRange,
    pub status: EventStatus,
    pub created_at: Ms,
    pub updated_at: Ms,
}

impl Event {
    /// A freshly scheduled event. Callers are expected to have validated
    /// `name` and checked for conflicts already.
    pub fn scheduled(name: String, room_id: RoomId, range: TimeRange, now: Ms) -> Self {
        Self {
            id: Ulid::new(),
            name,
            room_id,
            range,
            status: EventStatus::Scheduled,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.status == EventStatus::Scheduled
    }

    /// One-way transition. A second call is an error, not a no-op.
    pub fn cancel(&mut self, now: Ms) -> Result<(), SchedulingError> {
        if !self.is_scheduled() {
            return Err(SchedulingError::AlreadyCancelled(self.name.clone()));
        }
        self.status = EventStatus::Cancelled;
        self.updated_at = now;
        Ok(())
    }

    pub fn is_currently_active(&self, now: Ms) -> bool {
        self.is_scheduled() && self.range.contains(now)
    }

    /// Global window filter for queries. Conflict detection is room-scoped
    /// and does not go through here.
    pub fn is_active_in_window(&self, window: &TimeRange) -> bool {
        self.is_scheduled() && self.range.overlaps(window)
    }

    pub fn duration_minutes(&self) -> i64 {
        self.range.duration_minutes()
    }
}

// ── Query result types ───────────────────────────────────────────

/// Per-room slice of an occupancy report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomOccupancy {
    pub room_id: RoomId,
    pub total_events: usize,
    pub active_events: usize,
    pub currently_active_events: usize,
    /// Every event in the room, any status, ordered by start.
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccupancyReport {
    pub rooms: Vec<RoomOccupancy>,
    pub total_rooms: usize,
    pub total_events: usize,
    pub active_events: usize,
    pub currently_active_events: usize,
    pub generated_at: Ms,
}
