use crate::config::SchedulerConfig;
use crate::model::*;

use super::SchedulingError;

/// Decide whether a candidate range may be booked in `room_id`.
///
/// Checks run in a fixed order: malformed range, start in the past, then
/// overlap with a scheduled event of the same room. Events of other rooms
/// and cancelled events in `existing` are ignored.
pub fn validate_creation(
    candidate: Result<TimeRange, SchedulingError>,
    room_id: RoomId,
    now: Ms,
    existing: &[Event],
) -> Result<TimeRange, SchedulingError> {
    let range = candidate?;
    if range.start() < now {
        return Err(SchedulingError::PastSchedule {
            start: range.start(),
            now,
        });
    }
    check_no_conflict(&range, room_id, existing)?;
    Ok(range)
}

pub(crate) fn check_no_conflict(
    range: &TimeRange,
    room_id: RoomId,
    existing: &[Event],
) -> Result<(), SchedulingError> {
    let clash = existing
        .iter()
        .filter(|e| e.room_id == room_id && e.is_scheduled())
        .find(|e| e.range.overlaps(range));
    match clash {
        Some(e) => Err(SchedulingError::OverlapConflict {
            room_id,
            range: *range,
            conflicting: e.id,
        }),
        None => Ok(()),
    }
}

/// Trim and check an event name. Returns the trimmed form.
pub fn validate_name(raw: &str, max_len: Option<usize>) -> Result<String, SchedulingError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(SchedulingError::InvalidName);
    }
    if max_len.is_some_and(|max| name.len() > max) {
        return Err(SchedulingError::LimitExceeded("event name too long"));
    }
    Ok(name.to_string())
}

// `duration_ms` saturates, so these comparisons hold for ranges spanning the
// whole i64 line.

pub(crate) fn validate_event_span(range: &TimeRange, config: &SchedulerConfig) -> Result<(), SchedulingError> {
    if config.max_event_duration_ms.is_some_and(|max| range.duration_ms() > max) {
        return Err(SchedulingError::LimitExceeded("event too long"));
    }
    Ok(())
}

pub(crate) fn validate_query_window(window: &TimeRange, config: &SchedulerConfig) -> Result<(), SchedulingError> {
    if config.max_query_window_ms.is_some_and(|max| window.duration_ms() > max) {
        return Err(SchedulingError::LimitExceeded("query window too wide"));
    }
    Ok(())
}
