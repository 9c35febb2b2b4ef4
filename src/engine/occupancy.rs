use std::collections::BTreeMap;

use crate::model::*;

/// Aggregate events by room as of `now`.
///
/// Rooms come only from the events themselves, so a room with no events never
/// appears. Rooms are listed by id; each room's events by start time.
pub fn generate(events: &[Event], now: Ms) -> OccupancyReport {
    let mut by_room: BTreeMap<RoomId, Vec<Event>> = BTreeMap::new();
    for event in events {
        by_room.entry(event.room_id).or_default().push(event.clone());
    }

    let mut report = OccupancyReport {
        rooms: Vec::with_capacity(by_room.len()),
        total_rooms: by_room.len(),
        total_events: 0,
        active_events: 0,
        currently_active_events: 0,
        generated_at: now,
    };

    for (room_id, mut room_events) in by_room {
        room_events.sort_by_key(|e| (e.range.start(), e.id));
        let active = room_events.iter().filter(|e| e.is_scheduled()).count();
        let current = room_events
            .iter()
            .filter(|e| e.is_currently_active(now))
            .count();

        report.total_events += room_events.len();
        report.active_events += active;
        report.currently_active_events += current;
        report.rooms.push(RoomOccupancy {
            room_id,
            total_events: room_events.len(),
            active_events: active,
            currently_active_events: current,
            events: room_events,
        });
    }

    report
}
