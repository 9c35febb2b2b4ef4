use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::model::*;
use crate::repository::{EventRepository, RepoResult, RepositoryError};

/// Per-room index entry: `(start, id)`, kept sorted.
type RoomSlot = (Ms, EventId);

/// DashMap-backed repository. Enforces id and name uniqueness on `save`.
pub struct InMemoryEventRepository {
    events: DashMap<EventId, Event>,
    /// Name → id, across all statuses.
    names: DashMap<String, EventId>,
    /// Room → every event in the room, sorted by start.
    rooms: DashMap<RoomId, Vec<RoomSlot>>,
}

impl Default for InMemoryEventRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self {
            events: DashMap::new(),
            names: DashMap::new(),
            rooms: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    // ── Room index ───────────────────────────────────────────

    fn index_room(&self, event: &Event) {
        let mut slots = self.rooms.entry(event.room_id).or_default();
        let slot = (event.range.start(), event.id);
        let pos = slots.binary_search(&slot).unwrap_or_else(|e| e);
        slots.insert(pos, slot);
    }

    fn unindex_room(&self, event: &Event) {
        if let Some(mut slots) = self.rooms.get_mut(&event.room_id) {
            slots.retain(|(_, id)| *id != event.id);
        }
    }

    /// Ids of events in the room that start before `before`, in start order.
    fn room_ids_starting_before(&self, room_id: RoomId, before: Ms) -> Vec<EventId> {
        match self.rooms.get(&room_id) {
            Some(slots) => {
                // Everything at index >= right_bound starts at or after `before` → can't overlap.
                let right_bound = slots.partition_point(|(start, _)| *start < before);
                slots[..right_bound].iter().map(|(_, id)| *id).collect()
            }
            None => Vec::new(),
        }
    }

    fn scheduled_events(&self, ids: Vec<EventId>) -> Vec<Event> {
        ids.into_iter()
            .filter_map(|id| self.events.get(&id).map(|e| e.value().clone()))
            .filter(|e| e.is_scheduled())
            .collect()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn save(&self, event: Event) -> RepoResult<Event> {
        if self.events.contains_key(&event.id) {
            return Err(RepositoryError(format!("duplicate event id {}", event.id)));
        }
        match self.names.entry(event.name.clone()) {
            Entry::Occupied(_) => {
                return Err(RepositoryError(format!(
                    "unique constraint violated on name \"{}\"",
                    event.name
                )));
            }
            Entry::Vacant(slot) => {
                slot.insert(event.id);
            }
        }
        self.index_room(&event);
        self.events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn update(&self, event: Event) -> RepoResult<Event> {
        let previous = match self.events.get(&event.id) {
            Some(e) => e.value().clone(),
            None => return Err(RepositoryError(format!("no event with id {}", event.id))),
        };
        if previous.name != event.name {
            return Err(RepositoryError("event name cannot be changed".into()));
        }
        if previous.room_id != event.room_id || previous.range != event.range {
            self.unindex_room(&previous);
            self.index_room(&event);
        }
        self.events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn find_by_id(&self, id: EventId) -> RepoResult<Option<Event>> {
        Ok(self.events.get(&id).map(|e| e.value().clone()))
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Event>> {
        let id = match self.names.get(name) {
            Some(id) => *id,
            None => return Ok(None),
        };
        Ok(self.events.get(&id).map(|e| e.value().clone()))
    }

    async fn find_by_room(&self, room_id: RoomId) -> RepoResult<Vec<Event>> {
        Ok(self.scheduled_events(self.room_ids_starting_before(room_id, Ms::MAX)))
    }

    async fn find_overlapping(&self, room_id: RoomId, range: &TimeRange) -> RepoResult<Vec<Event>> {
        let candidates = self.room_ids_starting_before(room_id, range.end());
        Ok(self
            .scheduled_events(candidates)
            .into_iter()
            .filter(|e| e.range.overlaps(range))
            .collect())
    }

    async fn find_all(&self) -> RepoResult<Vec<Event>> {
        let mut all: Vec<Event> = self.events.iter().map(|e| e.value().clone()).collect();
        all.sort_by_key(|e| (e.range.start(), e.id));
        Ok(all)
    }
}
