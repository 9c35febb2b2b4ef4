use crate::model::*;

use super::conflict::validate_query_window;
use super::occupancy;
use super::{rejected, EventService, SchedulingError};

impl EventService {
    /// Scheduled events, in any room, overlapping `[window_start, window_end)`,
    /// ordered by start.
    pub async fn query_events(&self, window_start: Ms, window_end: Ms) -> Result<Vec<Event>, SchedulingError> {
        let window = TimeRange::new(window_start, window_end)
            .and_then(|w| validate_query_window(&w, &self.config).map(|()| w))
            .map_err(|e| rejected("query_events", e))?;

        let mut hits: Vec<Event> = self
            .repo_call("find_all", self.repo().find_all())
            .await?
            .into_iter()
            .filter(|e| e.is_active_in_window(&window))
            .collect();
        hits.sort_by_key(|e| (e.range.start(), e.id));
        Ok(hits)
    }

    pub async fn currently_active_events(&self) -> Result<Vec<Event>, SchedulingError> {
        let now = self.now();
        let mut active: Vec<Event> = self
            .repo_call("find_all", self.repo().find_all())
            .await?
            .into_iter()
            .filter(|e| e.is_currently_active(now))
            .collect();
        active.sort_by_key(|e| (e.range.start(), e.id));
        Ok(active)
    }

    pub async fn get_event(&self, name: &str) -> Result<Event, SchedulingError> {
        self.repo_call("find_by_name", self.repo().find_by_name(name))
            .await?
            .ok_or_else(|| SchedulingError::EventNotFound(name.to_string()))
    }

    /// Scheduled events of one room, ordered by start.
    pub async fn events_in_room(&self, room_id: RoomId) -> Result<Vec<Event>, SchedulingError> {
        self.repo_call("find_by_room", self.repo().find_by_room(room_id))
            .await
    }

    pub async fn occupancy_report(&self) -> Result<OccupancyReport, SchedulingError> {
        let all = self.repo_call("find_all", self.repo().find_all()).await?;
        Ok(occupancy::generate(&all, self.now()))
    }
}
