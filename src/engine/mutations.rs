use tracing::info;

use crate::model::*;

use super::conflict::{validate_creation, validate_event_span, validate_name};
use super::{rejected, EventService, SchedulingError};

impl EventService {
    /// Book `room_id` for `[start, end)` under a globally unique `name`.
    ///
    /// The name is trimmed before use. Nothing is persisted unless every check
    /// passes.
    pub async fn create_event(
        &self,
        name: &str,
        room_id: RoomId,
        start: Ms,
        end: Ms,
    ) -> Result<Event, SchedulingError> {
        self.try_create_event(name, room_id, start, end)
            .await
            .map_err(|e| rejected("create_event", e))
    }

    async fn try_create_event(
        &self,
        name: &str,
        room_id: RoomId,
        start: Ms,
        end: Ms,
    ) -> Result<Event, SchedulingError> {
        let name = validate_name(name, self.config.max_name_len)?;
        // Pure checks first; no locks or storage needed to reject these.
        let range = validate_creation(TimeRange::new(start, end), room_id, self.now(), &[])?;
        validate_event_span(&range, &self.config)?;

        let _name_guard = self.lock_name(&name).await;
        if self
            .repo_call("find_by_name", self.repo().find_by_name(&name))
            .await?
            .is_some()
        {
            return Err(SchedulingError::DuplicateName(name));
        }

        let _room_guard = self.lock_room(room_id).await;
        let existing = self
            .repo_call("find_overlapping", self.repo().find_overlapping(room_id, &range))
            .await?;
        let now = self.now();
        let range = validate_creation(Ok(range), room_id, now, &existing)?;

        let event = Event::scheduled(name, room_id, range, now);
        let saved = self.repo_call("save", self.repo().save(event)).await?;
        info!(
            "event created: \"{}\" ({}) in room {} [{}, {})",
            saved.name,
            saved.id,
            saved.room_id,
            saved.range.start(),
            saved.range.end()
        );
        metrics::counter!(crate::observability::EVENTS_CREATED_TOTAL).increment(1);
        Ok(saved)
    }

    /// Cancel the event called `name`. A second cancel fails `AlreadyCancelled`.
    pub async fn cancel_event(&self, name: &str) -> Result<Event, SchedulingError> {
        self.try_cancel_event(name)
            .await
            .map_err(|e| rejected("cancel_event", e))
    }

    async fn try_cancel_event(&self, name: &str) -> Result<Event, SchedulingError> {
        let _name_guard = self.lock_name(name).await;
        let mut event = self
            .repo_call("find_by_name", self.repo().find_by_name(name))
            .await?
            .ok_or_else(|| SchedulingError::EventNotFound(name.to_string()))?;
        event.cancel(self.now())?;

        let updated = self.repo_call("update", self.repo().update(event)).await?;
        info!("event cancelled: \"{}\" ({})", updated.name, updated.id);
        metrics::counter!(crate::observability::EVENTS_CANCELLED_TOTAL).increment(1);
        Ok(updated)
    }
}
