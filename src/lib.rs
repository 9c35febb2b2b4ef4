pub mod clock;
pub mod config;
pub mod engine;
pub mod model;
pub mod observability;
pub mod repository;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::SchedulerConfig;
pub use engine::{EventService, InMemoryEventRepository, SchedulingError};
pub use model::{Event, EventId, EventStatus, Ms, OccupancyReport, RoomId, RoomOccupancy, TimeRange};
pub use repository::{EventRepository, RepositoryError};
