pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use errors::{ConfigError, NtviewError};
pub use events::{Event, EventBus, Position, ReaderKind, ReadingEvent};
pub use id::{new_id, VisitId};
pub use types::{BoundingRect, Edge, ElementId, Sides, Size};

pub type Result<T> = std::result::Result<T, NtviewError>;
