pub mod drag;
pub mod form;
pub mod queue;
pub mod render;
pub mod routes;

pub use queue::{BotStatus, CurrentTrack, Placement, QueueItem, QueueOrder, QueueSnapshot};
