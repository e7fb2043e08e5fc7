//! Core types for twgcals.
//!
//! This crate holds everything that does not talk to the outside world:
//! - calendar, event and task types
//! - the `CalendarSource` and `TaskStore` interfaces
//! - the `Synchronizer` that turns upcoming events into tasks

pub mod calendar;
pub mod error;
pub mod event;
pub mod settings;
pub mod source;
pub mod store;
pub mod sync;
pub mod task;
pub mod window;

pub use calendar::{Calendar, Project};
pub use error::{SyncError, SyncResult};
pub use event::{Event, EventTime};
pub use settings::SyncSettings;
pub use source::CalendarSource;
pub use store::TaskStore;
pub use sync::{EventOutcome, SyncReport, Synchronizer};
pub use task::{DedupStrategy, MatchKey, NewTask, TaskFilter};
pub use window::LookaheadWindow;
