//! Analytics command handlers.

mod process_event;
mod track_event;

pub use process_event::{
    ProcessEventCommand, ProcessEventHandler, ProcessEventResult, ProcessPendingResult,
};
pub use track_event::{TrackEventCommand, TrackEventHandler, TrackEventResult};
