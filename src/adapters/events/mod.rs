//! Event bus adapters.
//!
//! Adapters implement the event publishing port for different
//! environments:
//!
//! - `InMemoryEventBus` - Synchronous, in-process bus for testing

mod in_memory;

pub use in_memory::InMemoryEventBus;
