//! Runtime plumbing for the Parliamentarium: subscriber setup and the
//! layer that streams council events to an observer.

pub mod logging;
pub mod tracing_layer;

pub use logging::{LoggingGuard, LoggingOptions};
pub use tracing_layer::{CouncilEvent, CouncilEventLayer};
