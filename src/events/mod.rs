//! Supervision events: data model and sink fan-out.
//!
//! ## Contents
//! - [`EventId`], [`Severity`], [`SupervisorEvent`] — event classification and
//!   payload metadata
//! - [`EventSink`], [`SinkSet`] — the interface the external logging component
//!   implements, and the panic-isolating fan-out the supervisor emits through
//! - [`LogWriter`] — built-in stdout sink with a runtime severity filter
//!   (feature `logging`)

mod event;
mod sink;

pub use event::{EventId, Severity, SupervisorEvent};
pub use sink::{EventSink, SinkSet};

#[cfg(feature = "logging")]
mod log;
#[cfg(feature = "logging")]
pub use log::LogWriter;
