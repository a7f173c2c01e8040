//! Diagnostic reporting core for the ward contract-checking layer.
//!
//! Guards in `ward_guard` validate preconditions without unwinding. When one
//! fails it builds a [`DiagnosticEvent`] and hands it to a [`Reporter`],
//! which:
//!
//! 1. strips the caller's detail text if the build elides messages,
//! 2. delivers the event to every registered [`ErrorHandler`], newest
//!    registration first,
//! 3. writes it to the reporter's default [`DiagnosticSink`],
//! 4. for fatal guards only, calls the abort hook.
//!
//! Handlers never suppress one another or the sink; there is no "handled"
//! flag. Nothing in this crate returns errors to guard call sites: this
//! layer is the host's error channel.
//!
//! # Registering a Handler
//!
//! ```text
//! let token = ward_diagnostic::register(|event: &DiagnosticEvent| {
//!     editor_log.push(event.to_string());
//! });
//! // ... the handler sees every diagnostic until `token` is dropped
//! ```
//!
//! # Features
//!
//! - `elide-messages`: detail text is replaced by an empty string in every
//!   event (primary messages are kept).
//! - `serde`: `Serialize` for the event model.

mod config;
mod dispatch;
mod event;
mod policy;
mod registry;
mod reporter;
mod site;
pub mod sink;
mod tracing_init;

pub use config::{ConfigError, ReporterConfig, SinkKind, COLOR_ENV, SINK_ENV};
pub use dispatch::{dispatch, dispatch_depth, MAX_DISPATCH_DEPTH};
pub use event::{DiagnosticEvent, IndexViolation, Primary, Severity};
pub use policy::MessagePolicy;
pub use registry::{ErrorHandler, HandlerId, HandlerRegistration, HandlerRegistry};
pub use reporter::{
    current, global, install_global, register, unregister, with_reporter, AbortHook, Reporter,
    ReporterBuilder,
};
pub use site::{short_function_name, CallSite};
pub use sink::{BufferSink, ColorMode, DiagnosticSink, SilentSink, TerminalSink, TracingSink};
pub use tracing_init::init_tracing;
