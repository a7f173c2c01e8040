//! Event dispatch.
//!
//! Delivers one event to every registered handler, newest registration
//! first, then to the default sink. Handlers cannot suppress each other or
//! the sink.
//!
//! # Re-entrancy
//!
//! Iteration runs over a snapshot of the registry, so handlers added or
//! removed during a dispatch only take effect for later dispatches. A
//! handler that itself trips a guard dispatches a nested event; nesting is
//! bounded per thread by [`MAX_DISPATCH_DEPTH`], beyond which nested events
//! reach the default sink only. Fatal events are exempt: they always reach
//! every handler, and the abort that follows ends the recursion.

use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};

use crate::registry::HandlerRegistry;
use crate::sink::DiagnosticSink;
use crate::DiagnosticEvent;

/// Deepest nesting at which handlers still receive non-fatal events.
pub const MAX_DISPATCH_DEPTH: usize = 4;

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Restores the depth counter even if a handler unwinds.
struct DepthGuard {
    depth: usize,
}

impl DepthGuard {
    fn enter() -> Self {
        let depth = DEPTH.with(|d| {
            let depth = d.get() + 1;
            d.set(depth);
            depth
        });
        DepthGuard { depth }
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.with(|d| d.set(self.depth - 1));
    }
}

/// Current dispatch nesting on this thread (0 outside any dispatch).
pub fn dispatch_depth() -> usize {
    DEPTH.with(Cell::get)
}

/// Deliver `event` to all handlers, then to `sink`.
///
/// Returns the number of handlers that were invoked.
pub fn dispatch(
    registry: &HandlerRegistry,
    sink: &dyn DiagnosticSink,
    event: &DiagnosticEvent,
) -> usize {
    let guard = DepthGuard::enter();
    let mut delivered = 0;

    if event.fatal || guard.depth <= MAX_DISPATCH_DEPTH {
        let handlers = registry.snapshot();
        tracing::trace!(
            handlers = handlers.len(),
            depth = guard.depth,
            function = event.site.function,
            "dispatching diagnostic"
        );
        for handler in handlers {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler.handle(event)));
            if outcome.is_err() {
                tracing::error!(
                    function = event.site.function,
                    file = event.site.file,
                    line = event.site.line,
                    "diagnostic handler panicked; continuing with remaining handlers"
                );
            }
            delivered += 1;
        }
    } else {
        tracing::trace!(depth = guard.depth, "nested dispatch too deep; sink only");
    }

    sink.emit(event);
    delivered
}
