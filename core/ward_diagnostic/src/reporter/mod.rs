//! The reporter: registry, default sink, message policy and abort hook.
//!
//! Guards report through [`current()`], which is the process-wide
//! [`global()`] reporter unless the calling thread has scoped another one
//! with [`with_reporter`]. Tests build isolated reporters so they neither
//! see nor disturb diagnostics from the rest of the process.

use std::cell::RefCell;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::config::{ReporterConfig, SinkKind};
use crate::dispatch::dispatch;
use crate::policy::MessagePolicy;
use crate::registry::{ErrorHandler, HandlerId, HandlerRegistration, HandlerRegistry};
use crate::sink::{ColorMode, DiagnosticSink, SilentSink, TerminalSink, TracingSink};
use crate::DiagnosticEvent;

/// Irrecoverably terminates the process.
///
/// Only fatal guards call it, and only after their event was dispatched.
pub type AbortHook = fn() -> !;

/// Bundles everything a guard needs to report a violation.
pub struct Reporter {
    registry: HandlerRegistry,
    sink: Box<dyn DiagnosticSink>,
    policy: MessagePolicy,
    abort: AbortHook,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter {
    /// Reporter writing to stderr with the build's message policy.
    pub fn new() -> Self {
        Self::from_config(&ReporterConfig::default())
    }

    pub fn builder() -> ReporterBuilder {
        ReporterBuilder::default()
    }

    pub fn from_config(config: &ReporterConfig) -> Self {
        let sink: Box<dyn DiagnosticSink> = match config.sink {
            SinkKind::Terminal => Box::new(TerminalSink::stderr(config.color)),
            SinkKind::Tracing => Box::new(TracingSink),
            SinkKind::Silent => Box::new(SilentSink),
        };
        Reporter {
            registry: HandlerRegistry::new(),
            sink,
            policy: MessagePolicy::BUILD,
            abort: std::process::abort,
        }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn policy(&self) -> MessagePolicy {
        self.policy
    }

    /// Subscribe a handler; see [`HandlerRegistry::register`].
    #[must_use = "dropping the registration immediately unregisters the handler"]
    pub fn register(&self, handler: impl ErrorHandler + 'static) -> HandlerRegistration {
        self.registry.register(handler)
    }

    /// Remove a handler by id. Unknown ids are ignored.
    pub fn unregister(&self, id: HandlerId) -> bool {
        self.registry.unregister(id)
    }

    /// Build a detail string under this reporter's policy.
    pub fn detail(&self, args: Option<fmt::Arguments<'_>>) -> String {
        self.policy.apply(args)
    }

    /// Dispatch a non-fatal event. Returns the number of handlers invoked.
    pub fn report(&self, mut event: DiagnosticEvent) -> usize {
        if !self.policy.retains() {
            event.detail.clear();
        }
        dispatch(&self.registry, self.sink.as_ref(), &event)
    }

    /// Dispatch `event` as fatal, then call the abort hook exactly once.
    #[cold]
    #[inline(never)]
    pub fn report_fatal(&self, event: DiagnosticEvent) -> ! {
        self.report(event.fatal());
        (self.abort)()
    }
}

impl fmt::Debug for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter")
            .field("registry", &self.registry)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Builder for isolated reporters.
pub struct ReporterBuilder {
    sink: Option<Box<dyn DiagnosticSink>>,
    policy: MessagePolicy,
    abort: AbortHook,
}

impl Default for ReporterBuilder {
    fn default() -> Self {
        ReporterBuilder {
            sink: None,
            policy: MessagePolicy::BUILD,
            abort: std::process::abort,
        }
    }
}

impl ReporterBuilder {
    /// Default sink. Stderr when not set.
    #[must_use]
    pub fn sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    #[must_use]
    pub fn policy(mut self, policy: MessagePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the abort primitive. Defaults to [`std::process::abort`].
    #[must_use]
    pub fn abort_hook(mut self, abort: AbortHook) -> Self {
        self.abort = abort;
        self
    }

    pub fn build(self) -> Reporter {
        let sink: Box<dyn DiagnosticSink> = match self.sink {
            Some(sink) => sink,
            None => Box::new(TerminalSink::stderr(ColorMode::Auto)),
        };
        Reporter {
            registry: HandlerRegistry::new(),
            sink,
            policy: self.policy,
            abort: self.abort,
        }
    }
}

static GLOBAL: OnceLock<Arc<Reporter>> = OnceLock::new();

thread_local! {
    static SCOPED: RefCell<Option<Arc<Reporter>>> = const { RefCell::new(None) };
}

/// The process-wide reporter, configured from the environment on first use.
pub fn global() -> &'static Arc<Reporter> {
    GLOBAL.get_or_init(|| Arc::new(Reporter::from_config(&ReporterConfig::from_env())))
}

/// Install `reporter` as the process-wide reporter.
///
/// Fails, handing the reporter back, if the global reporter already exists.
pub fn install_global(reporter: Reporter) -> Result<(), Arc<Reporter>> {
    GLOBAL.set(Arc::new(reporter))
}

/// The reporter guards on this thread report to.
pub fn current() -> Arc<Reporter> {
    SCOPED
        .with(|scoped| scoped.borrow().clone())
        .unwrap_or_else(|| Arc::clone(global()))
}

/// Run `f` with `reporter` as this thread's current reporter.
///
/// Scopes nest; the previous reporter is restored when `f` returns or
/// unwinds.
pub fn with_reporter<R>(reporter: &Arc<Reporter>, f: impl FnOnce() -> R) -> R {
    struct Restore(Option<Arc<Reporter>>);

    impl Drop for Restore {
        fn drop(&mut self) {
            let previous = self.0.take();
            SCOPED.with(|scoped| *scoped.borrow_mut() = previous);
        }
    }

    let previous = SCOPED.with(|scoped| scoped.borrow_mut().replace(Arc::clone(reporter)));
    let _restore = Restore(previous);
    f()
}

/// Register a handler with the global reporter.
#[must_use = "dropping the registration immediately unregisters the handler"]
pub fn register(handler: impl ErrorHandler + 'static) -> HandlerRegistration {
    global().register(handler)
}

/// Remove a handler from the global reporter. Unknown ids are ignored.
pub fn unregister(id: HandlerId) -> bool {
    global().unregister(id)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
