//! Guard functions.
//!
//! Each guard takes an already evaluated predicate, reports through the given
//! [`Reporter`] when the contract is violated, and tells the caller what to do
//! next. [`ControlFlow::Break`] means "violated, leave now": the caller
//! returns, continues or breaks as the guard's [`FailAction`] says. Fatal
//! guards never hand control back after a violation.
//!
//! The crate's macros wrap these functions and turn the result into native
//! control flow. Call them directly when an early `return` from the macro
//! does not fit the surrounding code.

use std::fmt;
use std::ops::ControlFlow;

use ward_diagnostic::{CallSite, DiagnosticEvent, IndexViolation, Primary, Reporter, Severity};

use crate::index::IndexInt;
use crate::once::OnceFlag;

const FAILED: &str = "Method/Function Failed.";
const DEPRECATED: &str = "This method has been deprecated and will be removed in the future.";

/// What the caller does after a violated guard.
///
/// Selects the suffix of the primary message; the action itself is carried
/// out by the caller.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FailAction {
    /// Return from the current function.
    Return,
    /// Return the given fallback, recorded by its source text.
    ReturnValue(&'static str),
    /// Skip to the next loop iteration.
    Continue,
    /// Leave the loop.
    Break,
}

impl FailAction {
    fn describe(self, message: &str) -> String {
        match self {
            FailAction::Return => message.to_owned(),
            FailAction::ReturnValue(value) => format!("{message} returned: {value}"),
            FailAction::Continue => format!("{message} Continuing."),
            FailAction::Break => format!("{message} Breaking."),
        }
    }
}

fn condition_message(cond_text: &str) -> String {
    format!("Condition \"{cond_text}\" is true.")
}

fn index_event<I: IndexInt>(
    site: CallSite,
    index: I,
    size: I,
    index_text: &'static str,
    size_text: &'static str,
) -> DiagnosticEvent {
    DiagnosticEvent::index(
        site,
        IndexViolation::new(
            index.to_i64_saturating(),
            size.to_i64_saturating(),
            index_text,
            size_text,
        ),
    )
}

#[cold]
#[inline(never)]
fn report(reporter: &Reporter, event: DiagnosticEvent, detail: Option<fmt::Arguments<'_>>) {
    reporter.report(event.with_detail(reporter.detail(detail)));
}

#[cold]
#[inline(never)]
fn crash(reporter: &Reporter, event: DiagnosticEvent, detail: Option<fmt::Arguments<'_>>) -> ! {
    tracing::debug!(site = %event.site, "fatal contract violation");
    reporter.report_fatal(event.with_detail(reporter.detail(detail)))
}

// Index guards

/// Signed index guard: violated when `index < 0` or `index >= size`.
#[inline]
pub fn index<I: IndexInt>(
    reporter: &Reporter,
    site: CallSite,
    index: I,
    size: I,
    index_text: &'static str,
    size_text: &'static str,
    detail: Option<fmt::Arguments<'_>>,
) -> ControlFlow<()> {
    if index.is_negative() || index >= size {
        report(reporter, index_event(site, index, size, index_text, size_text), detail);
        return ControlFlow::Break(());
    }
    ControlFlow::Continue(())
}

/// Unsigned index guard: violated when `index >= size`.
///
/// Meant for values that cannot be negative; a negative signed value is
/// only caught if it compares `>= size`.
#[inline]
pub fn unsigned_index<I: IndexInt>(
    reporter: &Reporter,
    site: CallSite,
    index: I,
    size: I,
    index_text: &'static str,
    size_text: &'static str,
    detail: Option<fmt::Arguments<'_>>,
) -> ControlFlow<()> {
    if index >= size {
        report(reporter, index_event(site, index, size, index_text, size_text), detail);
        return ControlFlow::Break(());
    }
    ControlFlow::Continue(())
}

/// Like [`index`], but a violation is fatal.
#[inline]
pub fn fatal_index<I: IndexInt>(
    reporter: &Reporter,
    site: CallSite,
    index: I,
    size: I,
    index_text: &'static str,
    size_text: &'static str,
    detail: Option<fmt::Arguments<'_>>,
) {
    if index.is_negative() || index >= size {
        crash(reporter, index_event(site, index, size, index_text, size_text), detail);
    }
}

/// Like [`unsigned_index`], but a violation is fatal.
#[inline]
pub fn fatal_unsigned_index<I: IndexInt>(
    reporter: &Reporter,
    site: CallSite,
    index: I,
    size: I,
    index_text: &'static str,
    size_text: &'static str,
    detail: Option<fmt::Arguments<'_>>,
) {
    if index >= size {
        crash(reporter, index_event(site, index, size, index_text, size_text), detail);
    }
}

// Null and condition guards

/// Null guard. `None` stands for a null pointer.
///
/// Hands the value back on success so the caller can keep using it.
#[inline]
pub fn null<T>(
    reporter: &Reporter,
    site: CallSite,
    value: Option<T>,
    param_text: &'static str,
    detail: Option<fmt::Arguments<'_>>,
) -> ControlFlow<(), T> {
    match value {
        Some(value) => ControlFlow::Continue(value),
        None => {
            let event = DiagnosticEvent::new(site, format!("Parameter \"{param_text}\" is null."));
            report(reporter, event, detail);
            ControlFlow::Break(())
        }
    }
}

/// Condition guard: violated when `cond` is `true`.
#[inline]
pub fn condition(
    reporter: &Reporter,
    site: CallSite,
    cond: bool,
    cond_text: &'static str,
    action: FailAction,
    detail: Option<fmt::Arguments<'_>>,
) -> ControlFlow<()> {
    if cond {
        let event = DiagnosticEvent::new(site, action.describe(&condition_message(cond_text)));
        report(reporter, event, detail);
        return ControlFlow::Break(());
    }
    ControlFlow::Continue(())
}

#[inline]
pub fn fatal_condition(
    reporter: &Reporter,
    site: CallSite,
    cond: bool,
    cond_text: &'static str,
    detail: Option<fmt::Arguments<'_>>,
) {
    if cond {
        crash(reporter, DiagnosticEvent::new(site, condition_message(cond_text)), detail);
    }
}

// Unconditional guards

/// Report an unconditional failure. The caller leaves as `action` says.
#[cold]
pub fn fail(
    reporter: &Reporter,
    site: CallSite,
    action: FailAction,
    detail: Option<fmt::Arguments<'_>>,
) {
    let primary: Primary = match action {
        FailAction::Return => FAILED.into(),
        FailAction::ReturnValue(value) => {
            format!("Method/Function Failed, returning: {value}").into()
        }
        other => other.describe(FAILED).into(),
    };
    report(reporter, DiagnosticEvent::new(site, primary), detail);
}

#[cold]
pub fn fatal_now(reporter: &Reporter, site: CallSite, detail: Option<fmt::Arguments<'_>>) -> ! {
    crash(reporter, DiagnosticEvent::new(site, FAILED), detail)
}

// Print-only statements

/// Dispatch a pure report. The text lives in the detail, so it follows the
/// message policy like any other caller-authored text.
pub fn print(
    reporter: &Reporter,
    site: CallSite,
    severity: Severity,
    detail: Option<fmt::Arguments<'_>>,
) {
    report(
        reporter,
        DiagnosticEvent::new(site, Primary::EMPTY).with_severity(severity),
        detail,
    );
}

/// [`print`], but only the first time `flag` is seen. Returns whether the
/// event was dispatched.
pub fn print_once(
    flag: &OnceFlag,
    reporter: &Reporter,
    site: CallSite,
    severity: Severity,
    detail: Option<fmt::Arguments<'_>>,
) -> bool {
    if !flag.first() {
        return false;
    }
    print(reporter, site, severity, detail);
    true
}

/// Once-only deprecation warning.
pub fn deprecated(
    flag: &OnceFlag,
    reporter: &Reporter,
    site: CallSite,
    detail: Option<fmt::Arguments<'_>>,
) -> bool {
    if !flag.first() {
        return false;
    }
    report(
        reporter,
        DiagnosticEvent::new(site, DEPRECATED).with_severity(Severity::Warning),
        detail,
    );
    true
}
