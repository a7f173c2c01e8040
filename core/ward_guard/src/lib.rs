//! Inline contract guards.
//!
//! Guards validate preconditions (non-null values, in-range indices,
//! boolean invariants) without unwinding. A violated guard reports a
//! [`DiagnosticEvent`] through the current [`Reporter`] and then leaves the
//! caller's control flow in one of a few ways:
//!
//! | Guard | Violated when | Action |
//! |---|---|---|
//! | [`err_fail_index!`], [`err_fail_unsigned_index!`] | index out of `[0, size)` | return / return value |
//! | [`err_fail_null!`] | value is `None` | return / return value |
//! | [`err_fail_cond!`], [`err_continue!`], [`err_break!`] | condition holds | return / continue / break |
//! | [`err_fail!`] | always | return / return value |
//! | [`crash_bad_index!`], [`crash_cond!`], [`crash_now!`] | as above | abort after dispatch |
//!
//! Pure reporting statements ([`err_print!`], [`warn_print!`] and their
//! `_once` forms, [`warn_deprecated!`]) have no control-flow effect.
//!
//! The macros are thin wrappers over the functions in [`check`], which
//! return a [`ControlFlow`](std::ops::ControlFlow) the caller can match on
//! directly.

pub mod check;
mod index;
mod macros;
mod once;

pub use check::FailAction;
pub use index::IndexInt;
pub use once::OnceFlag;
pub use ward_diagnostic::{
    current, global, register, unregister, with_reporter, CallSite, DiagnosticEvent,
    ErrorHandler, HandlerId, HandlerRegistration, MessagePolicy, Reporter, Severity,
};

/// Bare name of the function enclosing `marker`, a fn item declared by
/// [`call_site!`].
#[doc(hidden)]
pub fn __function_name<T>(_marker: &T) -> &'static str {
    ward_diagnostic::short_function_name(std::any::type_name::<T>())
}
