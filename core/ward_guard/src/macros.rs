//! Guard macros.
//!
//! Every macro reports through [`current()`](crate::current) and then
//! performs its control-flow action in the caller: `return`, `continue`,
//! `break`, or process abort for the `crash_*` family. An optional trailing
//! format string becomes the event's detail text:
//!
//! ```text
//! err_fail_index!(idx, slots.len());
//! err_fail_index!(idx, slots.len() => None, "slot {} was freed", idx);
//! err_fail_cond!(width > MAX_WIDTH, "width {} exceeds {}", width, MAX_WIDTH);
//! let node = err_fail_null!(self.root.as_ref() => 0);
//! ```
//!
//! Return-value forms take the fallback after `=>` and record its source
//! text in the primary message.

/// The [`CallSite`](crate::CallSite) of the invocation, naming the enclosing
/// function.
#[macro_export]
macro_rules! call_site {
    () => {{
        fn __ward_marker() {}
        $crate::CallSite::new(
            $crate::__function_name(&__ward_marker),
            ::core::file!(),
            ::core::line!(),
            ::core::column!(),
        )
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __ward_detail {
    () => {
        ::core::option::Option::None
    };
    ($($arg:tt)+) => {
        ::core::option::Option::Some(::core::format_args!($($arg)+))
    };
}

/// Return from the current function if `index` is negative or not below
/// `size`.
#[macro_export]
macro_rules! err_fail_index {
    ($index:expr, $size:expr => $ret:expr $(, $($arg:tt)+)?) => {
        if $crate::check::index(
            &$crate::current(),
            $crate::call_site!(),
            $index,
            $size,
            ::core::stringify!($index),
            ::core::stringify!($size),
            $crate::__ward_detail!($($($arg)+)?),
        )
        .is_break()
        {
            return $ret;
        }
    };
    ($index:expr, $size:expr $(, $($arg:tt)+)?) => {
        if $crate::check::index(
            &$crate::current(),
            $crate::call_site!(),
            $index,
            $size,
            ::core::stringify!($index),
            ::core::stringify!($size),
            $crate::__ward_detail!($($($arg)+)?),
        )
        .is_break()
        {
            return;
        }
    };
}

/// Return from the current function if `index` is not below `size`.
#[macro_export]
macro_rules! err_fail_unsigned_index {
    ($index:expr, $size:expr => $ret:expr $(, $($arg:tt)+)?) => {
        if $crate::check::unsigned_index(
            &$crate::current(),
            $crate::call_site!(),
            $index,
            $size,
            ::core::stringify!($index),
            ::core::stringify!($size),
            $crate::__ward_detail!($($($arg)+)?),
        )
        .is_break()
        {
            return $ret;
        }
    };
    ($index:expr, $size:expr $(, $($arg:tt)+)?) => {
        if $crate::check::unsigned_index(
            &$crate::current(),
            $crate::call_site!(),
            $index,
            $size,
            ::core::stringify!($index),
            ::core::stringify!($size),
            $crate::__ward_detail!($($($arg)+)?),
        )
        .is_break()
        {
            return;
        }
    };
}

/// Abort the process if `index` is negative or not below `size`.
#[macro_export]
macro_rules! crash_bad_index {
    ($index:expr, $size:expr $(, $($arg:tt)+)?) => {
        $crate::check::fatal_index(
            &$crate::current(),
            $crate::call_site!(),
            $index,
            $size,
            ::core::stringify!($index),
            ::core::stringify!($size),
            $crate::__ward_detail!($($($arg)+)?),
        )
    };
}

/// Abort the process if `index` is not below `size`.
#[macro_export]
macro_rules! crash_bad_unsigned_index {
    ($index:expr, $size:expr $(, $($arg:tt)+)?) => {
        $crate::check::fatal_unsigned_index(
            &$crate::current(),
            $crate::call_site!(),
            $index,
            $size,
            ::core::stringify!($index),
            ::core::stringify!($size),
            $crate::__ward_detail!($($($arg)+)?),
        )
    };
}

/// Unwrap an `Option`, returning from the current function when it is
/// `None`.
///
/// Evaluates to the contained value.
#[macro_export]
macro_rules! err_fail_null {
    ($param:expr => $ret:expr $(, $($arg:tt)+)?) => {
        match $crate::check::null(
            &$crate::current(),
            $crate::call_site!(),
            $param,
            ::core::stringify!($param),
            $crate::__ward_detail!($($($arg)+)?),
        ) {
            ::core::ops::ControlFlow::Continue(value) => value,
            ::core::ops::ControlFlow::Break(()) => return $ret,
        }
    };
    ($param:expr $(, $($arg:tt)+)?) => {
        match $crate::check::null(
            &$crate::current(),
            $crate::call_site!(),
            $param,
            ::core::stringify!($param),
            $crate::__ward_detail!($($($arg)+)?),
        ) {
            ::core::ops::ControlFlow::Continue(value) => value,
            ::core::ops::ControlFlow::Break(()) => return,
        }
    };
}

/// Return from the current function if `cond` is true.
#[macro_export]
macro_rules! err_fail_cond {
    ($cond:expr => $ret:expr $(, $($arg:tt)+)?) => {
        if $crate::check::condition(
            &$crate::current(),
            $crate::call_site!(),
            $cond,
            ::core::stringify!($cond),
            $crate::FailAction::ReturnValue(::core::stringify!($ret)),
            $crate::__ward_detail!($($($arg)+)?),
        )
        .is_break()
        {
            return $ret;
        }
    };
    ($cond:expr $(, $($arg:tt)+)?) => {
        if $crate::check::condition(
            &$crate::current(),
            $crate::call_site!(),
            $cond,
            ::core::stringify!($cond),
            $crate::FailAction::Return,
            $crate::__ward_detail!($($($arg)+)?),
        )
        .is_break()
        {
            return;
        }
    };
}

/// Skip to the next iteration of the enclosing loop if `cond` is true.
#[macro_export]
macro_rules! err_continue {
    ($cond:expr $(, $($arg:tt)+)?) => {
        if $crate::check::condition(
            &$crate::current(),
            $crate::call_site!(),
            $cond,
            ::core::stringify!($cond),
            $crate::FailAction::Continue,
            $crate::__ward_detail!($($($arg)+)?),
        )
        .is_break()
        {
            continue;
        }
    };
}

/// Leave the enclosing loop if `cond` is true.
#[macro_export]
macro_rules! err_break {
    ($cond:expr $(, $($arg:tt)+)?) => {
        if $crate::check::condition(
            &$crate::current(),
            $crate::call_site!(),
            $cond,
            ::core::stringify!($cond),
            $crate::FailAction::Break,
            $crate::__ward_detail!($($($arg)+)?),
        )
        .is_break()
        {
            break;
        }
    };
}

/// Abort the process if `cond` is true.
#[macro_export]
macro_rules! crash_cond {
    ($cond:expr $(, $($arg:tt)+)?) => {
        $crate::check::fatal_condition(
            &$crate::current(),
            $crate::call_site!(),
            $cond,
            ::core::stringify!($cond),
            $crate::__ward_detail!($($($arg)+)?),
        )
    };
}

/// Report a failure and return from the current function.
#[macro_export]
macro_rules! err_fail {
    (=> $ret:expr $(, $($arg:tt)+)?) => {{
        $crate::check::fail(
            &$crate::current(),
            $crate::call_site!(),
            $crate::FailAction::ReturnValue(::core::stringify!($ret)),
            $crate::__ward_detail!($($($arg)+)?),
        );
        return $ret;
    }};
    ($($arg:tt)*) => {{
        $crate::check::fail(
            &$crate::current(),
            $crate::call_site!(),
            $crate::FailAction::Return,
            $crate::__ward_detail!($($arg)*),
        );
        return;
    }};
}

/// Report a fatal failure and abort the process.
#[macro_export]
macro_rules! crash_now {
    ($($arg:tt)*) => {
        $crate::check::fatal_now(
            &$crate::current(),
            $crate::call_site!(),
            $crate::__ward_detail!($($arg)*),
        )
    };
}

/// Report an error. No control-flow effect.
#[macro_export]
macro_rules! err_print {
    ($($arg:tt)+) => {
        $crate::check::print(
            &$crate::current(),
            $crate::call_site!(),
            $crate::Severity::Error,
            $crate::__ward_detail!($($arg)+),
        )
    };
}

/// Report an error the first time this call site runs.
#[macro_export]
macro_rules! err_print_once {
    ($($arg:tt)+) => {{
        static __WARD_ONCE: $crate::OnceFlag = $crate::OnceFlag::new();
        $crate::check::print_once(
            &__WARD_ONCE,
            &$crate::current(),
            $crate::call_site!(),
            $crate::Severity::Error,
            $crate::__ward_detail!($($arg)+),
        );
    }};
}

/// Report a warning. No control-flow effect.
#[macro_export]
macro_rules! warn_print {
    ($($arg:tt)+) => {
        $crate::check::print(
            &$crate::current(),
            $crate::call_site!(),
            $crate::Severity::Warning,
            $crate::__ward_detail!($($arg)+),
        )
    };
}

/// Report a warning the first time this call site runs.
#[macro_export]
macro_rules! warn_print_once {
    ($($arg:tt)+) => {{
        static __WARD_ONCE: $crate::OnceFlag = $crate::OnceFlag::new();
        $crate::check::print_once(
            &__WARD_ONCE,
            &$crate::current(),
            $crate::call_site!(),
            $crate::Severity::Warning,
            $crate::__ward_detail!($($arg)+),
        );
    }};
}

/// Warn, once per call site, that the enclosing function is deprecated.
#[macro_export]
macro_rules! warn_deprecated {
    ($($arg:tt)*) => {{
        static __WARD_ONCE: $crate::OnceFlag = $crate::OnceFlag::new();
        $crate::check::deprecated(
            &__WARD_ONCE,
            &$crate::current(),
            $crate::call_site!(),
            $crate::__ward_detail!($($arg)*),
        );
    }};
}
