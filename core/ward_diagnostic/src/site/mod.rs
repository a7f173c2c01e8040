//! Source locations for diagnostics.

use std::fmt;

/// Where a guard fired.
///
/// Built by the `call_site!` macro in `ward_guard`; `function` is the bare
/// name of the enclosing function.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CallSite {
    pub function: &'static str,
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl CallSite {
    pub const fn new(function: &'static str, file: &'static str, line: u32, column: u32) -> Self {
        CallSite {
            function,
            file,
            line,
            column,
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Reduce a `type_name` path of a nested marker item to the enclosing
/// function's bare name.
///
/// `my_crate::slots::Slots::resize::__ward_marker` becomes `resize`.
/// Closure segments are skipped, so a guard inside a closure reports the
/// function that contains the closure.
pub fn short_function_name(path: &'static str) -> &'static str {
    let path = path.strip_suffix("::__ward_marker").unwrap_or(path);
    path.rsplit("::")
        .find(|segment| !segment.is_empty() && *segment != "{{closure}}")
        .unwrap_or(path)
}
