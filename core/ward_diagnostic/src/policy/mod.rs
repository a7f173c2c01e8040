//! Build-mode message policy.
//!
//! Decides whether caller-authored detail text survives into events. The
//! policy applies only to detail text; primary messages and index text are
//! always kept. Severity and fatality have no influence on it.

use std::fmt;

/// What happens to detail text passed to a guard.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MessagePolicy {
    /// Store and forward the exact text.
    Retain,
    /// Replace the text with an empty string.
    Elide,
}

impl MessagePolicy {
    /// The policy this build was compiled with.
    ///
    /// `Elide` when the `elide-messages` feature is enabled.
    #[cfg(feature = "elide-messages")]
    pub const BUILD: MessagePolicy = MessagePolicy::Elide;

    /// The policy this build was compiled with.
    ///
    /// `Elide` when the `elide-messages` feature is enabled.
    #[cfg(not(feature = "elide-messages"))]
    pub const BUILD: MessagePolicy = MessagePolicy::Retain;

    pub fn retains(self) -> bool {
        matches!(self, MessagePolicy::Retain)
    }

    /// Produce the detail string for an event.
    ///
    /// The arguments are only formatted when the policy retains them.
    pub fn apply(self, detail: Option<fmt::Arguments<'_>>) -> String {
        match (self, detail) {
            (MessagePolicy::Retain, Some(args)) => match args.as_str() {
                Some(literal) => literal.to_owned(),
                None => args.to_string(),
            },
            _ => String::new(),
        }
    }
}

impl Default for MessagePolicy {
    fn default() -> Self {
        MessagePolicy::BUILD
    }
}
