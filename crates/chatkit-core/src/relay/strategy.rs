//! Provider call shapes, in priority order.

use std::fmt;

/// One shape of request the dispatcher can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallStrategy {
    /// Response bound to the client's session
    SessionScoped,
    /// Thread created for the session, response on that thread
    ThreadScoped,
    /// Plain response, no session binding
    Stateless,
}

impl CallStrategy {
    /// Most specific first, most generic last.
    pub const ORDERED: [CallStrategy; 3] =
        [CallStrategy::SessionScoped, CallStrategy::ThreadScoped, CallStrategy::Stateless];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SessionScoped => "session_scoped",
            Self::ThreadScoped => "thread_scoped",
            Self::Stateless => "stateless",
        }
    }

    pub fn is_session_bound(self) -> bool {
        !matches!(self, Self::Stateless)
    }

    /// Accepts a top-level `tool_resources` binding.
    pub fn supports_tool_resources(self) -> bool {
        self.is_session_bound()
    }

    /// Accepts per-attachment tool lists.
    pub fn supports_attachment_tools(self) -> bool {
        self.is_session_bound()
    }
}

impl fmt::Display for CallStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert_eq!(
            CallStrategy::ORDERED.map(CallStrategy::as_str),
            ["session_scoped", "thread_scoped", "stateless"]
        );
    }

    #[test]
    fn test_capabilities() {
        assert!(CallStrategy::SessionScoped.supports_tool_resources());
        assert!(CallStrategy::ThreadScoped.supports_attachment_tools());
        assert!(!CallStrategy::Stateless.supports_tool_resources());
        assert!(!CallStrategy::Stateless.supports_attachment_tools());
        assert!(!CallStrategy::Stateless.is_session_bound());
    }
}
