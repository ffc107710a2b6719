//! ACL compile configuration.

use crate::Action;

/// Configuration used when compiling rules into an [`crate::IpAcl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AclConfig {
    /// Action for addresses not covered by any rule
    pub default_action: Action,
    /// Log every interval insertion step at trace level
    pub trace_inserts: bool,
}

impl AclConfig {
    /// Create a configuration with the given default action and tracing off.
    pub fn new(default_action: Action) -> Self {
        Self {
            default_action,
            trace_inserts: false,
        }
    }

    /// Enable or disable insertion tracing.
    pub fn with_trace_inserts(mut self, enabled: bool) -> Self {
        self.trace_inserts = enabled;
        self
    }
}

impl Default for AclConfig {
    fn default() -> Self {
        Self::new(Action::Allow)
    }
}
