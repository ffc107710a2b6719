//! Allow/deny action type.

use std::fmt;

use crate::Error;

/// Action taken for an address matched by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Action {
    /// Let the address through
    #[default]
    Allow,
    /// Reject the address
    Deny,
}

impl Action {
    /// The opposite action.
    pub fn negated(self) -> Self {
        match self {
            Action::Allow => Action::Deny,
            Action::Deny => Action::Allow,
        }
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Allow => "allow",
            Action::Deny => "deny",
        }
    }

    /// Check whether this is [`Action::Deny`].
    pub fn is_deny(self) -> bool {
        self == Action::Deny
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Action {
    type Err = Error;

    /// Parse an action. Only the lowercase keywords are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allow" => Ok(Action::Allow),
            "deny" => Ok(Action::Deny),
            _ => Err(Error::InvalidAction(s.to_string())),
        }
    }
}
