//! Reference first-match scanner.
//!
//! Checks every rule in order. Used to verify [`crate::IpAcl`] in tests and
//! as a baseline in benchmarks, not for serving lookups.

use std::net::IpAddr;

use crate::rule::Rule;
use crate::Action;

/// Linear first-match evaluation over a rule list.
#[derive(Debug, Clone)]
pub struct LinearSearch {
    rules: Vec<Rule>,
    default_action: Action,
}

impl LinearSearch {
    pub fn new(rules: &[Rule], default_action: Action) -> Self {
        Self {
            rules: rules.to_vec(),
            default_action,
        }
    }

    /// Action of the first rule containing `ip`, or the default action.
    pub fn lookup(&self, ip: IpAddr) -> Action {
        self.rules
            .iter()
            .find(|rule| rule.contains(ip))
            .map_or(self.default_action, |rule| rule.action())
    }
}
