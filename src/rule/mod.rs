//! Rules and their range form.

use ipnet::IpNet;
use std::fmt;
use std::net::IpAddr;

use crate::addr::{Address, V4Addr, V6Addr};
use crate::range::AddrRange;
use crate::Action;

/// A single allow/deny rule over a CIDR prefix.
///
/// Rules are matched first-match: in a rule list the earliest rule whose
/// target contains an address decides its action.
///
/// # Examples
/// ```
/// use ipacl::{Action, Rule};
///
/// let rule: Rule = "deny 192.0.2.0/24".parse().unwrap();
/// assert_eq!(rule.action(), Action::Deny);
/// assert!(rule.contains("192.0.2.7".parse().unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rule {
    target: IpNet,
    action: Action,
}

impl Rule {
    /// Create a rule with a CIDR target and an action.
    pub fn new(target: IpNet, action: Action) -> Self {
        Self { target, action }
    }

    /// Create a rule matching exactly one address (`/32` or `/128`).
    pub fn from_addr(addr: IpAddr, action: Action) -> Self {
        Self::new(IpNet::from(addr), action)
    }

    /// Shorthand for an allow rule.
    pub fn allow(target: IpNet) -> Self {
        Self::new(target, Action::Allow)
    }

    /// Shorthand for a deny rule.
    pub fn deny(target: IpNet) -> Self {
        Self::new(target, Action::Deny)
    }

    pub fn target(&self) -> IpNet {
        self.target
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// Check whether the target prefix contains `ip`.
    pub fn contains(&self, ip: IpAddr) -> bool {
        self.target.contains(&ip)
    }

    /// Lower the rule to its concrete address range.
    pub fn lower(&self) -> LoweredRule {
        match self.target {
            IpNet::V4(net) => LoweredRule::V4(RuleRange::new(AddrRange::from(net), self.action)),
            IpNet::V6(net) => LoweredRule::V6(RuleRange::new(AddrRange::from(net), self.action)),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action, self.target)
    }
}

impl std::str::FromStr for Rule {
    type Err = crate::Error;

    /// Parse a single `<allow|deny> <target>` line.
    ///
    /// The `all` target is not a rule and is rejected here; use
    /// [`crate::RuleList`] to parse a list with a default action.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match crate::ruleset::parse_line(s, 1)? {
            crate::ruleset::Line::Rule(rule) => Ok(rule),
            crate::ruleset::Line::Default(_) => Err(crate::Error::InvalidTarget {
                line: 1,
                target: "all".to_string(),
            }),
            crate::ruleset::Line::Blank => Err(crate::Error::FieldCount { line: 1, count: 0 }),
        }
    }
}

/// A rule lowered to one family's address range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoweredRule {
    V4(RuleRange<V4Addr>),
    V6(RuleRange<V6Addr>),
}

/// An address range paired with the action applied to it.
///
/// This is the working unit of [`crate::IntervalSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleRange<A> {
    pub range: AddrRange<A>,
    pub action: Action,
}

impl<A: Address> RuleRange<A> {
    pub fn new(range: AddrRange<A>, action: Action) -> Self {
        Self { range, action }
    }

    pub fn start(&self) -> A {
        self.range.start()
    }

    pub fn end(&self) -> A {
        self.range.end()
    }
}

impl<A: Address> fmt::Display for RuleRange<A> {
    /// The range, prefixed with `!` when the action is deny.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.action.is_deny() {
            f.write_str("!")?;
        }
        write!(f, "{}", self.range)
    }
}

/// Join rule ranges with `", "`.
pub(crate) fn format_rule_ranges<A: Address>(ranges: &[RuleRange<A>]) -> String {
    ranges
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
