//! Compiled two-family ACL and its builder.

use std::fmt;
use std::net::IpAddr;

use crate::addr::{Address, V4Addr, V6Addr};
use crate::compiled::CompiledSet;
use crate::interval::IntervalSet;
use crate::range::AddrRange;
use crate::rule::{LoweredRule, Rule, RuleRange};
use crate::{AclConfig, Action};

/// Folds rules into per-family interval sets in priority order.
///
/// The first rule added has the highest priority. Call [`AclBuilder::build`]
/// once all rules are in.
#[derive(Debug, Clone)]
pub struct AclBuilder {
    v4: IntervalSet<V4Addr>,
    v6: IntervalSet<V6Addr>,
    config: AclConfig,
    rule_count: usize,
}

impl AclBuilder {
    pub fn new(config: AclConfig) -> Self {
        Self {
            v4: IntervalSet::new().with_trace(config.trace_inserts),
            v6: IntervalSet::new().with_trace(config.trace_inserts),
            config,
            rule_count: 0,
        }
    }

    /// Add a rule with lower priority than all rules added so far.
    pub fn add_rule(&mut self, rule: &Rule) -> &mut Self {
        if self.config.trace_inserts {
            log::trace!("adding rule #{}: {}", self.rule_count, rule);
        }
        match rule.lower() {
            LoweredRule::V4(r) => self.v4.insert(r),
            LoweredRule::V6(r) => self.v6.insert(r),
        }
        self.rule_count += 1;
        self
    }

    /// Add several rules, in order.
    pub fn add_rules<'a, I>(&mut self, rules: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a Rule>,
    {
        for rule in rules {
            self.add_rule(rule);
        }
        self
    }

    /// Fold in the default action and compile.
    pub fn build(mut self) -> IpAcl {
        let default_action = self.config.default_action;
        self.v4.insert(RuleRange::new(AddrRange::full(), default_action));
        self.v6.insert(RuleRange::new(AddrRange::full(), default_action));

        let acl = IpAcl {
            v4: CompiledSet::compile(&self.v4, default_action),
            v6: CompiledSet::compile(&self.v6, default_action),
            default_action,
        };
        log::debug!(
            "Compiled {} rules into {} IPv4 and {} IPv6 intervals (default {})",
            self.rule_count,
            acl.v4.len(),
            acl.v6.len(),
            default_action
        );
        acl
    }
}

impl Default for AclBuilder {
    fn default() -> Self {
        Self::new(AclConfig::default())
    }
}

/// A compiled access-control list over IPv4 and IPv6.
///
/// Immutable once built and safe to share across threads. Lookups run in
/// O(log n) and give the same answer as scanning the original rules top to
/// bottom and taking the first match.
///
/// # Examples
/// ```
/// use ipacl::{Action, IpAcl, Rule};
///
/// let rules: Vec<Rule> = vec![
///     "deny 192.168.1.1".parse().unwrap(),
///     "allow 192.168.1.0/24".parse().unwrap(),
/// ];
/// let acl = IpAcl::compile(&rules, Action::Deny);
///
/// assert_eq!(acl.lookup("192.168.1.1".parse().unwrap()), Action::Deny);
/// assert_eq!(acl.lookup("192.168.1.2".parse().unwrap()), Action::Allow);
/// assert_eq!(acl.lookup("10.0.0.1".parse().unwrap()), Action::Deny);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpAcl {
    v4: CompiledSet<V4Addr>,
    v6: CompiledSet<V6Addr>,
    default_action: Action,
}

impl IpAcl {
    /// Compile `rules` (highest priority first) with a default action.
    pub fn compile(rules: &[Rule], default_action: Action) -> Self {
        Self::with_config(rules, &AclConfig::new(default_action))
    }

    /// Compile `rules` with an explicit configuration.
    pub fn with_config(rules: &[Rule], config: &AclConfig) -> Self {
        let mut builder = AclBuilder::new(*config);
        builder.add_rules(rules);
        builder.build()
    }

    /// An ACL without rules: everything resolves to `default_action`.
    pub fn empty(default_action: Action) -> Self {
        AclBuilder::new(AclConfig::new(default_action)).build()
    }

    /// Classify an address of either family.
    pub fn lookup(&self, ip: IpAddr) -> Action {
        match ip {
            IpAddr::V4(v4) => self.v4.lookup(V4Addr::from(v4)),
            IpAddr::V6(v6) => self.v6.lookup(V6Addr::from(v6)),
        }
    }

    pub fn lookup_v4(&self, addr: V4Addr) -> Action {
        self.v4.lookup(addr)
    }

    pub fn lookup_v6(&self, addr: V6Addr) -> Action {
        self.v6.lookup(addr)
    }

    /// Check whether `ip` is allowed.
    pub fn is_allowed(&self, ip: IpAddr) -> bool {
        self.lookup(ip) == Action::Allow
    }

    pub fn default_action(&self) -> Action {
        self.default_action
    }

    /// Compiled IPv4 intervals.
    pub fn v4_ranges(&self) -> impl Iterator<Item = RuleRange<V4Addr>> + '_ {
        self.v4.ranges()
    }

    /// Compiled IPv6 intervals.
    pub fn v6_ranges(&self) -> impl Iterator<Item = RuleRange<V6Addr>> + '_ {
        self.v6.ranges()
    }

    pub fn v4(&self) -> &CompiledSet<V4Addr> {
        &self.v4
    }

    pub fn v6(&self) -> &CompiledSet<V6Addr> {
        &self.v6
    }
}

fn write_ranges<A: Address>(
    f: &mut fmt::Formatter<'_>,
    ranges: impl Iterator<Item = RuleRange<A>>,
) -> fmt::Result {
    for (i, range) in ranges.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{range}")?;
    }
    Ok(())
}

impl fmt::Display for IpAcl {
    /// Human-readable dump of the compiled intervals, deny ranges marked `!`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IpAcl{v4:[")?;
        write_ranges(f, self.v4.ranges())?;
        f.write_str("], v6:[")?;
        write_ranges(f, self.v6.ranges())?;
        f.write_str("]}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(lines: &[&str]) -> Vec<Rule> {
        lines.iter().map(|l| l.parse().unwrap()).collect()
    }

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_compile_adjacent_denies() {
        let acl = IpAcl::compile(&rules(&["deny 192.0.2.0/28", "deny 192.0.2.16/29"]), Action::Allow);
        assert_eq!(
            acl.to_string(),
            "IpAcl{v4:[0.0.0.0-192.0.1.255, !192.0.2.0-192.0.2.23, 192.0.2.24-255.255.255.255], \
             v6:[::-ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff]}"
        );
        assert_eq!(acl.lookup(ip("192.0.2.0")), Action::Deny);
        assert_eq!(acl.lookup(ip("192.0.2.23")), Action::Deny);
        assert_eq!(acl.lookup(ip("192.0.2.24")), Action::Allow);
    }

    #[test]
    fn test_compile_separated_denies() {
        let acl = IpAcl::compile(&rules(&["deny 192.0.2.0/28", "deny 192.0.2.24/29"]), Action::Allow);
        assert_eq!(
            acl.to_string(),
            "IpAcl{v4:[0.0.0.0-192.0.1.255, !192.0.2.0-192.0.2.15, 192.0.2.16-192.0.2.23, \
             !192.0.2.24-192.0.2.31, 192.0.2.32-255.255.255.255], \
             v6:[::-ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff]}"
        );
    }

    #[test]
    fn test_priority_override() {
        let acl = IpAcl::compile(
            &rules(&["allow 0.0.0.2", "deny 0.0.0.1", "deny 0.0.0.0"]),
            Action::Allow,
        );
        assert_eq!(acl.lookup(ip("0.0.0.1")), Action::Deny);
        assert_eq!(acl.lookup(ip("0.0.0.0")), Action::Deny);
        assert_eq!(acl.lookup(ip("0.0.0.2")), Action::Allow);
    }

    #[test]
    fn test_later_rule_cannot_override_earlier() {
        let acl = IpAcl::compile(
            &rules(&["deny 192.168.1.1", "allow 0.0.0.0/0"]),
            Action::Deny,
        );
        assert_eq!(acl.lookup(ip("192.168.1.1")), Action::Deny);
        assert_eq!(acl.lookup(ip("192.168.1.2")), Action::Allow);
        assert_eq!(acl.lookup(ip("::1")), Action::Deny);
    }

    #[test]
    fn test_empty_acl() {
        let acl = IpAcl::empty(Action::Deny);
        assert_eq!(acl.lookup(ip("8.8.8.8")), Action::Deny);
        assert_eq!(acl.lookup(ip("2001:db8::1")), Action::Deny);
        assert_eq!(acl.v4().len(), 1);
        assert_eq!(acl.default_action(), Action::Deny);
    }

    #[test]
    fn test_families_are_independent() {
        let acl = IpAcl::compile(&rules(&["deny ::/0"]), Action::Allow);
        assert_eq!(acl.lookup(ip("0.0.0.0")), Action::Allow);
        assert_eq!(acl.lookup(ip("::")), Action::Deny);
        assert!(acl.is_allowed(ip("255.255.255.255")));
    }

    #[test]
    fn test_builder_chaining() {
        let mut builder = AclBuilder::new(AclConfig::new(Action::Deny).with_trace_inserts(true));
        builder
            .add_rule(&"allow 10.0.0.0/8".parse().unwrap())
            .add_rule(&"allow 2001:db8::/32".parse().unwrap());
        let acl = builder.build();
        assert_eq!(acl.lookup_v4("10.20.30.40".parse().unwrap()), Action::Allow);
        assert_eq!(acl.lookup_v6("2001:db8::1".parse().unwrap()), Action::Allow);
        assert_eq!(acl.lookup_v6("2001:db9::1".parse().unwrap()), Action::Deny);
        assert_eq!(acl.v6_ranges().count(), 3);
    }
}
