//! Hot-swappable shared ACL.

use arc_swap::ArcSwap;
use std::net::IpAddr;
use std::sync::Arc;

use crate::rule::Rule;
use crate::ruleset::{AclConfig, RuleList};
use crate::{Action, IpAcl};

/// An [`IpAcl`] that can be replaced while other threads are reading it.
///
/// A reload compiles a brand-new ACL and atomically swaps it in. Lookups
/// already in progress finish against the ACL they loaded; published ACLs are
/// never mutated.
///
/// # Example
///
/// ```
/// use ipacl::{Action, IpAcl, RuleList, SharedAcl};
///
/// let shared = SharedAcl::new(IpAcl::empty(Action::Allow));
/// assert_eq!(shared.lookup("10.0.0.1".parse().unwrap()), Action::Allow);
///
/// let list = RuleList::parse("deny 10.0.0.0/8\n").unwrap();
/// shared.reload(&list);
/// assert_eq!(shared.lookup("10.0.0.1".parse().unwrap()), Action::Deny);
/// ```
pub struct SharedAcl {
    inner: ArcSwap<IpAcl>,
    /// Generation counter, bumped on every swap.
    generation: std::sync::atomic::AtomicU64,
}

impl SharedAcl {
    pub fn new(acl: IpAcl) -> Self {
        Self {
            inner: ArcSwap::from_pointee(acl),
            generation: std::sync::atomic::AtomicU64::new(0),
        }
    }

    /// Snapshot of the current ACL.
    pub fn load(&self) -> Arc<IpAcl> {
        self.inner.load_full()
    }

    /// Classify `ip` against the current ACL.
    pub fn lookup(&self, ip: IpAddr) -> Action {
        self.inner.load().lookup(ip)
    }

    /// Publish a new ACL.
    pub fn store(&self, acl: IpAcl) {
        self.inner.store(Arc::new(acl));
        let generation = self
            .generation
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
            + 1;
        log::info!("Swapped in new ACL, generation {}", generation);
    }

    /// Compile `list` and publish it.
    pub fn reload(&self, list: &RuleList) {
        log::info!(
            "Reloading ACL from {} rules (default {})",
            list.len(),
            list.default_action()
        );
        self.store(list.compile());
    }

    /// Compile `rules` with `config` and publish the result.
    pub fn reload_from_rules(&self, rules: &[Rule], config: &AclConfig) {
        self.store(IpAcl::with_config(rules, config));
    }

    /// Number of swaps since creation.
    pub fn generation(&self) -> u64 {
        self.generation.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl From<IpAcl> for SharedAcl {
    fn from(acl: IpAcl) -> Self {
        Self::new(acl)
    }
}
