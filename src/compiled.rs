//! Compiled boundary array for O(log n) lookups.

use crate::addr::Address;
use crate::interval::IntervalSet;
use crate::range::AddrRange;
use crate::rule::RuleRange;
use crate::Action;

/// Immutable lookup structure for one address family.
///
/// `starts[i]` is the first address of the i-th interval. Intervals cover the
/// address space without gaps and alternate between allow and deny, so the
/// action of interval `i` depends only on the parity of `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSet<A> {
    starts: Box<[A]>,
    /// Whether even indices denote deny.
    deny_on_even: bool,
    default_action: Action,
}

impl<A: Address> CompiledSet<A> {
    /// Compile a finished interval set.
    ///
    /// `default_action` is folded in as the lowest-priority `/0` rule, so any
    /// addresses the set leaves uncovered resolve to it.
    ///
    /// # Panics
    /// If the filled set still has gaps or two adjacent entries sharing an
    /// action. That means the interval set itself is corrupt.
    pub fn compile(set: &IntervalSet<A>, default_action: Action) -> Self {
        let mut filled = set.clone();
        filled.insert(RuleRange::new(AddrRange::full(), default_action));
        let entries = filled.entries();
        for w in entries.windows(2) {
            assert!(
                w[0].end().checked_next() == Some(w[1].start()),
                "gap between compiled intervals {} and {}",
                w[0],
                w[1]
            );
            assert!(
                w[0].action != w[1].action,
                "adjacent compiled intervals {} and {} share an action",
                w[0],
                w[1]
            );
        }
        if let Some(last) = entries.last() {
            assert!(last.end().is_last(), "compiled intervals end at {}", last.end());
        }

        let deny_on_even = entries.first().map_or(default_action, |e| e.action).is_deny();
        Self {
            starts: entries.iter().map(|e| e.start()).collect(),
            deny_on_even,
            default_action,
        }
    }

    /// Classify `addr`.
    pub fn lookup(&self, addr: A) -> Action {
        match self.index_of(addr) {
            Some(i) => self.action_at(i),
            None => self.default_action,
        }
    }

    /// Number of intervals.
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// The boundary array.
    pub fn boundaries(&self) -> &[A] {
        &self.starts
    }

    pub fn default_action(&self) -> Action {
        self.default_action
    }

    /// Iterate over the compiled intervals with their actions.
    pub fn ranges(&self) -> impl Iterator<Item = RuleRange<A>> + '_ {
        self.starts.iter().enumerate().map(move |(i, &start)| {
            let end = match self.starts.get(i + 1) {
                Some(next) => next.wrapping_prev(),
                None => A::MAX,
            };
            RuleRange::new(AddrRange::new(start, end), self.action_at(i))
        })
    }

    /// Index of the interval holding `addr`, or `None` if `addr` sorts
    /// before every boundary.
    fn index_of(&self, addr: A) -> Option<usize> {
        self.starts.partition_point(|s| *s <= addr).checked_sub(1)
    }

    fn action_at(&self, i: usize) -> Action {
        if (i % 2 == 0) == self.deny_on_even {
            Action::Deny
        } else {
            Action::Allow
        }
    }
}
