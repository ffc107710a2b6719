//! Sorted, coalesced interval set built by first-match insertion.
//!
//! [`IntervalSet::insert`] folds a lower-priority rule range into the set:
//! addresses already covered keep their action, and only the gaps take the
//! new action. Inserting rules in list order therefore reproduces a
//! top-to-bottom first-match scan.

use crate::addr::Address;
use crate::range::AddrRange;
use crate::rule::{format_rule_ranges, RuleRange};

/// One address family's working set of rule ranges.
///
/// Invariants held after every insertion:
/// - entries are sorted by start and do not overlap;
/// - no two adjacent entries share an action (they would have been merged).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalSet<A> {
    entries: Vec<RuleRange<A>>,
    trace: bool,
}

impl<A: Address> Default for IntervalSet<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Address> IntervalSet<A> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            trace: false,
        }
    }

    /// Enable or disable per-step trace logging for insertions.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Current entries, sorted by start address.
    pub fn entries(&self) -> &[RuleRange<A>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if the entries cover every address of the family.
    pub fn covers_all(&self) -> bool {
        let (Some(first), Some(last)) = (self.entries.first(), self.entries.last()) else {
            return false;
        };
        first.start().is_first()
            && last.end().is_last()
            && self
                .entries
                .windows(2)
                .all(|w| w[0].end().checked_next() == Some(w[1].start()))
    }

    pub fn into_entries(self) -> Vec<RuleRange<A>> {
        self.entries
    }

    /// Insert `incoming` with lower priority than everything already present.
    ///
    /// Portions of `incoming` already covered are dropped; the uncovered
    /// portions are added with `incoming.action` and merged with any
    /// adjacent entry of the same action.
    pub fn insert(&mut self, incoming: RuleRange<A>) {
        if self.trace {
            log::trace!(
                "insert start, set=[{}], incoming={}",
                format_rule_ranges(&self.entries),
                incoming
            );
        }

        let mut out: Vec<RuleRange<A>> = Vec::with_capacity(self.entries.len() + 2);
        let mut existing = std::mem::take(&mut self.entries).into_iter().peekable();
        // Uncovered remainder of `incoming`; `None` once exhausted.
        let mut rest = Some(incoming.range);

        while let Some(r) = rest {
            let Some(&entry) = existing.peek() else {
                break;
            };

            if entry.start() <= r.start() {
                push_coalesced(&mut out, entry);
                existing.next();
                if entry.end() >= r.start() {
                    rest = entry.end().checked_next().and_then(|s| r.with_start(s));
                }
                if self.trace {
                    log::trace!("kept {}, rest={}", entry, fmt_rest(rest));
                }
            } else {
                // entry.start() > r.start() >= MIN, so the predecessor exists.
                let gap_end = r.end().min(entry.start().wrapping_prev());
                let gap = RuleRange::new(AddrRange::new(r.start(), gap_end), incoming.action);
                push_coalesced(&mut out, gap);
                rest = gap_end.checked_next().and_then(|s| r.with_start(s));
                if self.trace {
                    log::trace!("filled gap {}, rest={}", gap, fmt_rest(rest));
                }
            }
        }

        match rest {
            Some(r) => push_coalesced(&mut out, RuleRange::new(r, incoming.action)),
            None => existing.for_each(|entry| push_coalesced(&mut out, entry)),
        }

        self.entries = out;

        if self.trace {
            log::trace!("insert done, set=[{}]", format_rule_ranges(&self.entries));
        }
    }
}

/// Append `next`, extending the last entry instead when it has the same
/// action and ends right before `next` starts.
fn push_coalesced<A: Address>(out: &mut Vec<RuleRange<A>>, next: RuleRange<A>) {
    if let Some(last) = out.last_mut() {
        if last.action == next.action && last.end().checked_next() == Some(next.start()) {
            last.range.set_end(next.end());
            return;
        }
    }
    out.push(next);
}

fn fmt_rest<A: Address>(rest: Option<AddrRange<A>>) -> String {
    match rest {
        Some(r) => r.to_string(),
        None => "<empty>".to_string(),
    }
}
