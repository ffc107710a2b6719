//! Inclusive address ranges.

use std::fmt;

use ipnet::{Ipv4Net, Ipv6Net};

use crate::addr::{Address, V4Addr, V6Addr};

/// An inclusive `[start, end]` range over one address family.
///
/// `start <= end` always holds; constructing a range that violates it is a
/// bug in the caller and panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddrRange<A> {
    start: A,
    end: A,
}

impl<A: Address> AddrRange<A> {
    /// Create a range from its bounds.
    ///
    /// # Panics
    /// If `start > end`.
    pub fn new(start: A, end: A) -> Self {
        assert!(start <= end, "inverted address range {start}-{end}");
        Self { start, end }
    }

    /// Range holding a single address.
    pub fn single(addr: A) -> Self {
        Self {
            start: addr,
            end: addr,
        }
    }

    /// The whole address space of the family.
    pub fn full() -> Self {
        Self {
            start: A::MIN,
            end: A::MAX,
        }
    }

    /// Range covered by the CIDR prefix `addr/prefix_len`.
    ///
    /// Host bits set in `addr` are ignored. A length beyond the family width
    /// is treated as a full-width prefix.
    pub fn from_prefix(addr: A, prefix_len: u8) -> Self {
        Self {
            start: addr.network(prefix_len),
            end: addr.broadcast(prefix_len),
        }
    }

    pub fn start(&self) -> A {
        self.start
    }

    pub fn end(&self) -> A {
        self.end
    }

    /// The same range starting at `start`, or `None` if that leaves it empty.
    pub(crate) fn with_start(self, start: A) -> Option<Self> {
        (start <= self.end).then_some(Self {
            start,
            end: self.end,
        })
    }

    pub(crate) fn set_end(&mut self, end: A) {
        assert!(self.start <= end, "inverted address range {}-{end}", self.start);
        self.end = end;
    }

    /// Closed-interval intersection test.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// True if one range ends right before the other starts.
    ///
    /// A range ending at [`Address::MAX`] is not adjacent to one starting at
    /// [`Address::MIN`].
    pub fn is_neighbor(&self, other: &Self) -> bool {
        self.end.checked_next() == Some(other.start) || other.end.checked_next() == Some(self.start)
    }

    /// True if `other` lies entirely inside this range.
    pub fn contains(&self, other: &Self) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// True if `addr` lies inside this range.
    pub fn contains_addr(&self, addr: A) -> bool {
        self.start <= addr && addr <= self.end
    }
}

impl From<Ipv4Net> for AddrRange<V4Addr> {
    fn from(net: Ipv4Net) -> Self {
        Self::from_prefix(V4Addr::from(net.addr()), net.prefix_len())
    }
}

impl From<Ipv6Net> for AddrRange<V6Addr> {
    fn from(net: Ipv6Net) -> Self {
        Self::from_prefix(V6Addr::from(net.addr()), net.prefix_len())
    }
}

impl<A: Address> fmt::Display for AddrRange<A> {
    /// `start-end`, or just `start` for a single address.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)?;
        if self.end != self.start {
            write!(f, "-{}", self.end)?;
        }
        Ok(())
    }
}
