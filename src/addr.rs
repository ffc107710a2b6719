//! Fixed-width address primitives for IPv4 and IPv6.
//!
//! Both families are plain unsigned integers in network order, so the
//! interval code can treat them as points on a line. [`Address`] is the
//! capability the builder and compiled set are written against.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::Error;

/// A totally ordered, fixed-width address value.
///
/// `wrapping_next` on [`Address::MAX`] yields [`Address::MIN`]; callers that
/// need "the next address, if any" use `checked_next` instead.
pub trait Address:
    Copy + Ord + Eq + std::hash::Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Width of the address in bits.
    const BITS: u8;
    /// The all-zeros address.
    const MIN: Self;
    /// The all-ones address.
    const MAX: Self;

    /// Successor, wrapping to [`Address::MIN`] after [`Address::MAX`].
    fn wrapping_next(self) -> Self;

    /// Predecessor, wrapping to [`Address::MAX`] before [`Address::MIN`].
    fn wrapping_prev(self) -> Self;

    /// Keep the top `prefix_len` bits and clear the rest.
    fn network(self, prefix_len: u8) -> Self;

    /// Keep the top `prefix_len` bits and set the rest.
    fn broadcast(self, prefix_len: u8) -> Self;

    fn is_first(self) -> bool {
        self == Self::MIN
    }

    fn is_last(self) -> bool {
        self == Self::MAX
    }

    /// Successor, or `None` at the end of the address space.
    fn checked_next(self) -> Option<Self> {
        if self.is_last() {
            None
        } else {
            Some(self.wrapping_next())
        }
    }

    /// Predecessor, or `None` at the start of the address space.
    fn checked_prev(self) -> Option<Self> {
        if self.is_first() {
            None
        } else {
            Some(self.wrapping_prev())
        }
    }
}

macro_rules! address_type {
    ($(#[$meta:meta])* $name:ident, $int:ty, $std:ty, $bytes:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name($int);

        impl $name {
            /// Create from the raw integer value.
            pub const fn new(value: $int) -> Self {
                Self(value)
            }

            /// Raw integer value.
            pub const fn value(self) -> $int {
                self.0
            }

            /// Big-endian bytes.
            pub const fn octets(self) -> [u8; $bytes] {
                self.0.to_be_bytes()
            }

            fn host_mask(prefix_len: u8) -> $int {
                <$int>::MAX.checked_shr(u32::from(prefix_len)).unwrap_or(0)
            }
        }

        impl Address for $name {
            const BITS: u8 = <$int>::BITS as u8;
            const MIN: Self = Self(0);
            const MAX: Self = Self(<$int>::MAX);

            fn wrapping_next(self) -> Self {
                Self(self.0.wrapping_add(1))
            }

            fn wrapping_prev(self) -> Self {
                Self(self.0.wrapping_sub(1))
            }

            fn network(self, prefix_len: u8) -> Self {
                Self(self.0 & !Self::host_mask(prefix_len))
            }

            fn broadcast(self, prefix_len: u8) -> Self {
                Self(self.0 | Self::host_mask(prefix_len))
            }
        }

        impl From<[u8; $bytes]> for $name {
            fn from(bytes: [u8; $bytes]) -> Self {
                Self(<$int>::from_be_bytes(bytes))
            }
        }

        impl From<$std> for $name {
            fn from(ip: $std) -> Self {
                Self::from(ip.octets())
            }
        }

        impl From<$name> for $std {
            fn from(addr: $name) -> Self {
                <$std>::from(addr.octets())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<$std>()
                    .map(Self::from)
                    .map_err(|_| Error::InvalidAddress(s.to_string()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&<$std>::from(*self), f)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }
    };
}

address_type!(
    /// An IPv4 address as a 32-bit integer.
    V4Addr,
    u32,
    Ipv4Addr,
    4
);

address_type!(
    /// An IPv6 address as a 128-bit integer.
    V6Addr,
    u128,
    Ipv6Addr,
    16
);

impl V6Addr {
    /// Build from the high and low 64-bit halves.
    pub const fn from_halves(hi: u64, lo: u64) -> Self {
        Self(((hi as u128) << 64) | lo as u128)
    }

    /// Split into the high and low 64-bit halves.
    pub const fn halves(self) -> (u64, u64) {
        ((self.0 >> 64) as u64, self.0 as u64)
    }
}
