//! ipacl - IP address access control with logarithmic lookups.
//!
//! This crate compiles an ordered list of allow/deny rules over IPv4 and
//! IPv6 CIDR prefixes into a flat, sorted boundary array per address family.
//! Lookups binary-search that array and give the same answer as a linear
//! first-match scan over the original rules.
//!
//! # Features
//!
//! - **First-match semantics**: earlier rules shadow later ones, region by region
//! - **Arbitrary overlap**: nested, overlapping and adjacent prefixes all work
//! - **Minimal output**: adjacent same-action ranges are coalesced
//! - **Thread-safe**: compiled ACLs are immutable and shareable without locks
//! - **Hot reload**: [`SharedAcl`] swaps in a freshly compiled ACL atomically
//!
//! # Quick Start
//!
//! ```
//! use ipacl::{Action, RuleList};
//!
//! let list = RuleList::parse(
//!     "deny  192.168.1.1
//!      allow 192.168.1.0/24
//!      allow 2001:db8::/32
//!      deny  all",
//! )?;
//! let acl = list.compile();
//!
//! assert_eq!(acl.lookup("192.168.1.1".parse().unwrap()), Action::Deny);
//! assert_eq!(acl.lookup("192.168.1.2".parse().unwrap()), Action::Allow);
//! assert_eq!(acl.lookup("2001:db8::1".parse().unwrap()), Action::Allow);
//! assert_eq!(acl.lookup("8.8.8.8".parse().unwrap()), Action::Deny);
//! # Ok::<(), ipacl::Error>(())
//! ```
//!
//! # How It Works
//!
//! 1. Each rule is lowered to an inclusive address range ([`RuleRange`])
//! 2. Ranges are folded in priority order into an [`IntervalSet`], where a
//!    new rule only fills gaps left by earlier rules
//! 3. The default action is folded in last as a `/0` rule
//! 4. The resulting gap-free, alternating list becomes a [`CompiledSet`]:
//!    interval starts plus a parity flag saying which index parity is deny

mod acl;
mod action;
mod error;
mod linear;
mod shared;

pub mod addr;
pub mod compiled;
pub mod interval;
pub mod range;
pub mod rule;
pub mod ruleset;

// Re-export core types
pub use acl::{AclBuilder, IpAcl};
pub use action::Action;
pub use error::{Error, Result};

pub use addr::{Address, V4Addr, V6Addr};
pub use compiled::CompiledSet;
pub use interval::IntervalSet;
pub use range::AddrRange;
pub use rule::{LoweredRule, Rule, RuleRange};
pub use ruleset::{AclConfig, RuleList};

// Re-export hot reload wrapper
pub use shared::SharedAcl;

// Re-export the reference scanner for verification
pub use linear::LinearSearch;
