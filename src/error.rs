//! Error types for ipacl.

use thiserror::Error;

/// Error type for ipacl operations.
///
/// The compiler and lookup path never fail; these errors come from turning
/// text into addresses, actions and rule lists.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid IP address text
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),

    /// Invalid action text
    #[error(r#"invalid action {0:?}, must be "allow" or "deny""#)]
    InvalidAction(String),

    /// A rule line did not have exactly two fields
    #[error("two fields must exist at line {line}, found {count}")]
    FieldCount { line: usize, count: usize },

    /// Unknown action keyword on a rule line
    #[error(r#"invalid action {action:?} at line {line}, must be "allow" or "deny""#)]
    UnknownAction { line: usize, action: String },

    /// Target is neither a CIDR, an address nor `all`
    #[error(r#"invalid target {target:?} at line {line}, must be a valid CIDR, an IP address or "all""#)]
    InvalidTarget { line: usize, target: String },

    /// Target carries an IPv6 zone identifier
    #[error(r#"invalid target {target:?} at line {line}, must not contain "%""#)]
    ZoneIdentifier { line: usize, target: String },

    /// Second `all` line
    #[error(r#"duplicated line for target "all" at line {line}"#)]
    DuplicateDefault { line: usize },

    /// Rule line after the `all` line
    #[error(r#"target "all" line followed by non-"all" line at line {line}"#)]
    RuleAfterDefault { line: usize },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ipacl operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_line() {
        let err = Error::DuplicateDefault { line: 7 };
        assert_eq!(err.to_string(), r#"duplicated line for target "all" at line 7"#);

        let err = Error::FieldCount { line: 3, count: 1 };
        assert!(err.to_string().contains("line 3"));
    }
}
