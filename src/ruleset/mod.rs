//! Line-oriented rule list parsing and configuration.
//!
//! Format, one rule per line:
//!
//! ```text
//! # comment
//! deny  192.168.1.1
//! allow 192.168.1.0/24
//! allow 2001:db8::/32
//! deny  all
//! ```
//!
//! The `all` line sets the default action. It may appear at most once and
//! must come last; without it the default is allow.

mod config;

pub use config::AclConfig;

use ipnet::IpNet;
use std::io::{BufRead, BufReader, Read};
use std::net::IpAddr;

use crate::error::{Error, Result};
use crate::rule::Rule;
use crate::{Action, IpAcl};

/// An ordered rule list plus its default action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleList {
    rules: Vec<Rule>,
    default_action: Action,
}

impl RuleList {
    /// Create a rule list from rules in priority order.
    pub fn new(rules: Vec<Rule>, default_action: Action) -> Self {
        Self {
            rules,
            default_action,
        }
    }

    /// Parse rules from text.
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_reader(text.as_bytes())
    }

    /// Parse rules from a reader.
    ///
    /// Fails on the first malformed line, reporting its 1-based number.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rules = Vec::new();
        let mut default_action: Option<Action> = None;

        for (idx, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;

            match parse_line(&line, line_no)? {
                Line::Blank => {}
                Line::Default(action) => {
                    if default_action.is_some() {
                        return Err(Error::DuplicateDefault { line: line_no });
                    }
                    default_action = Some(action);
                }
                Line::Rule(rule) => {
                    if default_action.is_some() {
                        return Err(Error::RuleAfterDefault { line: line_no });
                    }
                    rules.push(rule);
                }
            }
        }

        Ok(Self {
            rules,
            default_action: default_action.unwrap_or(Action::Allow),
        })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn default_action(&self) -> Action {
        self.default_action
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Configuration carrying this list's default action.
    pub fn config(&self) -> AclConfig {
        AclConfig::new(self.default_action)
    }

    /// Compile into an [`IpAcl`].
    pub fn compile(&self) -> IpAcl {
        IpAcl::compile(&self.rules, self.default_action)
    }

    /// Compile with extra options; the default action still comes from the list.
    pub fn compile_with(&self, config: AclConfig) -> IpAcl {
        let config = AclConfig {
            default_action: self.default_action,
            ..config
        };
        IpAcl::with_config(&self.rules, &config)
    }
}

/// A classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Line {
    Blank,
    Default(Action),
    Rule(Rule),
}

/// Parse one line of the rule format.
pub(crate) fn parse_line(line: &str, line_no: usize) -> Result<Line> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Line::Blank);
    }

    let fields: Vec<&str> = line.split_whitespace().collect();
    let &[action, target] = fields.as_slice() else {
        return Err(Error::FieldCount {
            line: line_no,
            count: fields.len(),
        });
    };

    let action: Action = action.parse().map_err(|_| Error::UnknownAction {
        line: line_no,
        action: action.to_string(),
    })?;

    if target == "all" {
        return Ok(Line::Default(action));
    }

    match parse_target(target) {
        Some(net) => Ok(Line::Rule(Rule::new(net, action))),
        None if strip_zone(target).and_then(|s| parse_target(&s)).is_some() => {
            Err(Error::ZoneIdentifier {
                line: line_no,
                target: target.to_string(),
            })
        }
        None => Err(Error::InvalidTarget {
            line: line_no,
            target: target.to_string(),
        }),
    }
}

/// Remove a `%zone` suffix from an address, keeping any `/len` after it.
fn strip_zone(s: &str) -> Option<String> {
    let (addr, rest) = s.split_once('%')?;
    let prefix = rest.find('/').map_or("", |i| &rest[i..]);
    Some(format!("{addr}{prefix}"))
}

/// Parse a CIDR prefix or a bare address.
fn parse_target(s: &str) -> Option<IpNet> {
    if let Ok(net) = s.parse::<IpNet>() {
        return Some(net);
    }
    s.parse::<IpAddr>().ok().map(IpNet::from)
}
