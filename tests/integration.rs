//! End-to-end scenarios: parse a rule list, compile, look up.

use ipacl::{Action, LinearSearch, RuleList};
use std::net::IpAddr;

struct Scenario {
    rules: &'static str,
    cases: &'static [(&'static str, Action)],
}

const SCENARIOS: &[Scenario] = &[
    Scenario {
        rules: "deny 192.0.2.0",
        cases: &[
            ("0.0.0.0", Action::Allow),
            ("192.0.1.255", Action::Allow),
            ("192.0.2.0", Action::Deny),
            ("192.0.2.1", Action::Allow),
            ("255.255.255.255", Action::Allow),
        ],
    },
    Scenario {
        rules: "allow 192.0.2.0",
        cases: &[("0.0.0.1", Action::Allow), ("192.0.2.0", Action::Allow)],
    },
    Scenario {
        rules: "allow 0.0.0.2\ndeny 0.0.0.1\ndeny 0.0.0.0",
        cases: &[("0.0.0.1", Action::Deny)],
    },
    Scenario {
        rules: "deny 192.0.0.1\nallow 0.0.0.1\nallow 192.0.0.0/7\nallow 0.0.0.0",
        cases: &[("::", Action::Allow)],
    },
    Scenario {
        rules: "
            deny  192.168.1.1
            allow 192.0.0.0/0
            deny  all
        ",
        cases: &[("192.168.1.1", Action::Deny), ("192.168.1.2", Action::Allow)],
    },
    Scenario {
        rules: "
            deny  192.168.1.1
            allow 192.168.1.0/24
            allow 10.1.1.0/16
            allow 2001:0db8::/32
            deny  all
        ",
        cases: &[
            ("0.0.0.0", Action::Deny),
            ("192.168.0.255", Action::Deny),
            ("192.168.1.0", Action::Allow),
            ("192.168.1.1", Action::Deny),
            ("192.168.1.2", Action::Allow),
            ("192.168.1.255", Action::Allow),
            ("192.168.2.0", Action::Deny),
            ("10.0.255.255", Action::Deny),
            ("10.1.0.0", Action::Allow),
            ("10.1.255.255", Action::Allow),
            ("10.2.0.0", Action::Deny),
            ("255.255.255.255", Action::Deny),
            ("::", Action::Deny),
            ("2001:0db7:ffff:ffff:ffff:ffff:ffff:ffff", Action::Deny),
            ("2001:0db8::", Action::Allow),
            ("2001:db8:ffff:ffff:ffff:ffff:ffff:ffff", Action::Allow),
            ("2001:db9::", Action::Deny),
            ("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff", Action::Deny),
        ],
    },
];

#[test]
fn test_scenarios_compiled_lookup() {
    for (i, scenario) in SCENARIOS.iter().enumerate() {
        let list = RuleList::parse(scenario.rules).unwrap();
        let acl = list.compile();
        for (input, want) in scenario.cases {
            let ip: IpAddr = input.parse().unwrap();
            assert_eq!(acl.lookup(ip), *want, "scenario={i}, input={input}, acl={acl}");
        }
    }
}

#[test]
fn test_scenarios_linear_oracle() {
    for (i, scenario) in SCENARIOS.iter().enumerate() {
        let list = RuleList::parse(scenario.rules).unwrap();
        let scan = LinearSearch::new(list.rules(), list.default_action());
        for (input, want) in scenario.cases {
            let ip: IpAddr = input.parse().unwrap();
            assert_eq!(scan.lookup(ip), *want, "scenario={i}, input={input}");
        }
    }
}

#[test]
fn test_mixed_family_dump() {
    let list = RuleList::parse(
        "
        deny  192.168.1.1
        allow 192.168.1.0/24
        allow 10.1.1.0/16
        allow 2001:0db8::/32
        deny  all
        ",
    )
    .unwrap();
    let acl = list.compile();
    assert_eq!(
        acl.to_string(),
        "IpAcl{v4:[!0.0.0.0-10.0.255.255, 10.1.0.0-10.1.255.255, !10.2.0.0-192.168.0.255, \
         192.168.1.0, !192.168.1.1, 192.168.1.2-192.168.1.255, !192.168.2.0-255.255.255.255], \
         v6:[!::-2001:db7:ffff:ffff:ffff:ffff:ffff:ffff, \
         2001:db8::-2001:db8:ffff:ffff:ffff:ffff:ffff:ffff, \
         !2001:db9::-ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff]}"
    );
    assert_eq!(acl.v4().boundaries().len(), 7);
}

#[test]
fn test_max_address_rules() {
    let list = RuleList::parse(
        "
        deny  255.255.255.255
        allow 255.255.255.0/24
        deny  ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff
        allow 0.0.0.0
        deny  all
        ",
    )
    .unwrap();
    let acl = list.compile();
    let lookup = |s: &str| acl.lookup(s.parse().unwrap());

    assert_eq!(lookup("255.255.255.255"), Action::Deny);
    assert_eq!(lookup("255.255.255.254"), Action::Allow);
    assert_eq!(lookup("255.255.254.255"), Action::Deny);
    assert_eq!(lookup("0.0.0.0"), Action::Allow);
    assert_eq!(lookup("0.0.0.1"), Action::Deny);
    assert_eq!(lookup("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff"), Action::Deny);
    assert_eq!(lookup("::"), Action::Deny);
}

#[test]
fn test_default_action_fallback() {
    let list = RuleList::parse("deny 10.0.0.0/8\nallow fc00::/7\n").unwrap();
    let acl = list.compile();
    assert_eq!(acl.lookup("11.0.0.0".parse().unwrap()), Action::Allow);
    assert_eq!(acl.lookup("fe80::1".parse().unwrap()), Action::Allow);
    assert_eq!(acl.lookup("10.255.255.255".parse().unwrap()), Action::Deny);
}
