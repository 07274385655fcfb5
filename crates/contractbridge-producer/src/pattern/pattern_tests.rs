#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case("Orders.Events.**", PatternTarget::Recursive("Orders.Events".into()) ; "recursive")]
#[test_case("Orders.Events.*", PatternTarget::Exact("Orders.Events".into()) ; "exact")]
#[test_case("Orders.ICustomerEvent", PatternTarget::Type("Orders.ICustomerEvent".into()) ; "type")]
#[test_case("OrderCreated", PatternTarget::Type("OrderCreated".into()) ; "bare type")]
#[test_case("**", PatternTarget::Recursive(String::new()) ; "everything")]
#[test_case("*", PatternTarget::Exact(String::new()) ; "root namespace")]
#[test_case("  Orders.*  ", PatternTarget::Exact("Orders".into()) ; "trimmed")]
fn PatternTarget___parse___recognizes_forms(input: &str, expected: PatternTarget) {
    assert_eq!(PatternTarget::parse(input).unwrap(), expected);
}

#[test_case("" ; "blank")]
#[test_case("Orders**" ; "wildcard without dot")]
#[test_case("Orders.*.Events" ; "inner wildcard")]
#[test_case("Orders..Events.*" ; "empty segment")]
#[test_case("Orders.Order Created" ; "whitespace")]
#[test_case(".Orders" ; "leading dot")]
fn PatternTarget___parse___rejects_malformed(input: &str) {
    let err = PatternTarget::parse(input).unwrap_err();

    assert!(err.is_configuration());
}

#[test]
fn PatternTarget___display___renders_pattern_form() {
    for pattern in ["Orders.**", "Orders.*", "Orders.OrderCreated", "**", "*"] {
        assert_eq!(PatternTarget::parse(pattern).unwrap().to_string(), pattern);
    }
}

#[test]
fn DiscoveryPattern___from_str___reads_classification_suffix() {
    let pattern: DiscoveryPattern = "Orders.Commands.*=command".parse().unwrap();

    assert_eq!(pattern, DiscoveryPattern::command("Orders.Commands.*"));
}

#[test]
fn DiscoveryPattern___from_str___defaults_to_event() {
    let pattern: DiscoveryPattern = "Orders.Events.**".parse().unwrap();

    assert_eq!(pattern.classification, Classification::Event);
}

#[test]
fn DiscoveryPattern___from_str___rejects_unknown_classification() {
    let err = "Orders.*=query".parse::<DiscoveryPattern>().unwrap_err();

    assert!(err.to_string().contains("query"));
}

#[test]
fn DiscoveryPattern___display___round_trips_through_from_str() {
    let pattern = DiscoveryPattern::event("Orders.ICustomerEvent");

    let parsed: DiscoveryPattern = pattern.to_string().parse().unwrap();

    assert_eq!(parsed, pattern);
}
