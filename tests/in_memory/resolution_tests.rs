//! Resolution of chat text against an installed listing.

use super::helpers::{Relay, relay};
use rstest::rstest;

#[rstest]
#[case("deploy chatops to production", "pack_deploy", "deploy {{pack}} to {{environment=staging}}")]
#[case("deploy chatops", "pack_deploy", "deploy {{pack}}")]
#[case("Restart NGINX on web-01", "service_restart", "restart {{service}} on {{host}}")]
#[case("STATUS", "status", "status")]
#[case("status verbose=true", "status", "status")]
fn text_resolves_to_owning_alias(
    relay: Relay,
    #[case] text: &str,
    #[case] alias: &str,
    #[case] format: &str,
) {
    let resolved = relay.resolver.resolve(text).expect("text resolves");

    assert_eq!(resolved.alias_name(), alias);
    assert_eq!(resolved.format(), format);
    assert_eq!(resolved.raw_text(), text.to_lowercase());
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("reboot everything")]
#[case("please restart nginx")]
fn unknown_text_resolves_to_nothing(relay: Relay, #[case] text: &str) {
    assert!(relay.resolver.resolve(text).is_none());
}

#[rstest]
fn parameters_are_extracted_from_resolved_format(relay: Relay) {
    let snapshot = relay.registry.current();
    let matcher = snapshot
        .matcher("restart {{service}} on {{host}}")
        .expect("format is registered");

    let extracted = matcher
        .extract("restart nginx on web-01 force=yes")
        .expect("text matches");

    assert_eq!(extracted.binding("service"), Some("nginx"));
    assert_eq!(extracted.binding("host"), Some("web-01"));
    assert_eq!(extracted.extra.get("force").map(String::as_str), Some("yes"));
}

#[rstest]
fn help_lists_every_format_in_listing_order(relay: Relay) {
    let help = relay.registry.current().help_entries("stanley");

    assert_eq!(
        help,
        vec![
            "stanley deploy {{pack}} to {{environment=staging}} - Deploy a pack",
            "stanley deploy {{pack}} - Deploy a pack",
            "stanley restart {{service}} on {{host}} - Restart a service on a host",
            "stanley status",
        ]
    );
}
