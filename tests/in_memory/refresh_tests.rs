//! Refresh cycles against a changing alias source.

use super::helpers::{Relay, relay};
use chatops_relay::alias::domain::AliasDefinition;
use eyre::Result;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn refresh_replaces_listing(relay: Relay) -> Result<()> {
    relay.source.set_aliases([
        AliasDefinition::new("reboot").with_format("reboot {{host}}"),
    ]);

    let outcome = relay.refresher.refresh_once().await?;

    assert_eq!(outcome.aliases, 1);
    assert_eq!(outcome.matchers, 1);
    assert!(relay.resolver.resolve("reboot web-01").is_some());
    assert!(relay.resolver.resolve("status").is_none());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn failed_refresh_keeps_previous_listing(relay: Relay) {
    let before = relay.registry.current();
    relay.source.fail_with("service unavailable");

    let result = relay.refresher.refresh_once().await;

    assert!(result.is_err());
    let after = relay.registry.current();
    assert_eq!(after.built_at(), before.built_at());
    assert_eq!(after.len(), before.len());
    let resolved = relay.resolver.resolve("status").expect("old listing still resolves");
    assert_eq!(resolved.alias_name(), "status");
}

#[rstest]
#[tokio::test]
async fn broken_formats_are_skipped_during_refresh(relay: Relay) -> Result<()> {
    relay.source.set_aliases([
        AliasDefinition::new("mixed")
            .with_format("run (unclosed {{cmd}}")
            .with_format("run {{cmd}}"),
        AliasDefinition::new("only_broken").with_format("broken [ {{x}}"),
    ]);

    let outcome = relay.refresher.refresh_once().await?;

    assert_eq!(outcome.aliases, 1);
    assert_eq!(outcome.matchers, 1);
    let resolved = relay
        .resolver
        .resolve("run uptime")
        .expect("valid format still resolves");
    assert_eq!(resolved.format(), "run {{cmd}}");
    Ok(())
}
