//! Then steps for chat command BDD scenarios.

use super::world::ChatCommandWorld;
use eyre::{Result, eyre};
use rstest_bdd_macros::then;

#[then(r#"the executor receives command "{command}" for alias "{alias}""#)]
fn executor_receives(world: &ChatCommandWorld, command: String, alias: String) -> Result<()> {
    let requests = world.executor.requests();
    let request = requests
        .first()
        .ok_or_else(|| eyre!("executor received no request"))?;

    assert_eq!(request.command, command);
    assert_eq!(request.name, alias);
    Ok(())
}

#[then("the executor receives nothing")]
fn executor_receives_nothing(world: &ChatCommandWorld) {
    assert!(world.executor.requests().is_empty());
}

#[then(r#""{room}" is told a message containing "{fragment}""#)]
fn room_is_told(world: &ChatCommandWorld, room: String, fragment: String) -> Result<()> {
    let told = world
        .sink
        .sent()
        .into_iter()
        .any(|message| message.recipient.name() == room && message.text.contains(&fragment));
    if told {
        Ok(())
    } else {
        Err(eyre!("{room} was not told {fragment:?}: {:?}", world.sink.sent()))
    }
}

#[then(r#"the text "{text}" resolves to alias "{alias}""#)]
fn text_resolves(world: &ChatCommandWorld, text: String, alias: String) -> Result<()> {
    let resolved = world
        .resolver
        .resolve(&text)
        .ok_or_else(|| eyre!("{text:?} did not resolve"))?;

    assert_eq!(resolved.alias_name(), alias);
    Ok(())
}

#[then(r#"the text "{text}" resolves to nothing"#)]
fn text_resolves_to_nothing(world: &ChatCommandWorld, text: String) {
    assert!(world.resolver.resolve(&text).is_none());
}

#[then("the reload fails")]
fn reload_fails(world: &ChatCommandWorld) -> Result<()> {
    match &world.last_refresh {
        Some(Err(_)) => Ok(()),
        Some(Ok(outcome)) => Err(eyre!("reload unexpectedly succeeded: {outcome:?}")),
        None => Err(eyre!("no reload was attempted")),
    }
}
