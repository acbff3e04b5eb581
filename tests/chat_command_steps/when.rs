//! When steps for chat command BDD scenarios.

use super::world::{ChatCommandWorld, run_async};
use chatops_relay::chat::{domain::IncomingMessage, services::MessageDisposition};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#""{user}" types "{text}" in "{room}""#)]
fn user_types(
    world: &mut ChatCommandWorld,
    user: String,
    text: String,
    room: String,
) -> Result<(), eyre::Report> {
    let message = IncomingMessage::new(user, room, text);
    if let MessageDisposition::Dispatched(task) = run_async(world.handler.handle(&message)) {
        run_async(task).wrap_err("dispatch task")?;
    }
    Ok(())
}

#[when("the commands are reloaded")]
fn commands_reloaded(world: &mut ChatCommandWorld) {
    world.last_refresh = Some(run_async(world.refresher.refresh_once()));
}
