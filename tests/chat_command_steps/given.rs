//! Given steps for chat command BDD scenarios.

use super::world::{ChatCommandWorld, run_async};
use chatops_relay::alias::{
    adapters::ScriptedExecution, domain::AliasDefinition, ports::ExecutionResponse,
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"the service advertises alias "{name}" with format "{format}""#)]
fn service_advertises_alias(world: &mut ChatCommandWorld, name: String, format: String) {
    world
        .advertised
        .push(AliasDefinition::new(name).with_format(format));
    world.source.set_aliases(world.advertised.clone());
}

#[given("the commands have been loaded")]
fn commands_loaded(world: &mut ChatCommandWorld) -> Result<(), eyre::Report> {
    run_async(world.refresher.refresh_once()).wrap_err("initial command load")?;
    Ok(())
}

#[given("the service becomes unavailable")]
fn service_unavailable(world: &mut ChatCommandWorld) {
    world.source.fail_with("503 service unavailable");
}

#[given(r#"the executor answers status {status:u16} with "{body}""#)]
fn executor_answers(world: &mut ChatCommandWorld, status: u16, body: String) {
    world
        .executor
        .push(ScriptedExecution::Respond(ExecutionResponse::new(status, body)));
}
