//! Chat commands dispatched through the in-memory executor.

use super::helpers::{Relay, relay};
use chatops_relay::{
    alias::{adapters::ScriptedExecution, ports::ExecutionResponse},
    chat::{
        domain::{IncomingMessage, Recipient},
        services::MessageDisposition,
    },
};
use eyre::{Result, eyre};
use rstest::rstest;

async fn dispatch(relay: &Relay, text: &str) -> Result<()> {
    let message = IncomingMessage::new("alice", "#ops", text);
    match relay.handler.handle(&message).await {
        MessageDisposition::Dispatched(task) => Ok(task.await?),
        other => Err(eyre!("expected a dispatch, got {other:?}")),
    }
}

#[rstest]
#[tokio::test]
async fn accepted_command_reports_execution_id(relay: Relay) -> Result<()> {
    dispatch(&relay, "stanley: deploy chatops to production").await?;

    let requests = relay.executor.requests();
    let request = requests.first().ok_or_else(|| eyre!("no request sent"))?;
    assert_eq!(request.name, "pack_deploy");
    assert_eq!(request.format, "deploy {{pack}} to {{environment=staging}}");
    assert_eq!(request.command, "deploy chatops to production");
    assert_eq!(request.notification_channel, "chatops");

    let sent = relay.sink.sent();
    let reply = sent.first().ok_or_else(|| eyre!("no reply sent"))?;
    assert_eq!(reply.recipient, Recipient::Room("#ops".to_owned()));
    assert!(reply.text.contains("5f1e"), "reply was {:?}", reply.text);
    Ok(())
}

#[rstest]
#[case(ScriptedExecution::Respond(ExecutionResponse::new(500, "boom")), &["500", "boom"])]
#[case(ScriptedExecution::Respond(ExecutionResponse::new(404, "no such alias")), &["404", "no such alias"])]
#[case(ScriptedExecution::Fail("connection refused".to_owned()), &["error", "connection refused"])]
#[tokio::test]
async fn failed_command_reports_reason(
    relay: Relay,
    #[case] answer: ScriptedExecution,
    #[case] fragments: &[&str],
) -> Result<()> {
    relay.executor.push(answer);

    dispatch(&relay, "@stanley status").await?;

    let sent = relay.sink.sent();
    let reply = sent.first().ok_or_else(|| eyre!("no reply sent"))?;
    for fragment in fragments {
        assert!(reply.text.contains(fragment), "reply was {:?}", reply.text);
    }
    Ok(())
}

#[rstest]
#[tokio::test]
async fn concurrent_commands_all_complete(relay: Relay) -> Result<()> {
    let texts = ["stanley status", "stanley deploy a", "stanley deploy b"];
    let mut tasks = Vec::new();
    for text in texts {
        let message = IncomingMessage::new("alice", "#ops", text);
        match relay.handler.handle(&message).await {
            MessageDisposition::Dispatched(task) => tasks.push(task),
            other => return Err(eyre!("expected a dispatch for {text}, got {other:?}")),
        }
    }
    for task in tasks {
        task.await?;
    }

    assert_eq!(relay.executor.requests().len(), texts.len());
    assert_eq!(relay.sink.sent().len(), texts.len());
    Ok(())
}
