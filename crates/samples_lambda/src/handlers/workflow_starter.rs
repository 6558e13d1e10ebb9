use aws_lambda_events::event::sqs::SqsEvent;
use uuid::Uuid;

use super::HandlerError;
use crate::adapters::workflow::{StartedExecution, WorkflowStarter};

/// Starts one state machine execution per SQS message, passing the message
/// body through as execution input.
///
/// Each execution is named with a fresh transaction id so redelivered
/// messages start distinct executions.
pub fn handle_workflow_event(
    event: &SqsEvent,
    starter: &dyn WorkflowStarter,
) -> Result<Vec<StartedExecution>, HandlerError> {
    let mut started = Vec::with_capacity(event.records.len());

    for message in &event.records {
        let Some(body) = message.body.as_deref() else {
            tracing::warn!(
                component = "workflow_starter",
                event = "message_without_body",
                message_id = message.message_id.as_deref().unwrap_or_default()
            );
            continue;
        };

        let transaction_id = Uuid::new_v4().to_string();
        let execution = starter.start_execution(&transaction_id, body)?;
        tracing::info!(
            component = "workflow_starter",
            event = "execution_started",
            transaction_id = %transaction_id,
            execution_arn = %execution.execution_arn
        );
        started.push(execution);
    }

    if started.is_empty() {
        return Err(HandlerError::EmptyBatch);
    }
    Ok(started)
}
