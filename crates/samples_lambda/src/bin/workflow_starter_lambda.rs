use aws_lambda_events::event::sqs::SqsEvent;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use samples_lambda::adapters::workflow::{StartedExecution, StepFunctionsStarter};
use samples_lambda::config::WorkflowConfig;
use samples_lambda::handlers::workflow_starter::handle_workflow_event;
use samples_lambda::logging;

async fn handle_request(
    event: LambdaEvent<SqsEvent>,
    starter: &StepFunctionsStarter,
) -> Result<Vec<StartedExecution>, Error> {
    Ok(handle_workflow_event(&event.payload, starter)?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init();
    let config = WorkflowConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let starter = StepFunctionsStarter::new(
        aws_sdk_sfn::Client::new(&aws_config),
        config.state_machine_arn,
    );
    let starter = &starter;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<SqsEvent>| {
        handle_request(event, starter)
    }))
    .await
}
