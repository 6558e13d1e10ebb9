use lambda_runtime::{service_fn, Error, LambdaEvent};
use samples_lambda::adapters::ticket_store::DynamoTicketStore;
use samples_lambda::config::TicketConfig;
use samples_lambda::handlers::ticket::handle_ticket_event;
use samples_lambda::logging;
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init();
    let config = TicketConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = DynamoTicketStore::new(aws_sdk_dynamodb::Client::new(&aws_config), config.table_name);
    let store = &store;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        Ok::<_, Error>(handle_ticket_event(event.payload, store))
    }))
    .await
}
