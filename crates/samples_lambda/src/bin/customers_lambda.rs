use lambda_runtime::{service_fn, Error, LambdaEvent};
use samples_lambda::adapters::customer_store::DynamoCustomerStore;
use samples_lambda::adapters::message_queue::SqsMessageQueue;
use samples_lambda::config::CustomersConfig;
use samples_lambda::handlers::customers::handle_customers_event;
use samples_lambda::logging;
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init();
    let config = CustomersConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = DynamoCustomerStore::new(
        aws_sdk_dynamodb::Client::new(&aws_config),
        config.table_name.clone(),
    );
    let queue = SqsMessageQueue::new(aws_sdk_sqs::Client::new(&aws_config));
    let (store, queue, config) = (&store, &queue, &config);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        Ok::<_, Error>(handle_customers_event(event.payload, store, queue, config))
    }))
    .await
}
