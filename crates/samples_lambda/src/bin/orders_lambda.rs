use lambda_runtime::{service_fn, Error, LambdaEvent};
use samples_lambda::adapters::message_queue::SqsMessageQueue;
use samples_lambda::adapters::order_status::DynamoOrderStatusStore;
use samples_lambda::config::OrdersConfig;
use samples_lambda::handlers::orders::handle_orders_event;
use samples_lambda::logging;
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init();
    let config = OrdersConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let queue = SqsMessageQueue::new(aws_sdk_sqs::Client::new(&aws_config));
    let statuses = DynamoOrderStatusStore::new(
        aws_sdk_dynamodb::Client::new(&aws_config),
        config.order_details_table.clone(),
    );
    let (queue, statuses, config) = (&queue, &statuses, &config);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        Ok::<_, Error>(handle_orders_event(event.payload, queue, statuses, config))
    }))
    .await
}
