use chrono::{SecondsFormat, Utc};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use samples_lambda::adapters::event_publisher::EventBridgePublisher;
use samples_lambda::config::CreateCustomerConfig;
use samples_lambda::handlers::create_customer::{handle_create_customer_event, InvocationContext};
use samples_lambda::logging;
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init();
    let config = CreateCustomerConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let publisher = EventBridgePublisher::new(
        aws_sdk_eventbridge::Client::new(&aws_config),
        config.event_bus_name.clone(),
    );
    let (publisher, config) = (&publisher, &config);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        let publish_date = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let invocation = InvocationContext {
            publish_date: &publish_date,
            trace_id: event.context.xray_trace_id.as_deref(),
        };
        Ok::<_, Error>(handle_create_customer_event(
            event.payload,
            publisher,
            config,
            invocation,
        ))
    }))
    .await
}
