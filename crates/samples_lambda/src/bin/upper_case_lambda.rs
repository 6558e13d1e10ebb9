use lambda_runtime::{service_fn, Error, LambdaEvent};
use samples_core::transformation::TransformationOutcome;
use samples_lambda::adapters::object_store::S3ObjectStore;
use samples_lambda::config::UpperCaseConfig;
use samples_lambda::handlers::decode_s3_event;
use samples_lambda::handlers::upper_case::handle_upper_case_event;
use samples_lambda::logging;
use serde_json::Value;

async fn handle_request(
    event: LambdaEvent<Value>,
    store: &S3ObjectStore,
    config: &UpperCaseConfig,
) -> Result<TransformationOutcome, Error> {
    let s3_event = decode_s3_event(event.payload)?;
    Ok(handle_upper_case_event(s3_event.as_ref(), store, config)?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init();
    let config = UpperCaseConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = S3ObjectStore::new(aws_sdk_s3::Client::new(&aws_config));
    let (store, config) = (&store, &config);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        handle_request(event, store, config)
    }))
    .await
}
