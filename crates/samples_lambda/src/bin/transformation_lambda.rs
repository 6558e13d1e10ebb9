use chrono::Utc;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use samples_core::transformation::TransformationOutcome;
use samples_lambda::adapters::object_store::S3ObjectStore;
use samples_lambda::adapters::record_table::DynamoRecordTable;
use samples_lambda::config::TransformationConfig;
use samples_lambda::handlers::decode_s3_event;
use samples_lambda::handlers::transformation::handle_transformation_event;
use samples_lambda::logging;
use serde_json::Value;

struct Dependencies {
    objects: S3ObjectStore,
    records: DynamoRecordTable,
    config: TransformationConfig,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &Dependencies,
) -> Result<TransformationOutcome, Error> {
    let s3_event = decode_s3_event(event.payload)?;
    Ok(handle_transformation_event(
        s3_event.as_ref(),
        &deps.objects,
        &deps.records,
        &deps.config,
        Utc::now().timestamp(),
    )?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init();
    let config = TransformationConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = Dependencies {
        objects: S3ObjectStore::new(aws_sdk_s3::Client::new(&aws_config)),
        records: DynamoRecordTable::new(
            aws_sdk_dynamodb::Client::new(&aws_config),
            config.table_name.clone(),
        ),
        config,
    };
    let deps = &deps;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        handle_request(event, deps)
    }))
    .await
}
