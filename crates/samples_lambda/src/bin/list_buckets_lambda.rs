use lambda_runtime::{service_fn, Error, LambdaEvent};
use samples_lambda::adapters::bucket_lister::S3BucketLister;
use samples_lambda::handlers::list_buckets::handle_list_buckets_event;
use samples_lambda::logging;
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init();
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let lister = S3BucketLister::new(aws_sdk_s3::Client::new(&aws_config));
    let lister = &lister;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        Ok::<_, Error>(handle_list_buckets_event(event.payload, lister))
    }))
    .await
}
