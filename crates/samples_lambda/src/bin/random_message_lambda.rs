use lambda_runtime::{service_fn, Error, LambdaEvent};
use samples_lambda::handlers::random_message::{handle_random_message_event, RandomMessage};
use samples_lambda::logging;
use serde_json::Value;

async fn handle_request(event: LambdaEvent<Value>) -> Result<RandomMessage, Error> {
    let mut rng = rand::thread_rng();
    Ok(handle_random_message_event(event.payload, &mut rng)?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init();
    lambda_runtime::run(service_fn(handle_request)).await
}
