use aws_sdk_sqs::error::DisplayErrorContext;

use super::{block_on, AdapterError};

pub trait MessageQueue {
    /// Sends `body` and returns the message id.
    fn send_message(
        &self,
        queue_url: &str,
        body: &str,
        delay_seconds: Option<i32>,
    ) -> Result<String, AdapterError>;

    /// Resolves the queue URL for `queue_name`, creating the queue if missing.
    fn ensure_queue(&self, queue_name: &str) -> Result<String, AdapterError>;
}

#[derive(Debug, Clone)]
pub struct SqsMessageQueue {
    client: aws_sdk_sqs::Client,
}

impl SqsMessageQueue {
    pub fn new(client: aws_sdk_sqs::Client) -> Self {
        Self { client }
    }
}

impl MessageQueue for SqsMessageQueue {
    fn send_message(
        &self,
        queue_url: &str,
        body: &str,
        delay_seconds: Option<i32>,
    ) -> Result<String, AdapterError> {
        let request = self
            .client
            .send_message()
            .queue_url(queue_url)
            .message_body(body)
            .set_delay_seconds(delay_seconds);

        let output = block_on(request.send()).map_err(|error| {
            AdapterError::Service(format!(
                "failed to send message to {queue_url}: {}",
                DisplayErrorContext(&error)
            ))
        })?;
        Ok(output.message_id().unwrap_or_default().to_string())
    }

    fn ensure_queue(&self, queue_name: &str) -> Result<String, AdapterError> {
        let client = self.client.clone();
        let queue_name = queue_name.to_string();

        block_on(async move {
            match client.get_queue_url().queue_name(&queue_name).send().await {
                Ok(output) => {
                    return output.queue_url().map(str::to_string).ok_or_else(|| {
                        AdapterError::Service(format!("no URL returned for queue {queue_name}"))
                    });
                }
                Err(error)
                    if !error
                        .as_service_error()
                        .map(|service| service.is_queue_does_not_exist())
                        .unwrap_or(false) =>
                {
                    return Err(AdapterError::Service(format!(
                        "failed to resolve queue {queue_name}: {}",
                        DisplayErrorContext(&error)
                    )));
                }
                Err(_) => {}
            }

            tracing::info!(component = "sqs", event = "queue_created", queue_name = %queue_name);
            let output = client
                .create_queue()
                .queue_name(&queue_name)
                .send()
                .await
                .map_err(|error| {
                    AdapterError::Service(format!(
                        "failed to create queue {queue_name}: {}",
                        DisplayErrorContext(&error)
                    ))
                })?;
            output.queue_url().map(str::to_string).ok_or_else(|| {
                AdapterError::Service(format!("no URL returned for created queue {queue_name}"))
            })
        })
    }
}
