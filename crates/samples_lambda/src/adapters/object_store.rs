use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;

use super::{block_on, AdapterError};

pub trait ObjectStore {
    fn get_object(&self, bucket: &str, key: &str) -> Result<String, AdapterError>;
    fn put_object(&self, bucket: &str, key: &str, body: &str) -> Result<(), AdapterError>;
}

#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

impl ObjectStore for S3ObjectStore {
    fn get_object(&self, bucket: &str, key: &str) -> Result<String, AdapterError> {
        let client = self.client.clone();
        let (bucket, key) = (bucket.to_string(), key.to_string());

        let bytes = block_on(async move {
            let output = client
                .get_object()
                .bucket(&bucket)
                .key(&key)
                .send()
                .await
                .map_err(|error| {
                    let missing = error
                        .as_service_error()
                        .map(|service| service.is_no_such_key())
                        .unwrap_or(false);
                    if missing {
                        AdapterError::NotFound(format!("s3://{bucket}/{key}"))
                    } else {
                        AdapterError::Service(format!(
                            "failed to read s3://{bucket}/{key}: {}",
                            DisplayErrorContext(&error)
                        ))
                    }
                })?;
            output
                .body
                .collect()
                .await
                .map(|data| data.into_bytes())
                .map_err(|error| {
                    AdapterError::Service(format!("failed to stream s3://{bucket}/{key}: {error}"))
                })
        })?;

        String::from_utf8(bytes.to_vec())
            .map_err(|error| AdapterError::Serialization(format!("object is not UTF-8: {error}")))
    }

    fn put_object(&self, bucket: &str, key: &str, body: &str) -> Result<(), AdapterError> {
        let request = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body.as_bytes().to_vec()));

        block_on(request.send()).map(|_| ()).map_err(|error| {
            AdapterError::Service(format!(
                "failed to write s3://{bucket}/{key}: {}",
                DisplayErrorContext(&error)
            ))
        })
    }
}
