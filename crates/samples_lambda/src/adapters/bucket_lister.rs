use aws_sdk_s3::error::DisplayErrorContext;

use super::{block_on, AdapterError};

pub trait BucketLister {
    fn list_bucket_names(&self) -> Result<Vec<String>, AdapterError>;
}

#[derive(Debug, Clone)]
pub struct S3BucketLister {
    client: aws_sdk_s3::Client,
}

impl S3BucketLister {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

impl BucketLister for S3BucketLister {
    fn list_bucket_names(&self) -> Result<Vec<String>, AdapterError> {
        let output = block_on(self.client.list_buckets().send()).map_err(|error| {
            AdapterError::Service(format!(
                "failed to list buckets: {}",
                DisplayErrorContext(&error)
            ))
        })?;

        Ok(output
            .buckets()
            .iter()
            .filter_map(|bucket| bucket.name().map(str::to_string))
            .collect())
    }
}
