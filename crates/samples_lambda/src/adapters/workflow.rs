use aws_sdk_sfn::error::DisplayErrorContext;
use serde::{Deserialize, Serialize};

use super::{block_on, AdapterError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StartedExecution {
    pub execution_arn: String,
    pub start_epoch_seconds: i64,
}

pub trait WorkflowStarter {
    fn start_execution(&self, name: &str, input: &str) -> Result<StartedExecution, AdapterError>;
}

#[derive(Debug, Clone)]
pub struct StepFunctionsStarter {
    client: aws_sdk_sfn::Client,
    state_machine_arn: String,
}

impl StepFunctionsStarter {
    pub fn new(client: aws_sdk_sfn::Client, state_machine_arn: impl Into<String>) -> Self {
        Self {
            client,
            state_machine_arn: state_machine_arn.into(),
        }
    }
}

impl WorkflowStarter for StepFunctionsStarter {
    fn start_execution(&self, name: &str, input: &str) -> Result<StartedExecution, AdapterError> {
        let request = self
            .client
            .start_execution()
            .state_machine_arn(&self.state_machine_arn)
            .name(name)
            .input(input);

        let output = block_on(request.send()).map_err(|error| {
            AdapterError::Service(format!(
                "failed to start execution {name}: {}",
                DisplayErrorContext(&error)
            ))
        })?;

        Ok(StartedExecution {
            execution_arn: output.execution_arn().to_string(),
            start_epoch_seconds: output.start_date().secs(),
        })
    }
}
