use rand::seq::SliceRandom;
use rand::Rng;
use samples_core::resolvers::{MappingError, ResolverContext};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::HandlerError;

pub const RANDOM_MESSAGE_FIELD: &str = "getRandomMessage";

pub const MESSAGES: [&str; 5] = [
    "Hello from AppSync!",
    "Serverless is more than functions.",
    "Test in the cloud early and often.",
    "Every invocation starts fresh.",
    "Managed services do the heavy lifting.",
];

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResolverInfo {
    #[serde(default)]
    pub field_name: String,
    #[serde(default)]
    pub parent_type_name: Option<String>,
}

/// Direct Lambda resolver invocation payload.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AppSyncInvocation {
    #[serde(flatten)]
    pub context: ResolverContext,
    #[serde(default)]
    pub info: ResolverInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RandomMessage {
    pub message: String,
}

pub fn handle_random_message_event<R: Rng + ?Sized>(
    event: Value,
    rng: &mut R,
) -> Result<RandomMessage, HandlerError> {
    let invocation: AppSyncInvocation = serde_json::from_value(event)
        .map_err(|error| HandlerError::InvalidEvent(format!("malformed resolver event: {error}")))?;

    if invocation.info.field_name != RANDOM_MESSAGE_FIELD {
        return Err(MappingError::UnknownField(invocation.info.field_name).into());
    }
    let Some(caller) = invocation.context.identity_sub() else {
        tracing::warn!(component = "random_message", event = "unauthenticated_call");
        return Err(MappingError::Unauthorized.into());
    };

    let message = MESSAGES.choose(rng).copied().unwrap_or(MESSAGES[0]);
    tracing::info!(component = "random_message", event = "message_selected", caller = %caller);
    Ok(RandomMessage {
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    use super::*;

    fn invocation(field: &str, identity: Value) -> Value {
        json!({
            "arguments": {},
            "identity": identity,
            "info": {"fieldName": field, "parentTypeName": "Query"}
        })
    }

    #[test]
    fn authenticated_caller_gets_a_known_message() {
        let mut rng = StdRng::seed_from_u64(7);
        let message = handle_random_message_event(
            invocation("getRandomMessage", json!({"sub": "user-1", "username": "user-1"})),
            &mut rng,
        )
        .expect("authenticated call should succeed");

        assert!(MESSAGES.contains(&message.message.as_str()));
    }

    #[test]
    fn anonymous_caller_is_unauthorized() {
        let mut rng = StdRng::seed_from_u64(7);
        let error = handle_random_message_event(invocation("getRandomMessage", Value::Null), &mut rng)
            .expect_err("anonymous call should fail");

        assert!(matches!(error, HandlerError::Resolver(MappingError::Unauthorized)));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut rng = StdRng::seed_from_u64(7);
        let error = handle_random_message_event(
            invocation("getLocations", json!({"sub": "user-1"})),
            &mut rng,
        )
        .expect_err("unknown field should fail");

        assert_eq!(error.to_string(), "unknown resolver field 'getLocations'");
    }
}
