//! AppSync DynamoDB resolver mapping for the booking API.
//!
//! Each GraphQL field maps a [`ResolverContext`] to a DynamoDB resolver request
//! document and maps the data source result back to the GraphQL response.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use uuid::Uuid;

pub const RESOLVER_VERSION: &str = "2018-05-29";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResolverContext {
    #[serde(default)]
    pub arguments: Map<String, Value>,
    #[serde(default)]
    pub identity: Option<Value>,
    #[serde(default)]
    pub result: Option<Value>,
}

impl ResolverContext {
    fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name).filter(|value| !value.is_null())
    }

    /// Cognito subject of the caller, when authenticated.
    pub fn identity_sub(&self) -> Option<&str> {
        self.identity
            .as_ref()
            .and_then(|identity| identity.get("sub"))
            .and_then(Value::as_str)
            .filter(|sub| !sub.is_empty())
    }
}

/// Values a request mapping may need that are not part of the context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEnv {
    pub generated_id: String,
    pub timestamp: String,
}

impl MappingEnv {
    pub fn now() -> Self {
        Self {
            generated_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error("unknown resolver field '{0}'")]
    UnknownField(String),
    #[error("missing required argument '{0}'")]
    MissingArgument(String),
    #[error("resolver requires an authenticated identity")]
    Unauthorized,
}

struct Entity {
    key: &'static str,
    attributes: &'static [&'static str],
}

const LOCATION: Entity = Entity {
    key: "locationid",
    attributes: &["name", "description", "imageUrl"],
};

const RESOURCE: Entity = Entity {
    key: "resourceid",
    attributes: &["locationid", "name", "description", "type"],
};

const BOOKING: Entity = Entity {
    key: "bookingid",
    attributes: &["resourceid", "starttimeepochtime"],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolver {
    CreateLocation,
    GetLocation,
    GetLocations,
    DeleteLocation,
    CreateResource,
    GetResource,
    GetResourcesForLocation,
    DeleteResource,
    CreateBooking,
    GetBooking,
    GetBookingsForResource,
    DeleteBooking,
}

impl Resolver {
    pub const ALL: [Resolver; 12] = [
        Self::CreateLocation,
        Self::GetLocation,
        Self::GetLocations,
        Self::DeleteLocation,
        Self::CreateResource,
        Self::GetResource,
        Self::GetResourcesForLocation,
        Self::DeleteResource,
        Self::CreateBooking,
        Self::GetBooking,
        Self::GetBookingsForResource,
        Self::DeleteBooking,
    ];

    pub fn field_name(self) -> &'static str {
        match self {
            Self::CreateLocation => "createLocation",
            Self::GetLocation => "getLocation",
            Self::GetLocations => "getLocations",
            Self::DeleteLocation => "deleteLocation",
            Self::CreateResource => "createResource",
            Self::GetResource => "getResource",
            Self::GetResourcesForLocation => "getResourcesForLocation",
            Self::DeleteResource => "deleteResource",
            Self::CreateBooking => "createBooking",
            Self::GetBooking => "getBooking",
            Self::GetBookingsForResource => "getBookingsForResource",
            Self::DeleteBooking => "deleteBooking",
        }
    }

    pub fn from_field_name(field: &str) -> Result<Self, MappingError> {
        Self::ALL
            .into_iter()
            .find(|resolver| resolver.field_name() == field)
            .ok_or_else(|| MappingError::UnknownField(field.to_string()))
    }

    fn returns_list(self) -> bool {
        matches!(
            self,
            Self::GetLocations | Self::GetResourcesForLocation | Self::GetBookingsForResource
        )
    }

    pub fn request_mapping(
        self,
        context: &ResolverContext,
        env: &MappingEnv,
    ) -> Result<Value, MappingError> {
        match self {
            Self::CreateLocation => put_item(&LOCATION, context, env, None),
            Self::CreateResource => put_item(&RESOURCE, context, env, None),
            Self::CreateBooking => {
                let user_id = context.identity_sub().ok_or(MappingError::Unauthorized)?;
                put_item(&BOOKING, context, env, Some(user_id))
            }
            Self::GetLocation => keyed("GetItem", &LOCATION, context),
            Self::GetResource => keyed("GetItem", &RESOURCE, context),
            Self::GetBooking => keyed("GetItem", &BOOKING, context),
            Self::DeleteLocation => keyed("DeleteItem", &LOCATION, context),
            Self::DeleteResource => keyed("DeleteItem", &RESOURCE, context),
            Self::DeleteBooking => keyed("DeleteItem", &BOOKING, context),
            Self::GetLocations => Ok(json!({
                "version": RESOLVER_VERSION,
                "operation": "Scan",
            })),
            Self::GetResourcesForLocation => query_by_index("locationid", context),
            Self::GetBookingsForResource => query_by_index("resourceid", context),
        }
    }

    pub fn response_mapping(self, context: &ResolverContext) -> Value {
        let result = context.result.clone().unwrap_or(Value::Null);
        if self.returns_list() {
            result
                .get("items")
                .cloned()
                .unwrap_or_else(|| Value::Array(Vec::new()))
        } else {
            result
        }
    }
}

fn put_item(
    entity: &Entity,
    context: &ResolverContext,
    env: &MappingEnv,
    user_id: Option<&str>,
) -> Result<Value, MappingError> {
    let key_value = context
        .argument(entity.key)
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .unwrap_or(&env.generated_id);

    let mut attribute_values = Map::new();
    for name in entity.attributes {
        if let Some(value) = context.argument(name) {
            attribute_values.insert((*name).to_string(), typed_attribute(value));
        }
    }
    if let Some(user_id) = user_id {
        attribute_values.insert("userid".to_string(), json!({ "S": user_id }));
    }
    attribute_values.insert("timestamp".to_string(), json!({ "S": env.timestamp }));

    Ok(json!({
        "version": RESOLVER_VERSION,
        "operation": "PutItem",
        "key": { entity.key: { "S": key_value } },
        "attributeValues": attribute_values,
    }))
}

fn keyed(operation: &str, entity: &Entity, context: &ResolverContext) -> Result<Value, MappingError> {
    let key_value = required_argument(context, entity.key)?;
    Ok(json!({
        "version": RESOLVER_VERSION,
        "operation": operation,
        "key": { entity.key: typed_attribute(key_value) },
    }))
}

fn query_by_index(attribute: &str, context: &ResolverContext) -> Result<Value, MappingError> {
    let value = required_argument(context, attribute)?;
    let placeholder = format!(":{attribute}");
    Ok(json!({
        "version": RESOLVER_VERSION,
        "operation": "Query",
        "index": format!("{attribute}GSI"),
        "query": {
            "expression": format!("{attribute} = {placeholder}"),
            "expressionValues": { placeholder: typed_attribute(value) },
        },
    }))
}

fn required_argument<'a>(
    context: &'a ResolverContext,
    name: &str,
) -> Result<&'a Value, MappingError> {
    context
        .argument(name)
        .ok_or_else(|| MappingError::MissingArgument(name.to_string()))
}

fn typed_attribute(value: &Value) -> Value {
    match value {
        Value::String(text) => json!({ "S": text }),
        Value::Number(number) => json!({ "N": number.to_string() }),
        Value::Bool(flag) => json!({ "BOOL": flag }),
        other => json!({ "S": other.to_string() }),
    }
}
