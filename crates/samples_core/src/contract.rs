use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const TEXT_CONTENT_TYPE: &str = "text/plain";

/// The subset of the API Gateway proxy request the samples read.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayRequest {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub path_parameters: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub query_string_parameters: Option<BTreeMap<String, String>>,
}

impl ApiGatewayRequest {
    pub fn from_value(event: Value) -> Result<Self, ValidationError> {
        if !event.is_object() {
            return Err(ValidationError::new(
                "Request payload must be a JSON object",
            ));
        }
        serde_json::from_value(event)
            .map_err(|error| ValidationError::new(format!("Malformed request: {error}")))
    }

    pub fn method_is(&self, method: &str) -> bool {
        self.http_method
            .as_deref()
            .map(|value| value.eq_ignore_ascii_case(method))
            .unwrap_or(false)
    }

    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    pub fn query_parameter(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    /// Path without trailing slashes; `/` when absent.
    pub fn normalized_path(&self) -> &str {
        match self.path.as_deref().map(|path| path.trim_end_matches('/')) {
            Some(path) if !path.is_empty() => path,
            _ => "/",
        }
    }

    pub fn parse_json_body<T: DeserializeOwned>(&self) -> Result<T, ValidationError> {
        let body = self
            .body
            .as_deref()
            .filter(|body| !body.trim().is_empty())
            .ok_or_else(|| ValidationError::new("Request body is required"))?;
        serde_json::from_str(body)
            .map_err(|error| ValidationError::new(format!("Malformed JSON body: {error}")))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl ApiGatewayResponse {
    pub fn body_json(&self) -> Option<Value> {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_str(body).ok())
    }
}

pub fn json_response(status_code: u16, payload: impl Serialize) -> ApiGatewayResponse {
    match serde_json::to_string(&payload) {
        Ok(body) => with_content_type(status_code, JSON_CONTENT_TYPE, Some(body)),
        Err(error) => error_response(
            500,
            json!({
                "error": "serialization_error",
                "message": error.to_string(),
            }),
        ),
    }
}

pub fn text_response(status_code: u16, body: impl Into<String>) -> ApiGatewayResponse {
    with_content_type(status_code, TEXT_CONTENT_TYPE, Some(body.into()))
}

pub fn error_response(status_code: u16, payload: Value) -> ApiGatewayResponse {
    with_content_type(status_code, JSON_CONTENT_TYPE, Some(payload.to_string()))
}

pub fn validation_error_response(error: &ValidationError) -> ApiGatewayResponse {
    error_response(
        400,
        json!({
            "error": "validation_error",
            "message": error.message(),
        }),
    )
}

pub fn empty_response(status_code: u16) -> ApiGatewayResponse {
    with_content_type(status_code, JSON_CONTENT_TYPE, None)
}

fn with_content_type(
    status_code: u16,
    content_type: &str,
    body: Option<String>,
) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: BTreeMap::from([("Content-Type".to_string(), content_type.to_string())]),
        body,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        name: String,
    }

    #[test]
    fn parses_proxy_request_with_null_maps() {
        let request = ApiGatewayRequest::from_value(json!({
            "httpMethod": "GET",
            "path": "/customers/all/",
            "body": null,
            "pathParameters": null,
            "queryStringParameters": null,
            "requestContext": {"stage": "Prod"}
        }))
        .expect("request should parse");

        assert!(request.method_is("get"));
        assert_eq!(request.normalized_path(), "/customers/all");
        assert_eq!(request.path_parameter("id"), None);
    }

    #[test]
    fn rejects_non_object_payload() {
        let error = ApiGatewayRequest::from_value(json!([1, 2])).expect_err("array should fail");
        assert_eq!(error.message(), "Request payload must be a JSON object");
    }

    #[test]
    fn missing_body_is_a_validation_error() {
        let request = ApiGatewayRequest::default();
        let error = request
            .parse_json_body::<Probe>()
            .expect_err("missing body should fail");
        assert_eq!(error.message(), "Request body is required");
    }

    #[test]
    fn malformed_body_reports_parse_error() {
        let request = ApiGatewayRequest {
            body: Some("{\"name\":".to_string()),
            ..ApiGatewayRequest::default()
        };
        let error = request
            .parse_json_body::<Probe>()
            .expect_err("truncated json should fail");
        assert!(error.message().starts_with("Malformed JSON body"));
    }

    #[test]
    fn parses_valid_body() {
        let request = ApiGatewayRequest {
            body: Some("{\"name\":\"lambda\"}".to_string()),
            ..ApiGatewayRequest::default()
        };
        let probe: Probe = request.parse_json_body().expect("body should parse");
        assert_eq!(probe.name, "lambda");
    }

    #[test]
    fn json_response_sets_content_type_and_status_key() {
        let response = json_response(200, json!({"ok": true}));
        let encoded = serde_json::to_value(&response).expect("response should serialize");

        assert_eq!(encoded["statusCode"], 200);
        assert_eq!(encoded["headers"]["Content-Type"], JSON_CONTENT_TYPE);
        assert_eq!(response.body_json(), Some(json!({"ok": true})));
    }

    #[test]
    fn empty_response_omits_body() {
        let encoded = serde_json::to_value(empty_response(400)).expect("serialize");
        assert!(encoded.get("body").is_none());
    }
}
