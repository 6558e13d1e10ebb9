#![allow(dead_code)]

use serde::de::DeserializeOwned;
use serde_json::Value;

pub fn json(name: &str) -> Value {
    let document = match name {
        "apigw_request_1" => include_str!("../fixtures/apigw_request_1.json"),
        "apigw_request_nobody" => include_str!("../fixtures/apigw_request_nobody.json"),
        "s3_event" => include_str!("../fixtures/s3_event.json"),
        "sqs_event" => include_str!("../fixtures/sqs_event.json"),
        other => panic!("unknown fixture {other}"),
    };
    serde_json::from_str(document).expect("fixture should be valid json")
}

pub fn typed<T: DeserializeOwned>(name: &str) -> T {
    serde_json::from_value(json(name)).expect("fixture should match the event type")
}
