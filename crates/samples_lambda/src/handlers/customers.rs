use samples_core::contract::{
    error_response, json_response, text_response, validation_error_response, ApiGatewayRequest,
    ApiGatewayResponse, ValidationError,
};
use samples_core::customer::{CustomerView, CUSTOMER_DELETED_MESSAGE, CUSTOMER_KEY_ATTRIBUTE};
use serde_json::{json, Value};

use crate::adapters::customer_store::CustomerStore;
use crate::adapters::message_queue::MessageQueue;
use crate::adapters::AdapterError;
use crate::config::CustomersConfig;

/// Delay applied to the created-customer notification.
pub const NOTIFICATION_DELAY_SECONDS: i32 = 5;

pub fn handle_customers_event(
    event: Value,
    store: &dyn CustomerStore,
    queue: &dyn MessageQueue,
    config: &CustomersConfig,
) -> ApiGatewayResponse {
    let request = match ApiGatewayRequest::from_value(event) {
        Ok(value) => value,
        Err(error) => return validation_error_response(&error),
    };

    let method = request
        .http_method
        .as_deref()
        .unwrap_or_default()
        .to_ascii_uppercase();
    match (method.as_str(), request.normalized_path()) {
        ("GET", "/customer") => get_customer(&request, store),
        ("GET", "/customers/all") => list_customers(store),
        ("POST", "/customer/new") => create_customer(&request, store, queue, config),
        ("DELETE", "/customer/delete") => delete_customer(&request, store),
        (_, path) => error_response(
            404,
            json!({"error": "not_found", "message": format!("no route for {method} {path}")}),
        ),
    }
}

fn customer_id(request: &ApiGatewayRequest) -> Result<&str, ValidationError> {
    request
        .query_parameter(CUSTOMER_KEY_ATTRIBUTE)
        .ok_or_else(|| ValidationError::new("customerId query parameter is required"))
}

fn get_customer(request: &ApiGatewayRequest, store: &dyn CustomerStore) -> ApiGatewayResponse {
    let customer_id = match customer_id(request) {
        Ok(value) => value,
        Err(error) => return validation_error_response(&error),
    };

    match store.get(customer_id) {
        Ok(Some(customer)) => json_response(200, &customer),
        Ok(None) => error_response(
            404,
            json!({"error": "not_found", "message": format!("customer {customer_id} not found")}),
        ),
        Err(error) => store_failure("get", &error),
    }
}

fn list_customers(store: &dyn CustomerStore) -> ApiGatewayResponse {
    match store.scan_all() {
        Ok(customers) => {
            tracing::info!(component = "customers", event = "scanned", count = customers.len());
            json_response(200, &customers)
        }
        Err(error) => store_failure("scan", &error),
    }
}

fn create_customer(
    request: &ApiGatewayRequest,
    store: &dyn CustomerStore,
    queue: &dyn MessageQueue,
    config: &CustomersConfig,
) -> ApiGatewayResponse {
    let customer = match request.parse_json_body::<CustomerView>() {
        Ok(view) => view.into_customer(),
        Err(error) => return validation_error_response(&error),
    };

    if let Err(error) = store.save(&customer) {
        return store_failure("save", &error);
    }
    tracing::info!(
        component = "customers",
        event = "customer_saved",
        customer_id = %customer.customer_id
    );

    if let Some(queue_name) = &config.notification_queue {
        let sent = queue.ensure_queue(queue_name).and_then(|queue_url| {
            queue.send_message(
                &queue_url,
                &config.notification_message,
                Some(NOTIFICATION_DELAY_SECONDS),
            )
        });
        match sent {
            Ok(message_id) => tracing::info!(
                component = "customers",
                event = "notification_sent",
                queue_name = %queue_name,
                message_id = %message_id
            ),
            Err(error) => {
                tracing::error!(component = "customers", event = "notification_failed", error = %error);
                return error_response(
                    500,
                    json!({"error": "queue_failure", "message": error.to_string()}),
                );
            }
        }
    }

    json_response(200, &customer)
}

fn delete_customer(request: &ApiGatewayRequest, store: &dyn CustomerStore) -> ApiGatewayResponse {
    let customer_id = match customer_id(request) {
        Ok(value) => value,
        Err(error) => return validation_error_response(&error),
    };

    match store.delete(customer_id) {
        Ok(()) => {
            tracing::info!(component = "customers", event = "customer_deleted", customer_id);
            text_response(200, CUSTOMER_DELETED_MESSAGE)
        }
        Err(error) => store_failure("delete", &error),
    }
}

fn store_failure(action: &str, error: &AdapterError) -> ApiGatewayResponse {
    tracing::error!(component = "customers", event = "store_failed", action, error = %error);
    error_response(
        500,
        json!({"error": "store_failure", "message": error.to_string()}),
    )
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use samples_core::customer::Customer;

    use super::*;

    #[derive(Default)]
    struct MemoryCustomers {
        rows: Mutex<BTreeMap<String, Customer>>,
        offline: bool,
    }

    impl MemoryCustomers {
        fn check(&self) -> Result<(), AdapterError> {
            if self.offline {
                return Err(AdapterError::Service("table offline".into()));
            }
            Ok(())
        }

        fn ids(&self) -> Vec<String> {
            self.rows
                .lock()
                .expect("poisoned mutex")
                .keys()
                .cloned()
                .collect()
        }
    }

    impl CustomerStore for MemoryCustomers {
        fn get(&self, customer_id: &str) -> Result<Option<Customer>, AdapterError> {
            self.check()?;
            Ok(self.rows.lock().expect("poisoned mutex").get(customer_id).cloned())
        }

        fn save(&self, customer: &Customer) -> Result<(), AdapterError> {
            self.check()?;
            self.rows
                .lock()
                .expect("poisoned mutex")
                .insert(customer.customer_id.clone(), customer.clone());
            Ok(())
        }

        fn delete(&self, customer_id: &str) -> Result<(), AdapterError> {
            self.check()?;
            self.rows.lock().expect("poisoned mutex").remove(customer_id);
            Ok(())
        }

        fn scan_all(&self) -> Result<Vec<Customer>, AdapterError> {
            self.check()?;
            Ok(self.rows.lock().expect("poisoned mutex").values().cloned().collect())
        }
    }

    #[derive(Default)]
    struct CapturingQueue {
        ensured: Mutex<Vec<String>>,
        sent: Mutex<Vec<(String, String, Option<i32>)>>,
        unavailable: bool,
    }

    impl MessageQueue for CapturingQueue {
        fn send_message(
            &self,
            queue_url: &str,
            body: &str,
            delay_seconds: Option<i32>,
        ) -> Result<String, AdapterError> {
            if self.unavailable {
                return Err(AdapterError::Service("queue unavailable".into()));
            }
            self.sent.lock().expect("poisoned mutex").push((
                queue_url.to_string(),
                body.to_string(),
                delay_seconds,
            ));
            Ok("m-1".to_string())
        }

        fn ensure_queue(&self, queue_name: &str) -> Result<String, AdapterError> {
            self.ensured
                .lock()
                .expect("poisoned mutex")
                .push(queue_name.to_string());
            Ok(format!("https://sqs.local/{queue_name}"))
        }
    }

    fn config(queue: Option<&str>) -> CustomersConfig {
        CustomersConfig {
            table_name: "customer".to_string(),
            notification_queue: queue.map(str::to_string),
            notification_message: "customer created".to_string(),
        }
    }

    fn request(method: &str, path: &str, customer_id: Option<&str>, body: Option<Value>) -> Value {
        json!({
            "httpMethod": method,
            "path": path,
            "queryStringParameters": customer_id.map(|id| json!({"customerId": id})),
            "body": body.map(|value| value.to_string()),
        })
    }

    #[test]
    fn create_then_get_then_delete() {
        let store = MemoryCustomers::default();
        let queue = CapturingQueue::default();
        let config = config(None);

        let created = handle_customers_event(
            request(
                "POST",
                "/customer/new",
                None,
                Some(json!({"customerId": "1", "name": "customer-1", "email": "customer1@gmail.com"})),
            ),
            &store,
            &queue,
            &config,
        );
        assert_eq!(created.status_code, 200);
        assert_eq!(created.body_json().expect("json")["customerId"], "1");

        let fetched =
            handle_customers_event(request("GET", "/customer", Some("1"), None), &store, &queue, &config);
        assert_eq!(fetched.status_code, 200);
        assert_eq!(fetched.body_json().expect("json")["email"], "customer1@gmail.com");

        let deleted = handle_customers_event(
            request("DELETE", "/customer/delete", Some("1"), None),
            &store,
            &queue,
            &config,
        );
        assert_eq!(deleted.status_code, 200);
        assert_eq!(deleted.body.as_deref(), Some("customer deleted!!"));
        assert!(store.ids().is_empty());

        let missing =
            handle_customers_event(request("GET", "/customer", Some("1"), None), &store, &queue, &config);
        assert_eq!(missing.status_code, 404);
        assert!(queue.sent.lock().expect("poisoned mutex").is_empty());
    }

    #[test]
    fn create_generates_id_and_sends_delayed_notification() {
        let store = MemoryCustomers::default();
        let queue = CapturingQueue::default();

        let response = handle_customers_event(
            request(
                "POST",
                "/customer/new",
                None,
                Some(json!({"name": "n", "email": "e@example.com"})),
            ),
            &store,
            &queue,
            &config(Some("customer-events")),
        );

        assert_eq!(response.status_code, 200);
        assert_eq!(store.ids().len(), 1);
        assert_eq!(
            queue.ensured.lock().expect("poisoned mutex").clone(),
            vec!["customer-events".to_string()]
        );
        assert_eq!(
            queue.sent.lock().expect("poisoned mutex").clone(),
            vec![(
                "https://sqs.local/customer-events".to_string(),
                "customer created".to_string(),
                Some(5)
            )]
        );
    }

    #[test]
    fn failed_notification_returns_500_after_saving() {
        let store = MemoryCustomers::default();
        let queue = CapturingQueue {
            unavailable: true,
            ..CapturingQueue::default()
        };

        let response = handle_customers_event(
            request(
                "POST",
                "/customer/new",
                None,
                Some(json!({"customerId": "7", "name": "n", "email": "e@example.com"})),
            ),
            &store,
            &queue,
            &config(Some("customer-events")),
        );

        assert_eq!(response.status_code, 500);
        assert_eq!(response.body_json().expect("json")["error"], "queue_failure");
        assert_eq!(store.ids(), vec!["7".to_string()]);
        assert!(queue.sent.lock().expect("poisoned mutex").is_empty());
    }

    #[test]
    fn lists_all_customers() {
        let store = MemoryCustomers::default();
        for id in ["a", "b"] {
            store
                .save(&Customer {
                    customer_id: id.to_string(),
                    name: id.to_string(),
                    email: format!("{id}@example.com"),
                })
                .expect("seed customer");
        }

        let response = handle_customers_event(
            request("GET", "/customers/all", None, None),
            &store,
            &CapturingQueue::default(),
            &config(None),
        );
        assert_eq!(response.status_code, 200);
        assert_eq!(
            response
                .body_json()
                .and_then(|body| body.as_array().map(Vec::len)),
            Some(2)
        );
    }

    #[test]
    fn malformed_input_and_store_failures_map_to_status_codes() {
        let queue = CapturingQueue::default();
        let store = MemoryCustomers::default();

        let bad_body = handle_customers_event(
            json!({"httpMethod": "POST", "path": "/customer/new", "body": "{oops"}),
            &store,
            &queue,
            &config(None),
        );
        assert_eq!(bad_body.status_code, 400);

        let no_id = handle_customers_event(
            request("GET", "/customer", None, None),
            &store,
            &queue,
            &config(None),
        );
        assert_eq!(no_id.status_code, 400);

        let offline = MemoryCustomers {
            offline: true,
            ..MemoryCustomers::default()
        };
        let failed = handle_customers_event(
            request("GET", "/customers/all", None, None),
            &offline,
            &queue,
            &config(None),
        );
        assert_eq!(failed.status_code, 500);
    }
}
