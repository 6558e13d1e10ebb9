use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const ORDER_ACCEPTED_MESSAGE: &str = "Order Request Sent Successfully";
pub const ORDER_NOT_FOUND_MESSAGE: &str = "OrderId not found";
pub const DEFAULT_ORDER_DETAILS_TABLE: &str = "order_details";
pub const ORDER_KEY_ATTRIBUTE: &str = "orderId";
pub const ORDER_STATUS_ATTRIBUTE: &str = "orderStatus";

pub type FieldErrors = BTreeMap<String, String>;

/// Inbound order as posted by clients; every field is optional until validated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub product_name: Option<String>,
    pub product_id: Option<String>,
    pub customer_id: Option<String>,
    pub delivery_address_code: Option<String>,
    pub model: Option<String>,
    pub company: Option<String>,
    pub quantity: Option<String>,
    pub order_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub product_name: String,
    pub product_id: String,
    pub customer_id: String,
    pub delivery_address_code: String,
    pub model: String,
    pub company: String,
    pub quantity: String,
    pub order_id: Option<String>,
}

impl Order {
    pub fn with_order_id(self, order_id: impl Into<String>) -> Self {
        Self {
            order_id: Some(order_id.into()),
            ..self
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderResponse {
    pub message: String,
    pub uuid: String,
}

impl OrderResponse {
    pub fn accepted(order_id: impl Into<String>) -> Self {
        Self {
            message: ORDER_ACCEPTED_MESSAGE.to_string(),
            uuid: order_id.into(),
        }
    }
}

impl OrderRequest {
    pub fn validate(self) -> Result<Order, FieldErrors> {
        let mut errors = FieldErrors::new();
        let product_name = required(self.product_name, "productName", &mut errors);
        let product_id = required(self.product_id, "productId", &mut errors);
        let customer_id = required(self.customer_id, "customerId", &mut errors);
        let delivery_address_code =
            required(self.delivery_address_code, "deliveryAddressCode", &mut errors);
        let model = required(self.model, "model", &mut errors);
        let company = required(self.company, "company", &mut errors);
        let quantity = required(self.quantity, "quantity", &mut errors);

        match (
            product_name,
            product_id,
            customer_id,
            delivery_address_code,
            model,
            company,
            quantity,
        ) {
            (
                Some(product_name),
                Some(product_id),
                Some(customer_id),
                Some(delivery_address_code),
                Some(model),
                Some(company),
                Some(quantity),
            ) => Ok(Order {
                product_name,
                product_id,
                customer_id,
                delivery_address_code,
                model,
                company,
                quantity,
                order_id: self.order_id,
            }),
            _ => Err(errors),
        }
    }
}

fn required(value: Option<String>, field: &str, errors: &mut FieldErrors) -> Option<String> {
    if value.is_none() {
        errors.insert(field.to_string(), format!("The {field} must not be null"));
    }
    value
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn complete_request() -> OrderRequest {
        serde_json::from_value(json!({
            "productName": "Laptop",
            "productId": "P-100",
            "customerId": "C-7",
            "deliveryAddressCode": "DA-1",
            "model": "X1",
            "company": "Acme",
            "quantity": "2"
        }))
        .expect("order should parse")
    }

    #[test]
    fn complete_request_validates() {
        let order = complete_request().validate().expect("order should validate");
        assert_eq!(order.product_name, "Laptop");
        assert_eq!(order.order_id, None);
    }

    #[test]
    fn reports_every_missing_field() {
        let request = OrderRequest {
            product_name: Some("Laptop".to_string()),
            ..OrderRequest::default()
        };

        let errors = request.validate().expect_err("order should fail");
        assert_eq!(errors.len(), 6);
        assert_eq!(
            errors.get("quantity").map(String::as_str),
            Some("The quantity must not be null")
        );
        assert!(!errors.contains_key("productName"));
    }

    #[test]
    fn serializes_order_with_assigned_id_in_camel_case() {
        let order = complete_request()
            .validate()
            .expect("order should validate")
            .with_order_id("order-1");
        let encoded = serde_json::to_value(&order).expect("order should serialize");

        assert_eq!(encoded["orderId"], "order-1");
        assert_eq!(encoded["deliveryAddressCode"], "DA-1");
    }
}
