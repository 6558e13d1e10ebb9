use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use super::AdapterError;

pub(crate) type Item = HashMap<String, AttributeValue>;

pub(crate) fn string_value(value: impl Into<String>) -> AttributeValue {
    AttributeValue::S(value.into())
}

pub(crate) fn optional_string(item: &Item, name: &str) -> Option<String> {
    item.get(name)
        .and_then(|value| value.as_s().ok())
        .cloned()
}

pub(crate) fn required_string(item: &Item, name: &str) -> Result<String, AdapterError> {
    optional_string(item, name).ok_or_else(|| {
        AdapterError::Serialization(format!("item is missing string attribute '{name}'"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_string_attributes_and_rejects_other_types() {
        let item = Item::from([
            ("name".to_string(), string_value("ada")),
            ("age".to_string(), AttributeValue::N("36".to_string())),
        ]);

        assert_eq!(optional_string(&item, "name").as_deref(), Some("ada"));
        assert_eq!(optional_string(&item, "age"), None);
        assert!(matches!(
            required_string(&item, "email"),
            Err(AdapterError::Serialization(_))
        ));
    }
}
