use serde::{Deserialize, Serialize};

/// Transformation records expire five minutes after they are written.
pub const RECORD_TTL_SECONDS: i64 = 5 * 60;
pub const DEFAULT_SOURCE_KEY_SUFFIX: &str = ".txt";

pub fn is_blank(content: &str) -> bool {
    content.trim().is_empty()
}

pub fn to_upper_case(content: &str) -> String {
    content.to_uppercase()
}

/// An empty suffix matches every key.
pub fn matches_suffix(key: &str, suffix: &str) -> bool {
    suffix.is_empty() || key.ends_with(suffix)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransformationRecord {
    pub id: String,
    pub content: String,
    pub time_to_live: String,
}

impl TransformationRecord {
    pub fn new(id: impl Into<String>, content: impl Into<String>, now_epoch_seconds: i64) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            time_to_live: (now_epoch_seconds + RECORD_TTL_SECONDS).to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransformationOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub processed: usize,
    pub skipped: usize,
}

impl TransformationOutcome {
    pub fn missing_event() -> Self {
        Self {
            success: false,
            message: Some("s3Event is null".to_string()),
            ..Self::default()
        }
    }

    pub fn completed(processed: usize, skipped: usize) -> Self {
        Self {
            success: true,
            message: None,
            processed,
            skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_content_is_blank() {
        assert!(is_blank(" \n\t"));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn upper_cases_unicode_content() {
        assert_eq!(
            to_upper_case("this message was created during an integration test"),
            "THIS MESSAGE WAS CREATED DURING AN INTEGRATION TEST"
        );
        assert_eq!(to_upper_case("straße"), "STRASSE");
    }

    #[test]
    fn suffix_filter() {
        assert!(matches_suffix("a/b.txt", ".txt"));
        assert!(!matches_suffix("a/b.not_txt", ".txt"));
        assert!(matches_suffix("anything", ""));
    }

    #[test]
    fn record_ttl_is_five_minutes_ahead() {
        let record = TransformationRecord::new("k.txt", "body", 1_700_000_000);
        assert_eq!(record.time_to_live, "1700000300");
    }

    #[test]
    fn missing_event_outcome_serializes_message() {
        let encoded =
            serde_json::to_value(TransformationOutcome::missing_event()).expect("serialize");
        assert_eq!(encoded["success"], false);
        assert_eq!(encoded["message"], "s3Event is null");
    }
}
