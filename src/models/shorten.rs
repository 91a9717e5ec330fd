use serde::{Deserialize, Serialize};

/// One entry of a bulk shorten request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    pub original_url: String,
    /// Lifetime of the short link in minutes; the server picks a default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validity_minutes: Option<u64>,
    /// Preferred short code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcode: Option<String>,
}

impl ShortenRequest {
    pub fn new(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            validity_minutes: None,
            shortcode: None,
        }
    }

    pub fn with_validity(mut self, minutes: u64) -> Self {
        self.validity_minutes = Some(minutes);
        self
    }

    pub fn with_shortcode(mut self, shortcode: impl Into<String>) -> Self {
        self.shortcode = Some(shortcode.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optional_fields_are_omitted() {
        let value = serde_json::to_value(ShortenRequest::new("https://example.com")).unwrap();
        assert_eq!(value, json!({"originalUrl": "https://example.com"}));
    }

    #[test]
    fn test_serializes_camel_case() {
        let request = ShortenRequest::new("https://example.com/a")
            .with_validity(30)
            .with_shortcode("abc123");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "originalUrl": "https://example.com/a",
                "validityMinutes": 30,
                "shortcode": "abc123"
            })
        );
    }

    #[test]
    fn test_deserializes_file_entries() {
        let requests: Vec<ShortenRequest> = serde_json::from_str(
            r#"[{"originalUrl":"https://a.example"},{"originalUrl":"https://b.example","validityMinutes":5}]"#,
        )
        .unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].validity_minutes, Some(5));
        assert!(requests[0].shortcode.is_none());
    }

    #[test]
    fn test_rejects_missing_original_url() {
        let result: Result<ShortenRequest, _> = serde_json::from_str(r#"{"shortcode":"x"}"#);
        assert!(result.is_err());
    }
}
