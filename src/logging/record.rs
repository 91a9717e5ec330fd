use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Severity of a log record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of the application emitted a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Backend,
    Frontend,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Backend => "backend",
            Origin::Frontend => "frontend",
        }
    }

    /// Component tag used when none is configured explicitly
    pub fn default_component(&self) -> &'static str {
        match self {
            Origin::Backend => "shortener-api",
            Origin::Frontend => "frontend-app",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single structured log record handed to a sink.
///
/// Records are built once per log call and moved into the sink; the caller
/// keeps no reference to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub origin: Origin,
    pub level: Level,
    pub component: String,
    pub message: String,
    pub context: Map<String, Value>,
}

/// Normalize an arbitrary JSON value into a context object.
///
/// `null` becomes an empty object and non-object values are wrapped under
/// a `value` key.
pub fn into_context(context: Value) -> Map<String, Value> {
    match context {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            map
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_levels_serialize_lowercase() {
        assert_eq!(serde_json::to_value(Level::Fatal).unwrap(), json!("fatal"));
        assert_eq!(Level::Warn.to_string(), "warn");
    }

    #[test]
    fn test_origin_presets_have_fixed_components() {
        assert_eq!(Origin::Backend.default_component(), "shortener-api");
        assert_eq!(Origin::Frontend.default_component(), "frontend-app");
    }

    #[test]
    fn test_context_normalization() {
        assert!(into_context(Value::Null).is_empty());

        let wrapped = into_context(json!(42));
        assert_eq!(wrapped.get("value"), Some(&json!(42)));

        let object = into_context(json!({"operation": "shortenUrls"}));
        assert_eq!(object.get("operation"), Some(&json!("shortenUrls")));
    }

    #[test]
    fn test_record_serializes_all_fields() {
        let record = LogRecord {
            origin: Origin::Backend,
            level: Level::Info,
            component: "shortener-api".to_string(),
            message: "hello".to_string(),
            context: into_context(json!({"a": 1})),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "origin": "backend",
                "level": "info",
                "component": "shortener-api",
                "message": "hello",
                "context": {"a": 1}
            })
        );
    }
}
