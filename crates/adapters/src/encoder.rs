//! Line encoders for JSON and console output.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use logh_ports::Severity;

/// An encoded field value.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Field {
    /// Raw string, quoted by the encoder as needed.
    Text(String),
    /// Already valid JSON (numbers, booleans, structures).
    Json(String),
}

impl Field {
    /// Numbers and booleans render through `Display`.
    pub(crate) fn display(value: impl std::fmt::Display) -> Self {
        Self::Json(value.to_string())
    }

    pub(crate) fn float64(value: f64) -> Self {
        non_finite(value).map_or_else(
            || Self::Json(serde_json::to_string(&value).unwrap_or_else(|_| value.to_string())),
            |text| Self::Text(text.to_string()),
        )
    }

    pub(crate) fn float32(value: f32) -> Self {
        non_finite(f64::from(value)).map_or_else(
            || Self::Json(serde_json::to_string(&value).unwrap_or_else(|_| value.to_string())),
            |text| Self::Text(text.to_string()),
        )
    }
}

fn non_finite(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value.is_infinite() && value.is_sign_positive() {
        Some("+Inf")
    } else if value.is_infinite() {
        Some("-Inf")
    } else {
        None
    }
}

/// Everything needed to render one line.
pub(crate) struct Record<'a> {
    pub(crate) severity: Severity,
    pub(crate) fields: &'a [(String, Field)],
    pub(crate) time: DateTime<FixedOffset>,
    pub(crate) message: Option<&'a str>,
}

/// `{"level":..,<fields>,"time":..,"message":..}\n`
pub(crate) fn encode_json(record: &Record<'_>) -> String {
    let mut line = String::with_capacity(64 + record.fields.len() * 24);
    line.push_str("{\"level\":");
    line.push_str(&quote(record.severity.as_str()));
    for (key, value) in record.fields {
        line.push(',');
        line.push_str(&quote(key));
        line.push(':');
        match value {
            Field::Text(text) => line.push_str(&quote(text)),
            Field::Json(json) => line.push_str(json),
        }
    }
    line.push_str(",\"time\":");
    line.push_str(&quote(
        &record.time.to_rfc3339_opts(SecondsFormat::Secs, true),
    ));
    if let Some(message) = record.message {
        line.push_str(",\"message\":");
        line.push_str(&quote(message));
    }
    line.push_str("}\n");
    line
}

/// `3:04PM INF message key=value\n`
pub(crate) fn encode_console(record: &Record<'_>) -> String {
    let mut line = String::with_capacity(32 + record.fields.len() * 16);
    line.push_str(&record.time.format("%-I:%M%p").to_string());
    line.push(' ');
    line.push_str(record.severity.abbreviation());
    if let Some(message) = record.message.filter(|message| !message.is_empty()) {
        line.push(' ');
        line.push_str(message);
    }
    for (key, value) in record.fields {
        line.push(' ');
        line.push_str(key);
        line.push('=');
        match value {
            Field::Text(text) if needs_quotes(text) => line.push_str(&quote(text)),
            Field::Text(text) => line.push_str(text),
            Field::Json(json) => line.push_str(json),
        }
    }
    line.push('\n');
    line
}

fn needs_quotes(text: &str) -> bool {
    text.is_empty()
        || text
            .chars()
            .any(|ch| ch.is_whitespace() || ch.is_control() || ch == '"' || ch == '=')
}

fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| String::from("\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .and_then(|offset| offset.with_ymd_and_hms(2024, 3, 9, 15, 4, 5).single())
            .unwrap_or_default()
    }

    fn fields() -> Vec<(String, Field)> {
        vec![
            ("service".to_string(), Field::Text("billing api".to_string())),
            ("attempt".to_string(), Field::display(3_u8)),
            ("ratio".to_string(), Field::float64(0.7)),
        ]
    }

    #[test]
    fn json_places_fields_before_time_and_message() {
        let fields = fields();
        let line = encode_json(&Record {
            severity: Severity::Warn,
            fields: &fields,
            time: fixed_time(),
            message: Some("retrying"),
        });
        assert_eq!(
            line,
            "{\"level\":\"warn\",\"service\":\"billing api\",\"attempt\":3,\"ratio\":0.7,\"time\":\"2024-03-09T15:04:05Z\",\"message\":\"retrying\"}\n"
        );
    }

    #[test]
    fn json_without_message_omits_the_key() {
        let line = encode_json(&Record {
            severity: Severity::Info,
            fields: &[],
            time: fixed_time(),
            message: None,
        });
        assert_eq!(line, "{\"level\":\"info\",\"time\":\"2024-03-09T15:04:05Z\"}\n");
    }

    #[test]
    fn json_escapes_keys_and_strings() {
        let fields = vec![("we\"ird".to_string(), Field::Text("line\nbreak".to_string()))];
        let line = encode_json(&Record {
            severity: Severity::Error,
            fields: &fields,
            time: fixed_time(),
            message: Some("tab\there"),
        });
        assert!(line.contains("\"we\\\"ird\":\"line\\nbreak\""));
        assert!(line.contains("\"message\":\"tab\\there\""));
    }

    #[test]
    fn console_renders_kitchen_time_and_quotes_when_needed() {
        let fields = fields();
        let line = encode_console(&Record {
            severity: Severity::Info,
            fields: &fields,
            time: fixed_time(),
            message: Some("hello world"),
        });
        assert_eq!(
            line,
            "3:04PM INF hello world service=\"billing api\" attempt=3 ratio=0.7\n"
        );
    }

    #[test]
    fn floats_keep_their_width_and_non_finite_become_strings() {
        assert_eq!(Field::float32(0.1), Field::Json("0.1".to_string()));
        assert_eq!(Field::float64(f64::NAN), Field::Text("NaN".to_string()));
        assert_eq!(Field::float64(f64::INFINITY), Field::Text("+Inf".to_string()));
        assert_eq!(Field::float32(f32::NEG_INFINITY), Field::Text("-Inf".to_string()));
    }
}
