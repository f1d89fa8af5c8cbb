//! JSON output formatting

use chrono::Utc;
use serde::Serialize;

/// Envelope for JSON output: the payload plus where and when it came from
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub data: T,
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize)]
pub struct Metadata {
    pub tool: &'static str,
    pub version: &'static str,
    /// RFC 3339 time the output was produced
    pub generated_at: String,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                tool: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
                generated_at: Utc::now().to_rfc3339(),
            },
        }
    }
}

/// Format data as pretty-printed JSON inside the envelope
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize)]
    struct Row {
        rank: usize,
        url: String,
    }

    #[test]
    fn test_json_output_meta() {
        let output = JsonOutput::new(vec![1, 2]);

        assert_eq!(output.data, vec![1, 2]);
        assert_eq!(output.meta.tool, "serprank");
        assert_eq!(output.meta.version, env!("CARGO_PKG_VERSION"));
        assert!(!output.meta.generated_at.is_empty());
    }

    #[test]
    fn test_format_json_wraps_data() {
        let rows = vec![Row {
            rank: 1,
            url: "https://a.example/".to_string(),
        }];

        let value: serde_json::Value = serde_json::from_str(&format_json(&rows).unwrap()).unwrap();

        assert_eq!(value["data"][0]["rank"], 1);
        assert_eq!(value["data"][0]["url"], "https://a.example/");
        assert_eq!(value["meta"]["tool"], "serprank");
    }

    #[test]
    fn test_format_json_empty_vec() {
        let rows: Vec<Row> = vec![];
        let result = format_json(&rows).unwrap();

        assert!(result.contains("\"data\": []"));
    }
}
