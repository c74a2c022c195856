//! Rendering of decoded key/value pairs.
//!
//! Supported formats:
//! - `text` (default): the bare value for a single key, `key='value'` lines otherwise
//! - `json`: `{ name, namespace, type, data: [{ key, value }, ...] }`
//! - `yaml`: the same document as YAML

use std::fmt;
use std::io::Write;

use serde::Serialize;

use super::types::Secret;
use crate::errors::{Result, ViewSecretError};

/// A decoded entry of a secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Output format selected with `--output`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Parse a format name. Unknown names fall back to `Text`.
    pub fn parse_lossy(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "yaml" | "yml" => OutputFormat::Yaml,
            "text" | "" => OutputFormat::Text,
            other => {
                tracing::warn!(format = other, "unknown output format, using text");
                OutputFormat::Text
            }
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        })
    }
}

#[derive(Serialize)]
struct SecretDocument<'a> {
    name: &'a str,
    namespace: &'a str,
    #[serde(rename = "type")]
    secret_type: &'a str,
    data: &'a [KeyValue],
}

/// Write `key_values` for `secret` to `out` in the given format.
///
/// Ordering is the caller's: multi-value input is expected to be sorted.
pub fn render(
    out: &mut dyn Write,
    key_values: &[KeyValue],
    secret: &Secret,
    format: OutputFormat,
) -> Result<()> {
    let content = match format {
        OutputFormat::Text => format_as_text(key_values),
        OutputFormat::Json => format_as_json(key_values, secret)?,
        OutputFormat::Yaml => format_as_yaml(key_values, secret)?,
    };
    out.write_all(content.as_bytes())?;
    out.flush()?;
    Ok(())
}

fn format_as_text(key_values: &[KeyValue]) -> String {
    use std::fmt::Write;
    match key_values {
        [single] => format!("{}\n", single.value),
        many => {
            let mut out = String::new();
            for kv in many {
                let _ = writeln!(out, "{}='{}'", kv.key, kv.value);
            }
            out
        }
    }
}

fn document<'a>(key_values: &'a [KeyValue], secret: &'a Secret) -> SecretDocument<'a> {
    SecretDocument {
        name: secret.name(),
        namespace: secret.namespace(),
        secret_type: secret.secret_type.as_str(),
        data: key_values,
    }
}

fn format_as_json(key_values: &[KeyValue], secret: &Secret) -> Result<String> {
    let mut json = serde_json::to_string_pretty(&document(key_values, secret))
        .map_err(|e| ViewSecretError::Serialization(format!("JSON output: {e}")))?;
    json.push('\n');
    Ok(json)
}

fn format_as_yaml(key_values: &[KeyValue], secret: &Secret) -> Result<String> {
    serde_yaml::to_string(&document(key_values, secret))
        .map_err(|e| ViewSecretError::Serialization(format!("YAML output: {e}")))
}
