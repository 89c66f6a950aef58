//! Parsing of data files and status arguments given on the command line.

use anyhow::{Context, Result};
use ledsdk_client::StatusPayload;
use ledsdk_types::SdkError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::Path;

/// Parse one record or a list of records from YAML (or JSON) text.
pub fn parse_items<T: DeserializeOwned>(content: &str) -> Result<Vec<T>> {
    let value: serde_yaml::Value = serde_yaml::from_str(content).context("Invalid YAML/JSON")?;
    let items = match value {
        serde_yaml::Value::Sequence(_) => serde_yaml::from_value::<Vec<T>>(value)?,
        serde_yaml::Value::Null => Vec::new(),
        single => vec![serde_yaml::from_value::<T>(single)?],
    };
    Ok(items)
}

pub async fn load_items<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_items(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Turn `key=value` arguments into a status payload.
///
/// A lone `key` becomes a key without value so the push reports it.
pub fn parse_status_args(args: &[String]) -> Result<StatusPayload, SdkError> {
    if let [single] = args {
        return Ok(match single.split_once('=') {
            Some((key, value)) => StatusPayload::pair(key.trim(), parse_value(value.trim())),
            None => StatusPayload::key(single.trim()),
        });
    }

    let mut map = Map::new();
    for arg in args {
        match arg.split_once('=') {
            Some((key, value)) => {
                map.insert(key.trim().to_string(), parse_value(value.trim()));
            }
            None => {
                return Err(SdkError::MissingValue {
                    key: arg.trim().to_string(),
                })
            }
        }
    }
    Ok(StatusPayload::Map(map))
}
