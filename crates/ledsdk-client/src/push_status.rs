use anyhow::Result;
use ledsdk_types::{SdkError, SdkResult};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::{forward, DeviceClient, DeviceCommand, DeviceIds, DeviceReply};

/// Status values pushed to a device: one key/value pair or a whole mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusPayload {
    Key { key: String, value: Option<Value> },
    Map(Map<String, Value>),
}

impl StatusPayload {
    /// A single key. Without a value it is rejected when pushed.
    pub fn key(key: impl Into<String>) -> Self {
        StatusPayload::Key {
            key: key.into(),
            value: None,
        }
    }

    pub fn pair(key: impl Into<String>, value: impl Into<Value>) -> Self {
        StatusPayload::Key {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// Dictionary sent with `pushStatus`.
    pub fn to_payload(&self) -> SdkResult<Value> {
        match self {
            StatusPayload::Key { key, value: None } => {
                Err(SdkError::MissingValue { key: key.clone() })
            }
            StatusPayload::Key {
                key,
                value: Some(value),
            } => {
                if key.is_empty() {
                    return Err(SdkError::MissingField {
                        field: "key".to_string(),
                    });
                }
                let mut map = Map::new();
                map.insert(key.clone(), value.clone());
                Ok(Value::Object(map))
            }
            StatusPayload::Map(map) => {
                if map.is_empty() {
                    return Err(SdkError::empty_payload("no status values given"));
                }
                Ok(Value::Object(map.clone()))
            }
        }
    }
}

impl From<&str> for StatusPayload {
    fn from(key: &str) -> Self {
        StatusPayload::key(key)
    }
}

impl From<String> for StatusPayload {
    fn from(key: String) -> Self {
        StatusPayload::key(key)
    }
}

impl<V: Into<Value>> From<(&str, V)> for StatusPayload {
    fn from((key, value): (&str, V)) -> Self {
        StatusPayload::pair(key, value)
    }
}

impl From<Map<String, Value>> for StatusPayload {
    fn from(map: Map<String, Value>) -> Self {
        StatusPayload::Map(map)
    }
}

impl<V: Into<Value>> From<HashMap<String, V>> for StatusPayload {
    fn from(map: HashMap<String, V>) -> Self {
        StatusPayload::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

/// Push status values (brightness, volume, ...) to devices.
pub struct PushStatusTask<'a> {
    client: &'a dyn DeviceClient,
}

impl<'a> PushStatusTask<'a> {
    pub fn new(client: &'a dyn DeviceClient) -> Self {
        Self { client }
    }

    pub async fn push_status(
        &self,
        ids: impl Into<DeviceIds>,
        status: impl Into<StatusPayload>,
    ) -> Result<Vec<DeviceReply>> {
        let ids = ids.into();
        let payload = status.into().to_payload()?;
        ids.ensure_not_empty()?;

        forward(self.client, &ids, DeviceCommand::PushStatus, payload).await
    }
}
