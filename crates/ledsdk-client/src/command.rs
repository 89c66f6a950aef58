use ledsdk_types::{SdkError, SdkResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Command names understood by the device.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeviceCommand {
    GetPeriodicTask,
    SetPeriodicTask,
    PushStatus,
    GetScheduledTask,
    SetScheduledTask,
    /// Any other command, forwarded verbatim.
    Custom(String),
}

impl DeviceCommand {
    pub fn as_str(&self) -> &str {
        match self {
            DeviceCommand::GetPeriodicTask => "getPeriodicTask",
            DeviceCommand::SetPeriodicTask => "setPeriodicTask",
            DeviceCommand::PushStatus => "pushStatus",
            DeviceCommand::GetScheduledTask => "getScheduledTask",
            DeviceCommand::SetScheduledTask => "setScheduledTask",
            DeviceCommand::Custom(name) => name,
        }
    }
}

impl From<&str> for DeviceCommand {
    fn from(name: &str) -> Self {
        match name {
            "getPeriodicTask" => DeviceCommand::GetPeriodicTask,
            "setPeriodicTask" => DeviceCommand::SetPeriodicTask,
            "pushStatus" => DeviceCommand::PushStatus,
            "getScheduledTask" => DeviceCommand::GetScheduledTask,
            "setScheduledTask" => DeviceCommand::SetScheduledTask,
            other => DeviceCommand::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for DeviceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body posted to the device endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRequest {
    pub method: String,
    pub data: Value,
}

impl DeviceRequest {
    pub fn new(command: &DeviceCommand, data: Value) -> Self {
        Self {
            method: command.as_str().to_string(),
            data,
        }
    }
}

/// Per-device answer to a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceReply {
    pub id: String,
    pub message: String,
    #[serde(default)]
    pub data: Value,
}

impl DeviceReply {
    pub fn ok(id: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            message: "ok".to_string(),
            data,
        }
    }

    pub fn failed(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            data: Value::Null,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.message == "ok"
    }

    /// Decode the reply data into a typed value.
    pub fn decode<T: DeserializeOwned>(&self) -> SdkResult<T> {
        serde_json::from_value(self.data.clone()).map_err(|e| SdkError::Serialization {
            message: format!("Failed to decode reply from device {}: {}", self.id, e),
        })
    }
}

/// Typed outcome of a read command for a single device.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceOutcome<T> {
    pub id: String,
    pub result: Result<T, String>,
}

impl<T: DeserializeOwned + Default> DeviceOutcome<T> {
    /// A successful reply without data decodes to `T::default()`.
    pub fn from_reply(reply: &DeviceReply) -> Self {
        let result = if reply.is_ok() {
            reply
                .decode::<Option<T>>()
                .map(Option::unwrap_or_default)
                .map_err(|e| e.to_string())
        } else {
            Err(reply.message.clone())
        };
        Self {
            id: reply.id.clone(),
            result,
        }
    }
}

impl<T> DeviceOutcome<T> {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}
