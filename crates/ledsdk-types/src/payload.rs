//! Dictionary conversion shared by every record sent to a device.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{SdkError, SdkResult};

/// A record that travels to the device as a JSON object.
pub trait Payload: Serialize + DeserializeOwned + Sized {
    /// Convert the record into its dictionary form.
    fn to_dict(&self) -> SdkResult<Value> {
        let value = serde_json::to_value(self)?;
        if !value.is_object() {
            return Err(SdkError::Serialization {
                message: format!("expected an object payload, got {}", value),
            });
        }
        Ok(value)
    }

    /// Build the record from its dictionary form.
    fn from_dict(value: Value) -> SdkResult<Self> {
        if !value.is_object() {
            return Err(SdkError::Serialization {
                message: format!("expected an object, got {}", value),
            });
        }
        Ok(serde_json::from_value(value)?)
    }
}
