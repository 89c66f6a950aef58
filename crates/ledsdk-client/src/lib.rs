//! Client SDK for sending commands to networked LED display controllers
//!
//! Every device operation reduces to one call: `device(ids, command, payload)`.
//! The task wrappers in this crate ([`PeriodicTask`], [`ScheduledTask`],
//! [`PushStatusTask`]) normalize their inputs, turn data objects into
//! dictionaries and forward them through a [`DeviceClient`]. The client can
//! talk to a remote gateway over HTTP or to an in-process [`DeviceHandler`].

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

pub mod command;
pub mod config;
pub mod direct_client;
pub mod http_client;
pub mod periodic_task;
pub mod push_status;
pub mod scheduled_task;

#[cfg(test)]
pub mod test_utils;

pub use command::*;
pub use config::{ClientConfig, ConfigLoader};
pub use direct_client::{DeviceHandler, DirectDeviceClient};
pub use http_client::HttpDeviceClient;
pub use ledsdk_types::DeviceIds;
pub use periodic_task::PeriodicTask;
pub use push_status::{PushStatusTask, StatusPayload};
pub use scheduled_task::ScheduledTask;

/// DeviceClient trait for forwarding commands to devices
#[async_trait]
pub trait DeviceClient: Send + Sync {
    /// Send `command` with `payload` to every device in `ids`
    async fn device(
        &self,
        ids: &DeviceIds,
        command: &DeviceCommand,
        payload: Value,
    ) -> Result<Vec<DeviceReply>>;

    /// Check if the device gateway is reachable
    async fn health_check(&self) -> Result<()>;
}

/// Factory for creating DeviceClient instances
pub struct DeviceClientFactory;

impl DeviceClientFactory {
    /// Create an HTTP client for a remote gateway
    pub fn create_http_client(config: &ClientConfig) -> Box<dyn DeviceClient> {
        Box::new(HttpDeviceClient::from_config(config))
    }

    /// Create a direct client for an in-process handler
    pub fn create_direct_client<T: DeviceHandler + 'static>(
        handler: std::sync::Arc<T>,
    ) -> Box<dyn DeviceClient> {
        Box::new(DirectDeviceClient::new(handler))
    }
}

/// Forward a command and log replies the device did not accept.
pub(crate) async fn forward(
    client: &dyn DeviceClient,
    ids: &DeviceIds,
    command: DeviceCommand,
    payload: Value,
) -> Result<Vec<DeviceReply>> {
    log::debug!("Sending {} to [{}]", command, ids.joined());
    let replies = client.device(ids, &command, payload).await?;
    for reply in replies.iter().filter(|r| !r.is_ok()) {
        log::warn!(
            "Device {} rejected {}: {}",
            reply.id,
            command,
            reply.message
        );
    }
    Ok(replies)
}
