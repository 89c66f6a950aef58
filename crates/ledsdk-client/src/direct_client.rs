use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::{DeviceClient, DeviceCommand, DeviceIds, DeviceReply};

/// In-process command sink, e.g. an embedded gateway or a test double.
#[async_trait]
pub trait DeviceHandler: Send + Sync {
    async fn handle(
        &self,
        ids: &[String],
        command: &DeviceCommand,
        payload: Value,
    ) -> Result<Vec<DeviceReply>>;
}

pub struct DirectDeviceClient<T: DeviceHandler> {
    handler: Arc<T>,
}

impl<T: DeviceHandler> DirectDeviceClient<T> {
    pub fn new(handler: Arc<T>) -> Self {
        Self { handler }
    }
}

#[async_trait]
impl<T: DeviceHandler> DeviceClient for DirectDeviceClient<T> {
    async fn device(
        &self,
        ids: &DeviceIds,
        command: &DeviceCommand,
        payload: Value,
    ) -> Result<Vec<DeviceReply>> {
        ids.ensure_not_empty()?;
        self.handler
            .handle(ids.as_slice(), command, payload)
            .await
            .context("Device handler error")
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
