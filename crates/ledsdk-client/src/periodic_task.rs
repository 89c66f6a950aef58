use anyhow::Result;
use ledsdk_types::{OneOrMany, PeriodicTaskInfo};
use serde_json::{json, Value};

use crate::{forward, DeviceClient, DeviceCommand, DeviceIds, DeviceOutcome, DeviceReply};

/// Read and replace the weekly timetables of devices.
pub struct PeriodicTask<'a> {
    client: &'a dyn DeviceClient,
}

impl<'a> PeriodicTask<'a> {
    pub fn new(client: &'a dyn DeviceClient) -> Self {
        Self { client }
    }

    /// Fetch the periodic tasks configured on each device.
    pub async fn get_periodic_task(
        &self,
        ids: impl Into<DeviceIds>,
    ) -> Result<Vec<DeviceOutcome<Vec<PeriodicTaskInfo>>>> {
        let ids = ids.into();
        ids.ensure_not_empty()?;

        let replies = forward(self.client, &ids, DeviceCommand::GetPeriodicTask, json!({})).await?;
        Ok(replies.iter().map(DeviceOutcome::from_reply).collect())
    }

    /// Replace the periodic tasks of each device.
    pub async fn set_periodic_task(
        &self,
        ids: impl Into<DeviceIds>,
        tasks: impl Into<OneOrMany<PeriodicTaskInfo>>,
    ) -> Result<Vec<DeviceReply>> {
        let ids = ids.into();
        ids.ensure_not_empty()?;
        let payload: Value = tasks.into().to_payload("no periodic tasks given")?;

        forward(self.client, &ids, DeviceCommand::SetPeriodicTask, payload).await
    }
}
