use anyhow::Result;
use ledsdk_types::{OneOrMany, ScheduledTaskInfo};
use serde_json::json;

use crate::{forward, DeviceClient, DeviceCommand, DeviceIds, DeviceOutcome, DeviceReply};

/// Read and replace the date-bound tasks of devices.
pub struct ScheduledTask<'a> {
    client: &'a dyn DeviceClient,
}

impl<'a> ScheduledTask<'a> {
    pub fn new(client: &'a dyn DeviceClient) -> Self {
        Self { client }
    }

    pub async fn get_scheduled_task(
        &self,
        ids: impl Into<DeviceIds>,
    ) -> Result<Vec<DeviceOutcome<Vec<ScheduledTaskInfo>>>> {
        let ids = ids.into();
        ids.ensure_not_empty()?;

        let replies =
            forward(self.client, &ids, DeviceCommand::GetScheduledTask, json!({})).await?;
        Ok(replies.iter().map(DeviceOutcome::from_reply).collect())
    }

    /// Replace the scheduled tasks of each device. Tasks are validated first.
    pub async fn set_scheduled_task(
        &self,
        ids: impl Into<DeviceIds>,
        tasks: impl Into<OneOrMany<ScheduledTaskInfo>>,
    ) -> Result<Vec<DeviceReply>> {
        let ids = ids.into();
        ids.ensure_not_empty()?;
        let tasks = tasks.into();
        for task in tasks.as_slice() {
            task.validate()?;
        }
        let payload = tasks.to_payload("no scheduled tasks given")?;

        forward(self.client, &ids, DeviceCommand::SetScheduledTask, payload).await
    }
}
