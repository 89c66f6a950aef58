//! Timed device tasks: weekly periodic tasks and date-bound scheduled tasks.

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{SdkError, SdkResult};
use crate::payload::Payload;

/// What a timed task controls on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    /// Turn the screen on or off.
    Screen,
    Brightness,
    Volume,
    Reboot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodicTaskItem {
    pub start: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveTime>,
    /// Days the item applies to. Empty means every day.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weekdays: Vec<Weekday>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl PeriodicTaskItem {
    pub fn new(start: NaiveTime) -> Self {
        Self {
            start,
            end: None,
            weekdays: Vec::new(),
            value: None,
        }
    }

    pub fn with_end(mut self, end: NaiveTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_weekdays(mut self, weekdays: Vec<Weekday>) -> Self {
        self.weekdays = weekdays;
        self
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn applies_on(&self, day: Weekday) -> bool {
        self.weekdays.is_empty() || self.weekdays.contains(&day)
    }
}

/// A task the device repeats on a weekly timetable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodicTaskInfo {
    #[serde(rename = "type")]
    pub task_type: TaskType,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub items: Vec<PeriodicTaskItem>,
}

fn default_enabled() -> bool {
    true
}

impl PeriodicTaskInfo {
    pub fn new(task_type: TaskType) -> Self {
        Self {
            task_type,
            enabled: true,
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: PeriodicTaskItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn add_item(&mut self, item: PeriodicTaskItem) -> &mut Self {
        self.items.push(item);
        self
    }
}

impl Payload for PeriodicTaskInfo {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTaskItem {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weekdays: Vec<Weekday>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl ScheduledTaskItem {
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            start_date,
            end_date,
            start_time,
            end_time,
            weekdays: Vec::new(),
            value: None,
        }
    }

    pub fn with_weekdays(mut self, weekdays: Vec<Weekday>) -> Self {
        self.weekdays = weekdays;
        self
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// A task bound to a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTaskInfo {
    #[serde(rename = "type")]
    pub task_type: TaskType,
    #[serde(default)]
    pub items: Vec<ScheduledTaskItem>,
}

impl ScheduledTaskInfo {
    pub fn new(task_type: TaskType) -> Self {
        Self {
            task_type,
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: ScheduledTaskItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn validate(&self) -> SdkResult<()> {
        for (index, item) in self.items.iter().enumerate() {
            if item.end_date < item.start_date {
                return Err(SdkError::validation(format!(
                    "Scheduled {:?} item {} ends ({}) before it starts ({})",
                    self.task_type, index, item.end_date, item.start_date
                )));
            }
        }
        Ok(())
    }
}

impl Payload for ScheduledTaskInfo {}
