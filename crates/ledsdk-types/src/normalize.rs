//! Single-or-many input normalization.
//!
//! Every SDK call accepts either one device id or many, and either one data
//! object or many. These wrappers turn both shapes into a list so a single
//! value and a one-element list are indistinguishable downstream.

use serde_json::Value;

use crate::content::ContentNode;
use crate::error::{SdkError, SdkResult};
use crate::file::FileInfo;
use crate::payload::Payload;
use crate::task::{PeriodicTaskInfo, ScheduledTaskInfo};

/// Target devices of a command. Ids are trimmed and blank ids dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceIds(Vec<String>);

impl DeviceIds {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            ids.into_iter()
                .map(|id| id.as_ref().trim().to_string())
                .filter(|id| !id.is_empty())
                .collect(),
        )
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// Comma separated form used in request paths.
    pub fn joined(&self) -> String {
        self.0.join(",")
    }

    pub fn ensure_not_empty(&self) -> SdkResult<()> {
        if self.0.is_empty() {
            return Err(SdkError::empty_payload("no device ids given"));
        }
        Ok(())
    }
}

impl From<&str> for DeviceIds {
    fn from(id: &str) -> Self {
        Self::new([id])
    }
}

impl From<String> for DeviceIds {
    fn from(id: String) -> Self {
        Self::new([id])
    }
}

impl From<&String> for DeviceIds {
    fn from(id: &String) -> Self {
        Self::new([id])
    }
}

impl From<Vec<String>> for DeviceIds {
    fn from(ids: Vec<String>) -> Self {
        Self::new(ids)
    }
}

impl From<Vec<&str>> for DeviceIds {
    fn from(ids: Vec<&str>) -> Self {
        Self::new(ids)
    }
}

impl From<&[String]> for DeviceIds {
    fn from(ids: &[String]) -> Self {
        Self::new(ids)
    }
}

impl From<&[&str]> for DeviceIds {
    fn from(ids: &[&str]) -> Self {
        Self::new(ids)
    }
}

impl<const N: usize> From<[&str; N]> for DeviceIds {
    fn from(ids: [&str; N]) -> Self {
        Self::new(ids)
    }
}

impl From<&DeviceIds> for DeviceIds {
    fn from(ids: &DeviceIds) -> Self {
        ids.clone()
    }
}

/// One data object or a sequence of them.
#[derive(Debug, Clone, PartialEq)]
pub struct OneOrMany<T>(Vec<T>);

impl<T> OneOrMany<T> {
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T: Payload> OneOrMany<T> {
    /// Dictionary list sent as the command payload. Empty lists are rejected.
    pub fn to_payload(&self, context: &str) -> SdkResult<Value> {
        if self.0.is_empty() {
            return Err(SdkError::empty_payload(context.to_string()));
        }
        let dicts = self
            .0
            .iter()
            .map(Payload::to_dict)
            .collect::<SdkResult<Vec<_>>>()?;
        Ok(Value::Array(dicts))
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(items: Vec<T>) -> Self {
        Self(items)
    }
}

impl<T: Clone> From<&[T]> for OneOrMany<T> {
    fn from(items: &[T]) -> Self {
        Self(items.to_vec())
    }
}

impl<T, const N: usize> From<[T; N]> for OneOrMany<T> {
    fn from(items: [T; N]) -> Self {
        Self(items.into())
    }
}

macro_rules! impl_one_or_many {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for OneOrMany<$ty> {
                fn from(item: $ty) -> Self {
                    Self(vec![item])
                }
            }

            impl From<&$ty> for OneOrMany<$ty> {
                fn from(item: &$ty) -> Self {
                    Self(vec![item.clone()])
                }
            }
        )*
    };
}

impl_one_or_many!(PeriodicTaskInfo, ScheduledTaskInfo, ContentNode, FileInfo);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskType;

    #[test]
    fn test_single_id_matches_one_element_list() {
        let single = DeviceIds::from("C16-D00-A000F");
        assert_eq!(single, DeviceIds::from(vec!["C16-D00-A000F"]));
        assert_eq!(single, DeviceIds::from(vec!["C16-D00-A000F".to_string()]));
        assert_eq!(single, DeviceIds::from(["C16-D00-A000F"]));
        assert_eq!(single, DeviceIds::from("C16-D00-A000F".to_string()));
        assert_eq!(single.joined(), "C16-D00-A000F");
    }

    #[test]
    fn test_ids_are_trimmed_and_blanks_dropped() {
        let ids = DeviceIds::from(vec![" a ", "", "b", "   "]);
        assert_eq!(ids.as_slice(), &["a".to_string(), "b".to_string()]);
        assert_eq!(ids.joined(), "a,b");
    }

    #[test]
    fn test_empty_ids_are_rejected() {
        assert!(DeviceIds::from("").ensure_not_empty().is_err());
        assert!(DeviceIds::from(Vec::<String>::new()).ensure_not_empty().is_err());
        assert!(DeviceIds::from("x").ensure_not_empty().is_ok());
    }

    #[test]
    fn test_single_object_matches_one_element_list() {
        let task = PeriodicTaskInfo::new(TaskType::Screen);
        let single = OneOrMany::from(task.clone());
        let list = OneOrMany::from(vec![task.clone()]);
        let borrowed = OneOrMany::from(&task);

        assert_eq!(single, list);
        assert_eq!(single, borrowed);
        assert_eq!(
            single.to_payload("tasks").unwrap(),
            list.to_payload("tasks").unwrap()
        );
    }

    #[test]
    fn test_payload_is_a_list_of_dicts() {
        let tasks = OneOrMany::from([
            ScheduledTaskInfo::new(TaskType::Volume),
            ScheduledTaskInfo::new(TaskType::Reboot),
        ]);
        let payload = tasks.to_payload("tasks").unwrap();
        assert_eq!(payload.as_array().unwrap().len(), 2);
        assert_eq!(payload[1]["type"], "reboot");
    }

    #[test]
    fn test_empty_object_list_is_rejected() {
        let empty: OneOrMany<PeriodicTaskInfo> = Vec::new().into();
        let err = empty.to_payload("no periodic tasks given").unwrap_err();
        assert!(matches!(err, SdkError::EmptyPayload { .. }));
    }
}
