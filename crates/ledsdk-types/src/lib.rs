//! Data model for the LED display controller SDK
//!
//! Every record in this crate is a plain value object that can be built in
//! code, cloned, and converted to and from the dictionary (JSON object) form
//! the device expects in command payloads.
//!
//! ## Example
//!
//! ```rust
//! use ledsdk_types::{Payload, PeriodicTaskInfo, PeriodicTaskItem, TaskType};
//! use chrono::NaiveTime;
//!
//! let task = PeriodicTaskInfo::new(TaskType::Brightness)
//!     .with_item(PeriodicTaskItem::new(NaiveTime::from_hms_opt(8, 0, 0).unwrap()).with_value(80));
//!
//! let dict = task.to_dict().unwrap();
//! assert_eq!(dict["type"], "brightness");
//! assert_eq!(PeriodicTaskInfo::from_dict(dict).unwrap(), task);
//! ```

pub mod border;
pub mod clock;
pub mod content;
pub mod error;
pub mod file;
pub mod normalize;
pub mod payload;
pub mod task;

pub use border::*;
pub use clock::*;
pub use content::*;
pub use error::*;
pub use file::*;
pub use normalize::*;
pub use payload::*;
pub use task::*;
