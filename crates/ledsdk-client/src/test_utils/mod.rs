mod mock_device_server;

pub use mock_device_server::{MockDeviceServer, RecordedRequest};
