use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use ledsdk_types::{FileInfo, SdkError};
use serde::Deserialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::time::Duration;

use crate::{ClientConfig, DeviceClient, DeviceCommand, DeviceIds, DeviceReply, DeviceRequest};

#[derive(Debug, Clone)]
struct Credentials {
    key: String,
    secret: String,
}

#[derive(Debug, Deserialize)]
struct DeviceResponse {
    message: String,
    #[serde(default)]
    data: Vec<DeviceReply>,
}

#[derive(Debug, Deserialize)]
struct UploadedFile {
    url: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    message: String,
    #[serde(default)]
    data: Option<UploadedFile>,
}

/// Signature sent in the `sign` header: SHA-256 over body, key, date and secret.
pub fn sign_request(body: &[u8], key: &str, date: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body);
    hasher.update(key.as_bytes());
    hasher.update(date.as_bytes());
    hasher.update(secret.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// HTTP client for a remote device gateway
pub struct HttpDeviceClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
    credentials: Option<Credentials>,
}

impl HttpDeviceClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(30),
            credentials: None,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        let client = Self::new(config.server_url.clone()).with_timeout(config.timeout());
        match (&config.sdk_key, &config.sdk_secret) {
            (Some(key), Some(secret)) => client.with_credentials(key.clone(), secret.clone()),
            _ => client,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_credentials(mut self, key: String, secret: String) -> Self {
        self.credentials = Some(Credentials { key, secret });
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn device_url(&self, ids: &DeviceIds) -> String {
        let encoded: Vec<String> = ids
            .iter()
            .map(|id| urlencoding::encode(id).into_owned())
            .collect();
        format!("{}/api/device/{}", self.base_url, encoded.join(","))
    }

    fn signed(&self, request: reqwest::RequestBuilder, body: &[u8]) -> reqwest::RequestBuilder {
        match &self.credentials {
            Some(credentials) => {
                let date = chrono::Utc::now().to_rfc2822();
                let sign = sign_request(body, &credentials.key, &date, &credentials.secret);
                request
                    .header("sdkKey", &credentials.key)
                    .header("date", date)
                    .header("sign", sign)
            }
            None => request,
        }
    }

    /// Upload a local file to the gateway and return its device-visible URL.
    pub async fn upload_file(&self, file: &FileInfo) -> Result<String> {
        if file.name.is_empty() {
            return Err(SdkError::MissingField {
                field: "name".to_string(),
            }
            .into());
        }

        let content = tokio::fs::read(file.path())
            .await
            .with_context(|| format!("Failed to read {}", file.path().display()))?;
        let checksum = if file.checksum.is_empty() {
            format!("{:x}", Sha256::digest(&content))
        } else {
            file.checksum.clone()
        };

        let url = format!(
            "{}/api/file/{}",
            self.base_url,
            urlencoding::encode(&file.name)
        );
        log::debug!("Uploading {} ({} bytes) to {}", file.name, content.len(), url);

        let request = self
            .client
            .post(&url)
            .header("Content-Type", "application/octet-stream")
            .header("checksum", checksum)
            .timeout(self.timeout);
        let response = self.signed(request, &content).body(content).send().await?;

        if !response.status().is_success() {
            bail!("File upload failed: {}", response.status());
        }

        let upload: UploadResponse = response.json().await?;
        if upload.message != "ok" {
            bail!("File upload rejected: {}", upload.message);
        }
        match upload.data {
            Some(uploaded) => Ok(uploaded.url),
            None => bail!("File upload response carried no URL"),
        }
    }
}

#[async_trait]
impl DeviceClient for HttpDeviceClient {
    async fn device(
        &self,
        ids: &DeviceIds,
        command: &DeviceCommand,
        payload: Value,
    ) -> Result<Vec<DeviceReply>> {
        ids.ensure_not_empty()?;

        let url = self.device_url(ids);
        let body = serde_json::to_string(&DeviceRequest::new(command, payload))?;

        let request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .timeout(self.timeout);
        let response = self.signed(request, body.as_bytes()).body(body).send().await?;

        if !response.status().is_success() {
            bail!("Device command {} failed: {}", command, response.status());
        }

        let response: DeviceResponse = response.json().await?;
        if response.message != "ok" {
            bail!("Device command {} rejected: {}", command, response.message);
        }

        Ok(response.data)
    }

    async fn health_check(&self) -> Result<()> {
        let health_url = format!("{}/api/health", self.base_url);
        let response = self
            .client
            .get(&health_url)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            bail!("Health check failed: {}", response.status());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockDeviceServer;
    use serde_json::json;

    #[test]
    fn test_sign_is_stable_hex() {
        let a = sign_request(b"{}", "key", "Mon, 19 Oct 2026 10:00:00 +0000", "secret");
        let b = sign_request(b"{}", "key", "Mon, 19 Oct 2026 10:00:00 +0000", "secret");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert_ne!(a, sign_request(b"{}", "key", "other date", "secret"));
    }

    #[test]
    fn test_device_url_joins_and_encodes_ids() {
        let client = HttpDeviceClient::new("http://gw:30080/".to_string());
        assert_eq!(client.base_url(), "http://gw:30080");
        let ids = DeviceIds::from(vec!["A-1", "B 2"]);
        assert_eq!(client.device_url(&ids), "http://gw:30080/api/device/A-1,B%202");
    }

    #[tokio::test]
    async fn test_device_posts_method_and_data() {
        let server = MockDeviceServer::start(vec![json!({
            "message": "ok",
            "data": [{"id": "D1", "message": "ok", "data": {"done": true}}]
        })])
        .await;

        let client = HttpDeviceClient::new(server.address());
        let replies = client
            .device(
                &DeviceIds::from("D1"),
                &DeviceCommand::PushStatus,
                json!({"brightness": 50}),
            )
            .await
            .unwrap();

        assert_eq!(replies, vec![DeviceReply::ok("D1", json!({"done": true}))]);

        let requests = server.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/api/device/D1");
        assert_eq!(
            requests[0].body,
            json!({"method": "pushStatus", "data": {"brightness": 50}})
        );
        assert!(requests[0].sign.is_none());
        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_signed_requests_carry_verifiable_headers() {
        let server = MockDeviceServer::start(vec![json!({"message": "ok", "data": []})]).await;
        let client = HttpDeviceClient::new(server.address())
            .with_credentials("my-key".to_string(), "my-secret".to_string());

        client
            .device(&DeviceIds::from("D1"), &DeviceCommand::GetPeriodicTask, json!({}))
            .await
            .unwrap();

        let requests = server.get_requests();
        let request = &requests[0];
        assert_eq!(request.sdk_key.as_deref(), Some("my-key"));
        let date = request.date.clone().unwrap();
        let expected = sign_request(request.raw_body.as_bytes(), "my-key", &date, "my-secret");
        assert_eq!(request.sign.as_deref(), Some(expected.as_str()));
        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_gateway_rejection_is_an_error() {
        let server =
            MockDeviceServer::start(vec![json!({"message": "invalid sdkKey", "data": []})]).await;
        let client = HttpDeviceClient::new(server.address());

        let err = client
            .device(&DeviceIds::from("D1"), &DeviceCommand::GetScheduledTask, json!({}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("invalid sdkKey"));
        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_http_error_status_is_an_error() {
        // No queued responses: the mock answers 503.
        let server = MockDeviceServer::start(vec![]).await;
        let client = HttpDeviceClient::new(server.address());

        let result = client
            .device(&DeviceIds::from("D1"), &DeviceCommand::GetScheduledTask, json!({}))
            .await;
        assert!(result.is_err());
        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_empty_ids_fail_before_sending() {
        let server = MockDeviceServer::start(vec![]).await;
        let client = HttpDeviceClient::new(server.address());

        let err = client
            .device(&DeviceIds::from(""), &DeviceCommand::PushStatus, json!({"a": 1}))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SdkError>(),
            Some(SdkError::EmptyPayload { .. })
        ));
        assert!(server.get_requests().is_empty());
        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = MockDeviceServer::start(vec![]).await;
        let client = HttpDeviceClient::new(server.address());
        assert!(client.health_check().await.is_ok());
        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_upload_file_returns_url() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, b"image-bytes").unwrap();
        let file = FileInfo::from_path(&path).unwrap();

        let server = MockDeviceServer::start(vec![json!({
            "message": "ok",
            "data": {"url": "http://gw/files/logo.png"}
        })])
        .await;
        let client = HttpDeviceClient::new(server.address());

        let url = client.upload_file(&file).await.unwrap();
        assert_eq!(url, "http://gw/files/logo.png");

        let requests = server.get_requests();
        let request = &requests[0];
        assert_eq!(request.path, "/api/file/logo.png");
        assert_eq!(request.checksum.as_deref(), Some(file.checksum.as_str()));
        assert_eq!(request.raw_body, "image-bytes");
        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_signed_upload_signs_file_content() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, b"image-bytes").unwrap();
        let file = FileInfo::from_path(&path).unwrap();

        let server = MockDeviceServer::start(vec![json!({
            "message": "ok",
            "data": {"url": "http://gw/files/logo.png"}
        })])
        .await;
        let client = HttpDeviceClient::new(server.address())
            .with_credentials("my-key".to_string(), "my-secret".to_string());

        client.upload_file(&file).await.unwrap();

        let requests = server.get_requests();
        let request = &requests[0];
        let date = request.date.clone().unwrap();
        let expected = sign_request(b"image-bytes", "my-key", &date, "my-secret");
        assert_eq!(request.sdk_key.as_deref(), Some("my-key"));
        assert_eq!(request.sign.as_deref(), Some(expected.as_str()));
        server.shutdown().await;
    }
}
