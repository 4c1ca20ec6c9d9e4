//! Metadata uploads to an IPFS storage service.

use super::Uploader;
use crate::{
    config::StorageConfig,
    constants::IPFS_SCHEME,
    error::UploadError,
    types::NftMetadata,
};
use async_trait::async_trait;
use reqwest::{
    Client,
    multipart::{Form, Part},
};
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

/// Header carrying the storage service secret key.
const SECRET_KEY_HEADER: &str = "x-secret-key";

/// Response of the storage service upload endpoint.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    /// Content identifier of the uploaded directory.
    #[serde(rename = "IpfsHash", default)]
    ipfs_hash: Option<String>,
}

impl UploadResponse {
    /// Returns the locator of the single uploaded file.
    ///
    /// Files are uploaded into a directory and named by their position, so a single document
    /// lives at `ipfs://<cid>/0`.
    fn into_locator(self) -> Result<String, UploadError> {
        let cid = self.ipfs_hash.filter(|cid| !cid.is_empty()).ok_or(UploadError::MissingCid)?;
        Ok(format!("{IPFS_SCHEME}{cid}/0"))
    }
}

/// [`Uploader`] pinning metadata documents through an HTTP storage service.
#[derive(Debug, Clone)]
pub struct IpfsUploader {
    client: Client,
    upload_url: Url,
    gateway: Url,
    secret_key: Option<String>,
}

impl IpfsUploader {
    /// Creates a new [`IpfsUploader`] posting to `upload_url`, with default storage settings.
    pub fn new(upload_url: Url) -> Result<Self, UploadError> {
        Self::from_config(&StorageConfig::default().with_upload_url(upload_url))
    }

    /// Creates a new [`IpfsUploader`] from the storage configuration.
    ///
    /// Fails if the HTTP client cannot be built, e.g. when no TLS backend is available.
    pub fn from_config(config: &StorageConfig) -> Result<Self, UploadError> {
        Ok(Self {
            client: Client::builder().timeout(config.timeout).build()?,
            upload_url: config.upload_url.clone(),
            gateway: config.gateway.clone(),
            secret_key: config.secret_key.clone(),
        })
    }

    /// Sets the secret key sent with every upload.
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Sets the gateway used by [`Self::gateway_url`].
    pub fn with_gateway(mut self, gateway: Url) -> Self {
        self.gateway = gateway;
        self
    }

    /// Resolves an `ipfs://` locator to a URL on the configured gateway.
    ///
    /// Returns `None` for locators of other schemes.
    pub fn gateway_url(&self, locator: &str) -> Option<Url> {
        let path = locator.strip_prefix(IPFS_SCHEME)?;
        self.gateway.join(path).ok()
    }
}

#[async_trait]
impl Uploader for IpfsUploader {
    #[instrument(skip_all, fields(name = ?metadata.name))]
    async fn upload(&self, metadata: &NftMetadata) -> Result<String, UploadError> {
        let document = serde_json::to_vec(metadata)?;
        let part = Part::bytes(document).file_name("files/0").mime_str("application/json")?;

        let mut request =
            self.client.post(self.upload_url.clone()).multipart(Form::new().part("file", part));
        if let Some(secret_key) = &self.secret_key {
            request = request.header(SECRET_KEY_HEADER, secret_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::Status { status, body });
        }

        let locator = response.json::<UploadResponse>().await?.into_locator()?;
        debug!(%locator, "Uploaded metadata");
        Ok(locator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_UPLOAD_URL;
    use httpmock::{Method::POST, MockServer};
    use reqwest::StatusCode;
    use serde_json::json;

    fn uploader(server: &MockServer) -> IpfsUploader {
        IpfsUploader::new(server.url("/ipfs/upload").parse().unwrap()).unwrap()
    }

    #[test]
    fn test_response_locator() {
        let response: UploadResponse =
            serde_json::from_str(r#"{"IpfsHash":"QmXyz","PinSize":12}"#).unwrap();
        assert_eq!(response.into_locator().unwrap(), "ipfs://QmXyz/0");

        let response: UploadResponse = serde_json::from_str(r#"{"IpfsHash":""}"#).unwrap();
        assert!(matches!(response.into_locator(), Err(UploadError::MissingCid)));

        let response: UploadResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(response.into_locator(), Err(UploadError::MissingCid)));
    }

    #[test]
    fn test_gateway_url() {
        let uploader = IpfsUploader::new(DEFAULT_UPLOAD_URL.parse().unwrap()).unwrap();
        assert_eq!(
            uploader.gateway_url("ipfs://QmXyz/0").unwrap().as_str(),
            "https://ipfs.io/ipfs/QmXyz/0"
        );
        assert!(uploader.gateway_url("https://example.com/0.json").is_none());

        let uploader = uploader.with_gateway("https://gateway.example/ipfs/".parse().unwrap());
        assert_eq!(
            uploader.gateway_url("ipfs://QmXyz/0").unwrap().as_str(),
            "https://gateway.example/ipfs/QmXyz/0"
        );
    }

    #[tokio::test]
    async fn test_upload() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/ipfs/upload")
                    .header(SECRET_KEY_HEADER, "secret")
                    .body_contains(r#"name="file"; filename="files/0""#)
                    .body_contains(r#""name":"Sword""#);
                then.status(200).json_body(json!({ "IpfsHash": "QmSword", "PinSize": 42 }));
            })
            .await;

        let locator = uploader(&server)
            .with_secret_key("secret")
            .upload(&NftMetadata::named("Sword"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(locator, "ipfs://QmSword/0");
    }

    #[tokio::test]
    async fn test_upload_rejected() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/ipfs/upload");
                then.status(401).body("invalid secret key");
            })
            .await;

        let err = uploader(&server).upload(&NftMetadata::named("Sword")).await.unwrap_err();

        mock.assert_async().await;
        assert!(matches!(
            err,
            UploadError::Status { status, ref body }
                if status == StatusCode::UNAUTHORIZED && body == "invalid secret key"
        ));
    }

    #[tokio::test]
    async fn test_upload_without_cid() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/ipfs/upload");
                then.status(200).json_body(json!({}));
            })
            .await;

        let err = uploader(&server).upload(&NftMetadata::named("Sword")).await.unwrap_err();
        assert!(matches!(err, UploadError::MissingCid));
    }
}
