use crate::config::Config;
use crate::error::LookupError;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Status and body of a completed request, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Decode the body of a 200 reply as a JSON array of `T`.
    pub fn into_records<T: serde::de::DeserializeOwned>(self) -> Result<Vec<T>, LookupError> {
        if !self.is_ok() {
            return Err(LookupError::Http {
                status: self.status,
                body: self.body,
            });
        }
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Issues authenticated GET requests against the TheHive API.
#[async_trait]
pub trait HttpTransport {
    async fn get(&self, url: &str) -> Result<HttpReply, LookupError>;
}

pub struct HiveClient {
    client: Client,
    api_key: String,
}

impl HiveClient {
    /// Certificate verification is disabled so that self-signed and internal
    /// deployments can be queried.
    pub fn new(config: &Config) -> Result<Self, LookupError> {
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl HttpTransport for HiveClient {
    async fn get(&self, url: &str) -> Result<HttpReply, LookupError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("{} answered {}", url, status);

        Ok(HttpReply { status, body })
    }
}
