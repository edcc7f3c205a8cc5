use crate::domain::model::NormalizedRecord;
use crate::domain::ports::SongSink;
use crate::utils::error::{ImportError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

// Bounded so one stuck insert cannot hang the whole batch.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Insert-only client for the Supabase PostgREST endpoint.
pub struct SupabaseSink {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseSink {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl SongSink for SupabaseSink {
    async fn insert(&self, table: &str, record: &NormalizedRecord) -> Result<()> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = response.text().await.unwrap_or_default();
        Err(ImportError::SinkError {
            status: status.as_u16(),
            message,
        })
    }
}
