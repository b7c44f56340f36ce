use crate::config::ContentConfig;
use crate::domain::entry::{EntryCollection, EntryQuery};
use crate::domain::ports::ContentStore;
use crate::utils::error::{ContentError, Result};
use crate::utils::validation::Validate;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Contentful Content Delivery / Preview API client.
#[derive(Debug, Clone)]
pub struct DeliveryClient {
    client: Client,
    entries_url: String,
    access_token: String,
    locale: Option<String>,
}

/// Error body returned by the delivery API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl DeliveryClient {
    pub fn new(config: &ContentConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        let entries_url = format!(
            "{}/spaces/{}/environments/{}/entries",
            config.base_url(),
            config.space_id,
            config.environment
        );

        tracing::debug!(
            "Content client targets {} ({})",
            entries_url,
            if config.preview { "preview" } else { "delivery" }
        );

        Ok(Self {
            client: builder.build()?,
            entries_url,
            access_token: config.access_token()?.to_string(),
            locale: config.locale.clone(),
        })
    }

    pub fn entries_url(&self) -> &str {
        &self.entries_url
    }
}

#[async_trait]
impl ContentStore for DeliveryClient {
    async fn get_entries(&self, query: &EntryQuery) -> Result<EntryCollection> {
        let query = match (&query.locale, &self.locale) {
            (None, Some(locale)) => query.clone().locale(locale.clone()),
            _ => query.clone(),
        };

        tracing::debug!("Making API request to: {}", self.entries_url);
        let response = self
            .client
            .get(&self.entries_url)
            .bearer_auth(&self.access_token)
            .query(&query.to_params())
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });

            return Err(ContentError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        // a body that does not match the wire model is a data error, not a transport one
        let body = response.bytes().await?;
        Ok(serde_json::from_slice::<EntryCollection>(&body)?)
    }
}
