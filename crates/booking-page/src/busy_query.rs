//! The busy-interval query service and its HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use slot_engine::{BusyInterval, BusyResponse, DayRange};

use crate::config::ApiConfig;
use crate::error::BusyQueryError;

/// Returns the host's busy intervals overlapping a day range.
#[async_trait]
pub trait BusyQuery {
    async fn busy(&self, host: &str, range: DayRange) -> Result<Vec<BusyInterval>, BusyQueryError>;
}

/// `GET {base_url}/availability/{host}?dateFrom=..&dateTo=..`
pub struct HttpBusyQuery {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBusyQuery {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BusyQueryError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn from_config(api: &ApiConfig) -> Result<Self, BusyQueryError> {
        Self::new(api.base_url.clone(), api.timeout())
    }

    fn url(&self, host: &str) -> String {
        format!(
            "{}/availability/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(host)
        )
    }
}

#[async_trait]
impl BusyQuery for HttpBusyQuery {
    async fn busy(&self, host: &str, range: DayRange) -> Result<Vec<BusyInterval>, BusyQueryError> {
        let url = self.url(host);
        let date_from = range.date_from();
        let date_to = range.date_to();

        tracing::info!("Fetching busy intervals for {} from {} to {}", host, date_from, date_to);

        let response = self
            .client
            .get(&url)
            .query(&[("dateFrom", date_from.as_str()), ("dateTo", date_to.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Availability query failed. Status: {}, Body: {}", status, body);
            return Err(BusyQueryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let busy = BusyResponse::from_json(&body)?.into_intervals();

        tracing::info!("Fetched {} busy intervals for {}", busy.len(), host);
        Ok(busy)
    }
}
