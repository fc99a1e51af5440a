use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use punchsync_core::config::UpstreamConfig;
use punchsync_core::RawPunch;

use crate::envelope;
use crate::error::{FetchError, Result};
use crate::source::{PunchQuery, PunchSource};

/// Production [`PunchSource`]: GET against the attendance API with basic
/// auth and a bounded timeout.
pub struct HttpPunchSource {
    client: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl HttpPunchSource {
    /// Build the source. The timeout is set once on the client — a window
    /// fetch either completes within it or the whole sync attempt fails.
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }
}

#[async_trait]
impl PunchSource for HttpPunchSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, query: &PunchQuery) -> Result<Vec<RawPunch>> {
        debug!(
            empcode = %query.emp_code,
            from = %query.from,
            to = %query.to,
            "requesting punch window"
        );

        let response = self
            .client
            .get(&self.base_url)
            .basic_auth(&self.username, Some(&self.password))
            .query(&[
                ("Empcode", query.emp_code.as_str()),
                ("FromDate", query.from.as_str()),
                ("ToDate", query.to.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let records = envelope::extract_records(&body)?;
        debug!(count = records.len(), "upstream returned records");
        Ok(records.iter().map(envelope::parse_record).collect())
    }
}
