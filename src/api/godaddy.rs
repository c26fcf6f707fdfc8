use std::fmt;
use std::time::Duration;

use super::{client::DomainsApiClient, models::*};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::RequestBuilder;
use urlencoding::encode;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub struct GoDaddyClient {
    client: reqwest::Client,
    base_url: String,
    // "sso-key <key>:<secret>", never logged
    authorization: String,
}

#[async_trait]
impl DomainsApiClient for GoDaddyClient {
    async fn get_domain(&self, domain: &str) -> Result<DomainDetail> {
        let url = format!("{}/v1/domains/{}", self.base_url, encode(domain));
        let text = self.execute(self.client.get(&url), "GET", &url).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn record_add(&self, domain: &str, records: &[DnsRecord]) -> Result<()> {
        let url = format!("{}/v1/domains/{}/records", self.base_url, encode(domain));
        self.execute(self.client.patch(&url).json(records), "PATCH", &url)
            .await?;
        Ok(())
    }

    async fn record_get(
        &self,
        domain: &str,
        record_type: &str,
        name: &str,
    ) -> Result<Vec<DnsRecord>> {
        let url = self.type_name_url(domain, record_type, name);
        let text = self.execute(self.client.get(&url), "GET", &url).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn record_replace_type_name(
        &self,
        domain: &str,
        record_type: &str,
        name: &str,
        records: &[DnsRecordCreateTypeName],
    ) -> Result<()> {
        let url = self.type_name_url(domain, record_type, name);
        self.execute(self.client.put(&url).json(records), "PUT", &url)
            .await?;
        Ok(())
    }

    async fn record_delete_type_name(
        &self,
        domain: &str,
        record_type: &str,
        name: &str,
    ) -> Result<()> {
        let url = self.type_name_url(domain, record_type, name);
        self.execute(self.client.delete(&url), "DELETE", &url).await?;
        Ok(())
    }
}

impl GoDaddyClient {
    pub fn new(host: &str, key: &str, secret: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: host.trim_end_matches('/').to_string(),
            authorization: format!("sso-key {key}:{secret}"),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn type_name_url(&self, domain: &str, record_type: &str, name: &str) -> String {
        format!(
            "{}/v1/domains/{}/records/{}/{}",
            self.base_url,
            encode(domain),
            encode(record_type),
            encode(name)
        )
    }

    async fn execute(&self, request: RequestBuilder, method: &str, url: &str) -> Result<String> {
        log::debug!("[godaddy] {method} {url}");

        let response = request
            .header(AUTHORIZATION, self.authorization.as_str())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        log::debug!("[godaddy] Response Status: {}", status.as_u16());

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &text));
        }

        Ok(text)
    }
}

fn api_error(status: u16, body: &str) -> Error {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => Error::Api {
            status,
            code: parsed.code,
            message: parsed.message.unwrap_or_else(|| body.to_string()),
        },
        Err(_) => Error::Api {
            status,
            code: None,
            message: body.to_string(),
        },
    }
}

impl fmt::Debug for GoDaddyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoDaddyClient")
            .field("base_url", &self.base_url)
            .field("authorization", &"<REDACTED>")
            .finish()
    }
}
