use serde::Serialize;

use crate::api::DomainsApiClient;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainSummary {
    /// `domain_id` rendered as a string
    pub id: String,
    pub domain_id: u64,
    pub domain: String,
}

/// Read-only lookup of a domain's details.
pub struct DomainDataSource<'a, C: DomainsApiClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: DomainsApiClient + ?Sized> DomainDataSource<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn read(&self, domain: &str) -> Result<DomainSummary> {
        let detail = self.client.get_domain(domain).await?;
        log::debug!("Domain {} has id {}", detail.domain, detail.domain_id);

        Ok(DomainSummary {
            id: detail.domain_id.to_string(),
            domain_id: detail.domain_id,
            domain: detail.domain,
        })
    }
}
