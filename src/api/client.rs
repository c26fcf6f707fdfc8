use super::models::*;
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait DomainsApiClient: Send + Sync {
    async fn get_domain(&self, domain: &str) -> Result<DomainDetail>;

    async fn record_add(&self, domain: &str, records: &[DnsRecord]) -> Result<()>;

    async fn record_get(
        &self,
        domain: &str,
        record_type: &str,
        name: &str,
    ) -> Result<Vec<DnsRecord>>;

    async fn record_replace_type_name(
        &self,
        domain: &str,
        record_type: &str,
        name: &str,
        records: &[DnsRecordCreateTypeName],
    ) -> Result<()>;

    async fn record_delete_type_name(
        &self,
        domain: &str,
        record_type: &str,
        name: &str,
    ) -> Result<()>;
}
