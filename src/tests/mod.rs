mod config;
mod identifier;

use crate::api::models::*;
use crate::api::DomainsApiClient;
use crate::error::{Error, Result};
use async_trait::async_trait;
use mockall::mock;

// Mock the GoDaddy Domains API
mock! {
    pub DomainsApi {}

    #[async_trait]
    impl DomainsApiClient for DomainsApi {
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
}

fn dns_record(data: &str, name: &str, r#type: &str, ttl: u32) -> DnsRecord {
    DnsRecord::new(data, name, r#type).with_ttl(Some(ttl))
}

fn api_error(status: u16) -> Error {
    Error::Api {
        status,
        code: None,
        message: format!("HTTP {status}"),
    }
}
