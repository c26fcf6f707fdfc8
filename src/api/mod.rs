pub mod client;
pub mod godaddy;
pub mod models;

pub use client::DomainsApiClient;
pub use godaddy::GoDaddyClient;
