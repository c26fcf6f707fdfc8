//! Lifecycle of a single managed DNS record.
//!
//! A record is *bound* while it carries an id, and *unbound* once the id is
//! cleared (never created, deleted, or found missing on read). The id is the
//! `<domain>:<name>:<type>` triple from [`crate::identifier`].

use serde::{Deserialize, Serialize};

use crate::api::models::{DnsRecord, DnsRecordCreateTypeName};
use crate::api::DomainsApiClient;
use crate::error::{Error, Result};
use crate::identifier;

/// A record as the user declares it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSpec {
    pub domain: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

impl RecordSpec {
    pub fn id(&self) -> String {
        identifier::encode(&self.domain, &self.name, &self.record_type)
    }

    /// Rejects declarations that could never round-trip through an id.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("domain", &self.domain),
            ("name", &self.name),
            ("type", &self.record_type),
        ] {
            if value.is_empty() {
                return Err(Error::invalid_record(format!("`{field}` cannot be empty")));
            }
            if identifier::is_composite(value) {
                return Err(Error::invalid_record(format!(
                    "`{field}` cannot contain ':' ({value})"
                )));
            }
        }
        if self.data.is_empty() {
            return Err(Error::invalid_record("`data` cannot be empty"));
        }
        Ok(())
    }
}

/// Local view of a managed record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordState {
    id: Option<String>,
    domain: String,
    name: String,
    #[serde(rename = "type")]
    record_type: String,
    data: String,
    ttl: Option<u32>,
}

impl RecordState {
    /// Unbound state carrying a declaration, ready to be created.
    pub fn from_spec(spec: &RecordSpec) -> Self {
        Self {
            id: None,
            domain: spec.domain.clone(),
            name: spec.name.clone(),
            record_type: spec.record_type.clone(),
            data: spec.data.clone(),
            ttl: spec.ttl,
        }
    }

    /// State for a record already known to exist remotely.
    pub fn bound(spec: &RecordSpec) -> Self {
        let mut state = Self::from_spec(spec);
        state.id = Some(spec.id());
        state
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn is_bound(&self) -> bool {
        self.id.is_some()
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn ttl(&self) -> Option<u32> {
        self.ttl
    }

    pub fn set_data(&mut self, data: impl Into<String>) {
        self.data = data.into();
    }

    pub fn set_ttl(&mut self, ttl: Option<u32>) {
        self.ttl = ttl;
    }

    fn clear_id(&mut self) {
        self.id = None;
    }
}

/// Copies the remote attributes of `record` onto `state`. Domain and id stay.
pub fn hydrate(state: &mut RecordState, record: &DnsRecord) {
    state.data = record.data.clone();
    state.name = record.name.clone();
    state.record_type = record.r#type.clone();
    state.ttl = record.ttl;
}

/// What applying a declaration to the current state would do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanAction {
    Create,
    Update,
    Replace,
    NoOp,
}

/// Record lifecycle operations against the API.
pub struct RecordResource<'a, C: DomainsApiClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: DomainsApiClient + ?Sized> RecordResource<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn create(&self, state: &mut RecordState) -> Result<()> {
        let record =
            DnsRecord::new(&state.data, &state.name, &state.record_type).with_ttl(state.ttl);

        self.client
            .record_add(&state.domain, std::slice::from_ref(&record))
            .await?;

        let id = identifier::encode(&state.domain, &state.name, &state.record_type);
        log::info!("Created record {id}");
        state.id = Some(id);

        // Picks up server-side defaults such as ttl.
        self.read(state).await
    }

    pub async fn read(&self, state: &mut RecordState) -> Result<()> {
        let records = self
            .client
            .record_get(&state.domain, &state.record_type, &state.name)
            .await?;

        match records.first() {
            Some(record) => hydrate(state, record),
            None => {
                log::warn!(
                    "Record {} no longer exists, removing it from state",
                    state.id().unwrap_or_default()
                );
                state.clear_id();
            }
        }
        Ok(())
    }

    pub async fn update(&self, state: &mut RecordState, desired: &RecordSpec) -> Result<()> {
        if !state.is_bound() {
            return Err(Error::invalid_record(format!(
                "{} is not managed yet, create it before updating",
                desired.id()
            )));
        }
        ensure_same_identity(state, desired)?;

        let records = [DnsRecordCreateTypeName::new(&desired.data, desired.ttl)];
        self.client
            .record_replace_type_name(&state.domain, &state.record_type, &state.name, &records)
            .await?;

        log::info!("Updated record {}", state.id().unwrap_or_default());
        state.set_data(&desired.data);
        if desired.ttl.is_some() {
            state.set_ttl(desired.ttl);
        }

        self.read(state).await
    }

    pub async fn delete(&self, state: &mut RecordState) -> Result<()> {
        let result = self
            .client
            .record_delete_type_name(&state.domain, &state.record_type, &state.name)
            .await;

        match result {
            Ok(()) => log::info!("Deleted record {}", state.id().unwrap_or_default()),
            Err(err) if err.is_not_found() => {
                log::info!("Record {} was already gone", state.id().unwrap_or_default());
            }
            Err(err) => return Err(err),
        }

        state.clear_id();
        Ok(())
    }

    /// Adopts a record by id. A bare id without `:` is kept as-is for a
    /// later read to fill in.
    pub fn import(&self, raw_id: &str) -> Result<RecordState> {
        let mut state = RecordState {
            id: Some(raw_id.to_string()),
            ..RecordState::default()
        };

        if let Some((domain, name, record_type)) = identifier::decode(raw_id)? {
            state.domain = domain;
            state.name = name;
            state.record_type = record_type;
        }

        Ok(state)
    }
}

/// Classifies the change `desired` would make to `state`. A ttl left unset in
/// the declaration is server-computed and never counts as drift.
pub fn plan(state: &RecordState, desired: &RecordSpec) -> PlanAction {
    if !state.is_bound() {
        return PlanAction::Create;
    }
    if ensure_same_identity(state, desired).is_err() {
        return PlanAction::Replace;
    }

    let ttl_drift = desired.ttl.is_some() && desired.ttl != state.ttl;
    if state.data != desired.data || ttl_drift {
        PlanAction::Update
    } else {
        PlanAction::NoOp
    }
}

fn ensure_same_identity(state: &RecordState, desired: &RecordSpec) -> Result<()> {
    if state.domain != desired.domain {
        return Err(Error::RequiresReplacement { field: "domain" });
    }
    if state.name != desired.name {
        return Err(Error::RequiresReplacement { field: "name" });
    }
    if state.record_type != desired.record_type {
        return Err(Error::RequiresReplacement { field: "type" });
    }
    Ok(())
}
