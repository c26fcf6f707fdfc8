use anyhow::{Context, Result};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::{fs::File, io::Read, path::Path};

use crate::api::DomainsApiClient;
use crate::config::ProviderSettings;
use crate::resource::record::{plan, PlanAction, RecordResource, RecordSpec, RecordState};

/// A list of declared records, optionally with provider settings.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub provider: ProviderSettings,
    pub records: Vec<RecordSpec>,
}

impl Manifest {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)
            .with_context(|| format!("Failed to open manifest: {}", path.display()))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;

        serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse manifest: {}", path.display()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    pub id: String,
    /// `None` when the record failed before it could be planned
    pub action: Option<PlanAction>,
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct SyncReport {
    pub outcomes: Vec<SyncOutcome>,
}

impl SyncReport {
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.error.is_some()).count()
    }

    pub fn changed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.applied).count()
    }
}

/// Brings every declared record in line with the remote zone.
///
/// Missing records are created and drifted ones updated. Records whose
/// identity no longer matches are reported as `Replace` and left alone. One
/// failing record does not stop the rest.
pub async fn sync<C>(
    resource: &RecordResource<'_, C>,
    specs: &[RecordSpec],
    dry_run: bool,
) -> SyncReport
where
    C: DomainsApiClient + ?Sized,
{
    let mut report = SyncReport::default();

    for spec in specs {
        let id = spec.id();
        info!("Syncing record: {id}");

        let mut outcome = SyncOutcome {
            id: id.clone(),
            action: None,
            applied: false,
            error: None,
        };

        if let Err(e) = sync_one(resource, spec, dry_run, &mut outcome).await {
            if e.is_remote() {
                error!("Failed to sync record {id}: {e}");
            } else {
                error!("Skipping record {id}: {e}");
            }
            outcome.error = Some(e.to_string());
        }
        report.outcomes.push(outcome);
    }

    report
}

async fn sync_one<C>(
    resource: &RecordResource<'_, C>,
    spec: &RecordSpec,
    dry_run: bool,
    outcome: &mut SyncOutcome,
) -> crate::error::Result<()>
where
    C: DomainsApiClient + ?Sized,
{
    spec.validate()?;

    let mut state = RecordState::bound(spec);
    resource.read(&mut state).await?;

    let action = plan(&state, spec);
    outcome.action = Some(action);

    if action == PlanAction::Update {
        warn!("Drift on {}: {:?} -> {:?}", outcome.id, state.data(), spec.data);
    }

    match action {
        PlanAction::NoOp => {
            info!("Record already up to date");
            return Ok(());
        }
        PlanAction::Replace => {
            warn!(
                "Record {} differs in identity from the declaration, recreate it by hand",
                outcome.id
            );
            return Ok(());
        }
        PlanAction::Create | PlanAction::Update if dry_run => {
            info!("Dry run, would {action:?} {}", outcome.id);
            return Ok(());
        }
        PlanAction::Create => {
            let mut fresh = RecordState::from_spec(spec);
            resource.create(&mut fresh).await?;
        }
        PlanAction::Update => resource.update(&mut state, spec).await?,
    }

    outcome.applied = true;
    info!("Done.");
    Ok(())
}
