pub mod domain;
pub mod record;

pub use domain::{DomainDataSource, DomainSummary};
pub use record::{plan, PlanAction, RecordResource, RecordSpec, RecordState};
