pub mod bonus_type;
pub mod employee;
pub mod job;
pub mod leave_type;
pub mod salary;
pub mod section;
pub mod worker;
pub mod worker_profile;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::payroll::projector::Projectable;

/// A master-data record maintained through the remote `*Information`
/// endpoints: read all, create, update and delete by `{ id }`.
pub trait CatalogResource: Serialize + DeserializeOwned + Projectable + Send + 'static {
    /// Human-readable name used in log lines and messages.
    const LABEL: &'static str;
    const READ: &'static str;
    /// Array field of the read envelope.
    const LIST_FIELD: &'static str;
    const CREATE: &'static str;
    const UPDATE: &'static str;
    const DELETE: &'static str;

    /// Adjust a record before it is sent for creation.
    fn prepare_create(&mut self) {}
}
