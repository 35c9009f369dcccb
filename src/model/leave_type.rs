use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::CatalogResource;
use crate::payroll::projector::{Projectable, SortValue};
use crate::utils::lenient;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "id": 2, "status": "Casual Leave", "valid_days": 10 }))]
pub struct LeaveType {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub valid_days: Option<f64>,
}

impl Projectable for LeaveType {
    fn record_id(&self) -> Option<i64> {
        self.id
    }

    fn display_name(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "id" => SortValue::number(self.id.map(|v| v as f64)),
            "status" => SortValue::text(self.status.as_deref()),
            "valid_days" => SortValue::number(self.valid_days),
            _ => None,
        }
    }
}

impl CatalogResource for LeaveType {
    const LABEL: &'static str = "leave type";
    const READ: &'static str = "LVTReadInformation";
    const LIST_FIELD: &'static str = "lvtreadInformation";
    const CREATE: &'static str = "LVTCreateInformation";
    const UPDATE: &'static str = "LVTUpdateInformation";
    const DELETE: &'static str = "LVTDeleteInformation";

    fn prepare_create(&mut self) {
        self.id = Some(0);
    }
}
