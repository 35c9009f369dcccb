use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::CatalogResource;
use crate::payroll::projector::{Projectable, SortValue};
use crate::utils::lenient;

/// Worker master data maintained on the worker catalog screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 17,
        "name": "Rahim Uddin",
        "sectionName": "Sewing",
        "jobName": "Operator",
        "joinDate": "2023-05-01",
        "cardNo": "1017",
        "bankAC": "01711000017",
        "grade": 4
    })
)]
#[serde(rename_all = "camelCase")]
pub struct WorkerProfile {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub section_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub job_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub join_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub card_no: Option<String>,
    #[serde(rename = "bankAC", alias = "bankAcc", default, deserialize_with = "lenient::text")]
    pub bank_account: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub grade: Option<f64>,
}

impl Projectable for WorkerProfile {
    fn record_id(&self) -> Option<i64> {
        self.id
    }

    fn display_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn section_name(&self) -> Option<&str> {
        self.section_name.as_deref()
    }

    fn job_name(&self) -> Option<&str> {
        self.job_name.as_deref()
    }

    fn card_no(&self) -> Option<&str> {
        self.card_no.as_deref()
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "id" => SortValue::number(self.id.map(|v| v as f64)),
            "name" => SortValue::text(self.name.as_deref()),
            "sectionName" => SortValue::text(self.section_name.as_deref()),
            "jobName" => SortValue::text(self.job_name.as_deref()),
            "joinDate" => SortValue::text(self.join_date.as_deref()),
            "cardNo" => SortValue::text(self.card_no.as_deref()),
            "bankAC" => SortValue::text(self.bank_account.as_deref()),
            "grade" => SortValue::number(self.grade),
            _ => None,
        }
    }
}

impl CatalogResource for WorkerProfile {
    const LABEL: &'static str = "worker";
    const READ: &'static str = "WReadInformation";
    const LIST_FIELD: &'static str = "wreadInformation";
    const CREATE: &'static str = "WCreateInformation";
    const UPDATE: &'static str = "WUpdateInformation";
    const DELETE: &'static str = "WDeleteInformation";

    fn prepare_create(&mut self) {
        self.id = None;
    }
}
