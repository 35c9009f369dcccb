use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::CatalogResource;
use crate::payroll::projector::{Projectable, SortValue};
use crate::utils::lenient;

/// A job within a section, with its grade and fixed allowances.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "jobId": 12,
        "sectionsId": 3,
        "jobName": "Operator",
        "grade": 4,
        "food": 650,
        "att_Bonus": 400
    })
)]
pub struct JobRef {
    #[serde(rename = "jobId", default, deserialize_with = "lenient::id")]
    pub id: Option<i64>,
    #[serde(rename = "sectionsId", default, deserialize_with = "lenient::id")]
    pub section_id: Option<i64>,
    #[serde(
        rename = "sectionsName",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::text"
    )]
    pub section_name: Option<String>,
    #[serde(rename = "jobName", default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub grade: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub food: Option<f64>,
    #[serde(
        rename = "att_Bonus",
        alias = "attBonus",
        default,
        deserialize_with = "lenient::number"
    )]
    pub attendance_bonus: Option<f64>,
}

/// Job-level attendance bonus default for `job_name`, zero when unknown.
pub fn attendance_default(jobs: &[JobRef], job_name: Option<&str>) -> f64 {
    job_name
        .and_then(|name| jobs.iter().find(|j| j.name.as_deref() == Some(name)))
        .and_then(|j| j.attendance_bonus)
        .unwrap_or(0.0)
}

impl Projectable for JobRef {
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
        self.name.as_deref()
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "jobId" => SortValue::number(self.id.map(|v| v as f64)),
            "sectionsId" => SortValue::number(self.section_id.map(|v| v as f64)),
            "sectionsName" => SortValue::text(self.section_name.as_deref()),
            "jobName" => SortValue::text(self.name.as_deref()),
            "grade" => SortValue::number(self.grade),
            "food" => SortValue::number(self.food),
            "att_Bonus" => SortValue::number(self.attendance_bonus),
            _ => None,
        }
    }
}

impl CatalogResource for JobRef {
    const LABEL: &'static str = "job";
    const READ: &'static str = "JReadInformation";
    const LIST_FIELD: &'static str = "jreadInformation";
    const CREATE: &'static str = "JCreateInformation";
    const UPDATE: &'static str = "JUpdateInformation";
    const DELETE: &'static str = "JDeleteInformation";

    fn prepare_create(&mut self) {
        // the remote assigns the identifier
        self.id = Some(0);
    }
}
