use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::CatalogResource;
use crate::payroll::projector::{Projectable, SortValue};
use crate::utils::lenient;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "empId": 1,
        "empName": "Karim Ahmed",
        "sectionName": "Accounts",
        "jobname": "Officer",
        "joinDate": "2024-01-01",
        "cardNo": "E-001",
        "bankAcc": "01711000001"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    #[serde(
        rename = "empId",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::id"
    )]
    pub id: Option<i64>,

    #[schema(example = "Karim Ahmed")]
    #[serde(rename = "empName", default, deserialize_with = "lenient::text")]
    pub name: Option<String>,

    #[schema(example = "Accounts")]
    #[serde(rename = "sectionName", default, deserialize_with = "lenient::text")]
    pub section_name: Option<String>,

    /// Lower-case `n` on the wire.
    #[schema(example = "Officer")]
    #[serde(rename = "jobname", alias = "jobName", default, deserialize_with = "lenient::text")]
    pub job_name: Option<String>,

    #[schema(example = "2024-01-01", format = "date")]
    #[serde(rename = "joinDate", default, deserialize_with = "lenient::text")]
    pub join_date: Option<String>,

    #[schema(example = "E-001")]
    #[serde(rename = "cardNo", default, deserialize_with = "lenient::text")]
    pub card_no: Option<String>,

    #[schema(example = "01711000001", nullable = true)]
    #[serde(
        rename = "bankAcc",
        alias = "bankAC",
        default,
        deserialize_with = "lenient::text"
    )]
    pub bank_account: Option<String>,
}

impl Projectable for Employee {
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
            "empId" => SortValue::number(self.id.map(|v| v as f64)),
            "empName" => SortValue::text(self.name.as_deref()),
            "sectionName" => SortValue::text(self.section_name.as_deref()),
            "jobname" => SortValue::text(self.job_name.as_deref()),
            "joinDate" => SortValue::text(self.join_date.as_deref()),
            "cardNo" => SortValue::text(self.card_no.as_deref()),
            "bankAcc" => SortValue::text(self.bank_account.as_deref()),
            _ => None,
        }
    }
}

impl CatalogResource for Employee {
    const LABEL: &'static str = "employee";
    const READ: &'static str = "EReadInformation";
    const LIST_FIELD: &'static str = "ereadInformation";
    const CREATE: &'static str = "ECreateInformation";
    const UPDATE: &'static str = "EUpdateInformation";
    const DELETE: &'static str = "EDeleteInformation";

    fn prepare_create(&mut self) {
        self.id = None;
    }
}
