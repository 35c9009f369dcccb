use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::payroll::projector::{Projectable, SortValue};
use crate::utils::lenient;

pub const SALARY_READ: &str = "SReadInformation";
pub const SALARY_LIST_FIELD: &str = "sreadInformation";
pub const SALARY_UPDATE: &str = "SUpdateInformation";

/// Current salary of one worker.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalaryEntry {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub section_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub job_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub card_no: Option<String>,
    #[serde(rename = "salary_Amount", default, deserialize_with = "lenient::number")]
    pub salary_amount: Option<f64>,
    #[serde(rename = "update_date", default, deserialize_with = "lenient::text")]
    pub update_date: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SalaryChange {
    #[schema(example = 17)]
    pub id: i64,
    /// Operator input; blank or unparsable counts as zero.
    #[schema(example = "21500")]
    pub salary_amount: String,
}

/// Body of the remote salary update.
#[derive(Debug, Serialize)]
pub struct SalaryUpdate {
    pub id: i64,
    #[serde(rename = "salary_Amount")]
    pub salary_amount: f64,
    /// `YYYY-MM-DD`
    pub update_date: String,
}

impl SalaryUpdate {
    pub fn new(id: i64, salary_amount: f64, today: NaiveDate) -> Self {
        Self {
            id,
            salary_amount,
            update_date: today.format("%Y-%m-%d").to_string(),
        }
    }
}

impl Projectable for SalaryEntry {
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
            "cardNo" => SortValue::text(self.card_no.as_deref()),
            // the salary column is keyed "salary" on screen
            "salary" | "salary_Amount" => SortValue::number(self.salary_amount),
            "update_date" => SortValue::text(self.update_date.as_deref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_carries_iso_date() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        let body = serde_json::to_value(SalaryUpdate::new(17, 21500.0, today)).unwrap();
        assert_eq!(
            body,
            json!({ "id": 17, "salary_Amount": 21500.0, "update_date": "2025-03-09" })
        );
    }

    #[test]
    fn null_salary_is_absent() {
        let entry: SalaryEntry =
            serde_json::from_value(json!({ "id": 1, "salary_Amount": null })).unwrap();
        assert_eq!(entry.salary_amount, None);
        assert!(entry.sort_value("salary").is_none());
    }
}
