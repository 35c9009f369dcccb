use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::payroll::overrides::OverrideField;
use crate::payroll::projector::{Projectable, SortValue};
use crate::utils::lenient;

/// One worker row as returned by the payroll screens' by-section fetches.
///
/// The remote endpoints disagree on field names (`bankAcc` vs `bankAC`,
/// `ot_Amount` vs `oT_Amount`, ...); the aliases below fold them into one
/// shape so nothing downstream has to know.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": 17,
        "name": "Rahim Uddin",
        "sectionName": "Sewing",
        "jobName": "Operator",
        "cardNo": "1017",
        "bankAccount": "01711000017",
        "salary": 20800.0,
        "hours": 10.0
    })
)]
pub struct WorkerRecord {
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
    #[serde(default, alias = "bankAcc", alias = "bankAC", deserialize_with = "lenient::text")]
    pub bank_account: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub code: Option<String>,

    #[serde(default, deserialize_with = "lenient::number")]
    pub salary: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub bonus: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub gross: Option<f64>,
    #[serde(default, alias = "deduct", deserialize_with = "lenient::number")]
    pub deduction: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub net: Option<f64>,

    // overtime
    #[serde(default, alias = "hour", deserialize_with = "lenient::number")]
    pub hours: Option<f64>,
    #[serde(default, alias = "exhour", deserialize_with = "lenient::number")]
    pub extra_hours: Option<f64>,

    // wage slip
    #[serde(default, alias = "ot_Amount", alias = "oT_Amount", deserialize_with = "lenient::number")]
    pub overtime_amount: Option<f64>,
    #[serde(default, alias = "ot_Hours", alias = "oT_Hours", deserialize_with = "lenient::number")]
    pub overtime_hours: Option<f64>,
    #[serde(default, alias = "att_Bonus", alias = "attBonus", deserialize_with = "lenient::number")]
    pub attendance_bonus: Option<f64>,
    #[serde(default, alias = "gross_Wages", deserialize_with = "lenient::number")]
    pub gross_wages: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub basic: Option<f64>,
    #[serde(default, alias = "hr", deserialize_with = "lenient::number")]
    pub house_rent: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub medical: Option<f64>,
    #[serde(default, alias = "conv", deserialize_with = "lenient::number")]
    pub conveyance: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub food: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub wages: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub days: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub grade: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub rate: Option<f64>,

    // monthly wages
    #[serde(default, alias = "work_Day", deserialize_with = "lenient::number")]
    pub working_days: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub other: Option<f64>,
    #[serde(default, alias = "festH", deserialize_with = "lenient::number")]
    pub festive_holidays: Option<f64>,
    #[serde(default, alias = "we", deserialize_with = "lenient::number")]
    pub weekends: Option<f64>,
    #[serde(default, alias = "el", deserialize_with = "lenient::number")]
    pub earned_leave: Option<f64>,
    #[serde(default, alias = "cl", deserialize_with = "lenient::number")]
    pub casual_leave: Option<f64>,
    #[serde(default, alias = "sl", deserialize_with = "lenient::number")]
    pub sick_leave: Option<f64>,
    #[serde(default, alias = "absent", deserialize_with = "lenient::number")]
    pub absent_days: Option<f64>,
    #[serde(default, alias = "tDays", deserialize_with = "lenient::number")]
    pub total_days: Option<f64>,
    #[serde(default, alias = "lwp", deserialize_with = "lenient::number")]
    pub leave_without_pay: Option<f64>,
    #[serde(default, alias = "acT_RE", deserialize_with = "lenient::number")]
    pub act_re: Option<f64>,
}

impl WorkerRecord {
    /// Identifier usable for an update; zero and negatives do not count.
    pub fn valid_id(&self) -> Option<i64> {
        self.id.filter(|id| *id > 0)
    }

    pub fn name_or_unknown(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }

    /// Server-provided value an override starts from.
    pub fn server_value(&self, field: OverrideField) -> Option<f64> {
        match field {
            OverrideField::Deduction => self.deduction,
            OverrideField::Hours => self.hours,
            OverrideField::ExtraHours => self.extra_hours,
            OverrideField::AttendanceBonus => self.attendance_bonus,
            OverrideField::Bonus => self.bonus,
            OverrideField::WorkingDays => self.working_days,
            OverrideField::FestiveHolidays => self.festive_holidays,
            OverrideField::Weekends => self.weekends,
            OverrideField::EarnedLeave => self.earned_leave,
            OverrideField::CasualLeave => self.casual_leave,
            OverrideField::SickLeave => self.sick_leave,
            OverrideField::AbsentDays => self.absent_days,
            OverrideField::Other => self.other,
            OverrideField::LeaveWithoutPay => self.leave_without_pay,
        }
    }

    fn numeric_column(&self, key: &str) -> Option<f64> {
        match key {
            "id" => self.id.map(|id| id as f64),
            "salary" => self.salary,
            "bonus" => self.bonus,
            "gross" => self.gross,
            "deduction" => self.deduction,
            "net" => self.net,
            "hours" => self.hours,
            "extraHours" => self.extra_hours,
            "overtimeAmount" => self.overtime_amount,
            "overtimeHours" => self.overtime_hours,
            "attendanceBonus" => self.attendance_bonus,
            "grossWages" => self.gross_wages,
            "basic" => self.basic,
            "wages" => self.wages,
            "grade" => self.grade,
            "workingDays" => self.working_days,
            "totalDays" => self.total_days,
            _ => None,
        }
    }
}

impl Projectable for WorkerRecord {
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
            "name" => SortValue::text(self.name.as_deref()),
            "sectionName" => SortValue::text(self.section_name.as_deref()),
            "jobName" => SortValue::text(self.job_name.as_deref()),
            "cardNo" => SortValue::text(self.card_no.as_deref()),
            "bankAccount" => SortValue::text(self.bank_account.as_deref()),
            other => SortValue::number(self.numeric_column(other)),
        }
    }
}
