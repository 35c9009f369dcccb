use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use utoipa::ToSchema;

use crate::model::bonus_type::bonus_period;
use crate::model::worker::WorkerRecord;
use crate::payroll::calculator::{self, LeaveDays, LineFigures, Totals, whole_days};
use crate::payroll::month;
use crate::payroll::overrides::{OverrideField, OverrideStore};

/// The four payroll screens of the console.
#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ScreenKind {
    Bonus,
    Overtime,
    WageSlip,
    Wages,
}

const BONUS_FIELDS: &[OverrideField] = &[OverrideField::Deduction];

const OVERTIME_FIELDS: &[OverrideField] = &[
    OverrideField::Deduction,
    OverrideField::Hours,
    OverrideField::ExtraHours,
];

const WAGE_SLIP_FIELDS: &[OverrideField] =
    &[OverrideField::Deduction, OverrideField::AttendanceBonus];

const WAGES_FIELDS: &[OverrideField] = &[
    OverrideField::Deduction,
    OverrideField::Bonus,
    OverrideField::WorkingDays,
    OverrideField::FestiveHolidays,
    OverrideField::Weekends,
    OverrideField::EarnedLeave,
    OverrideField::CasualLeave,
    OverrideField::SickLeave,
    OverrideField::AbsentDays,
    OverrideField::Other,
    OverrideField::LeaveWithoutPay,
];

impl ScreenKind {
    /// Remote fetch-by-section endpoint.
    pub fn fetch_endpoint(self) -> &'static str {
        match self {
            ScreenKind::Bonus => "BSalSearchBySection",
            ScreenKind::Overtime => "OTSearchBySection",
            ScreenKind::WageSlip => "WSlipReadBySection",
            ScreenKind::Wages => "WSearchInformationBySection",
        }
    }

    /// Array field of the fetch envelope.
    pub fn list_field(self) -> &'static str {
        match self {
            ScreenKind::Bonus => "bsalreadInformationBySection",
            ScreenKind::Overtime => "otreadInformationBySection",
            ScreenKind::WageSlip => "wslipreadInformationBySection",
            ScreenKind::Wages => "wsearchInformationBySection",
        }
    }

    pub fn update_endpoint(self) -> &'static str {
        match self {
            ScreenKind::Bonus => "BSalUpdateInformation",
            ScreenKind::Overtime => "OTUpdateInformation",
            ScreenKind::WageSlip => "WagSlipUpdateInformation",
            ScreenKind::Wages => "WagUpdateInformation",
        }
    }

    pub fn pdf_endpoint(self) -> &'static str {
        match self {
            ScreenKind::Bonus => "generatebonuspdf",
            ScreenKind::Overtime => "generateOTpdf",
            ScreenKind::WageSlip => "generatewslippdf",
            ScreenKind::Wages => "generatesalarypdf",
        }
    }

    /// Prefix of the download name used when the server suggests none.
    pub fn pdf_prefix(self) -> &'static str {
        match self {
            ScreenKind::Bonus => "BonusReport",
            ScreenKind::Overtime => "OTReport",
            ScreenKind::WageSlip => "Wages_Slip_Report",
            ScreenKind::Wages => "Salary_Report",
        }
    }

    pub fn editable_fields(self) -> &'static [OverrideField] {
        match self {
            ScreenKind::Bonus => BONUS_FIELDS,
            ScreenKind::Overtime => OVERTIME_FIELDS,
            ScreenKind::WageSlip => WAGE_SLIP_FIELDS,
            ScreenKind::Wages => WAGES_FIELDS,
        }
    }

    pub fn is_editable(self, field: OverrideField) -> bool {
        self.editable_fields().contains(&field)
    }

    /// Value sent as `date` with fetch and print requests. The bonus screen
    /// is keyed by bonus type and month label, the others by month token.
    pub fn date_key(self, month_label: Option<&str>, bonus_type: Option<&str>) -> Option<String> {
        match self {
            ScreenKind::Bonus => Some(bonus_period(bonus_type, month_label)),
            _ => month_label
                .and_then(month::encode)
                .map(|token| token.to_string()),
        }
    }

    /// Computed figures of one row, overrides taking precedence over server
    /// values.
    pub fn line(self, record: &WorkerRecord, overrides: &OverrideStore) -> LineFigures {
        let value = |field| effective(record, overrides, field);
        let deduction = value(OverrideField::Deduction);

        match self {
            ScreenKind::Bonus => {
                let figures = calculator::bonus(record.gross, record.bonus, deduction);
                LineFigures {
                    gross: figures.gross,
                    deduction,
                    net: figures.net,
                    bonus: Some(record.bonus.unwrap_or(0.0)),
                    ..Default::default()
                }
            }
            ScreenKind::Overtime => {
                let hours = value(OverrideField::Hours);
                let figures =
                    calculator::overtime(record.salary.unwrap_or(0.0), hours, deduction);
                LineFigures {
                    gross: figures.gross,
                    deduction,
                    net: figures.net,
                    hours: Some(hours),
                    extra_hours: Some(value(OverrideField::ExtraHours)),
                    ..Default::default()
                }
            }
            ScreenKind::WageSlip => {
                let gross_wages = record.gross_wages.unwrap_or(0.0);
                let attendance_bonus = value(OverrideField::AttendanceBonus);
                let figures = calculator::wage_slip(
                    gross_wages,
                    deduction,
                    attendance_bonus,
                    record.overtime_amount.unwrap_or(0.0),
                );
                LineFigures {
                    gross: gross_wages,
                    deduction,
                    net: figures.net_pay,
                    attendance_bonus: Some(attendance_bonus),
                    net_wages: Some(figures.net_wages),
                    ..Default::default()
                }
            }
            ScreenKind::Wages => {
                let bonus = value(OverrideField::Bonus);
                let figures = calculator::monthly(record.salary.unwrap_or(0.0), bonus, deduction);
                LineFigures {
                    gross: figures.gross,
                    deduction,
                    net: figures.net,
                    bonus: Some(bonus),
                    total_days: Some(leave_days(record, overrides).total_days()),
                    ..Default::default()
                }
            }
        }
    }
}

/// Override when one was seeded or entered, else the server value, else 0.
pub fn effective(record: &WorkerRecord, overrides: &OverrideStore, field: OverrideField) -> f64 {
    match record.valid_id() {
        Some(id) if overrides.contains(id, field) => overrides.get(id, field),
        _ => record.server_value(field).unwrap_or(0.0),
    }
}

pub fn leave_days(record: &WorkerRecord, overrides: &OverrideStore) -> LeaveDays {
    let day = |field| whole_days(effective(record, overrides, field));
    LeaveDays {
        working_days: day(OverrideField::WorkingDays),
        festive_holidays: day(OverrideField::FestiveHolidays),
        weekends: day(OverrideField::Weekends),
        earned_leave: day(OverrideField::EarnedLeave),
        casual_leave: day(OverrideField::CasualLeave),
        sick_leave: day(OverrideField::SickLeave),
        absent_days: day(OverrideField::AbsentDays),
    }
}

/// A fetched worker with the figures computed for the current screen.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScreenRow {
    pub worker: WorkerRecord,
    pub figures: LineFigures,
    /// Attendance bonus toggle (wage slip only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance_applied: Option<bool>,
}

pub fn build_rows<'a, I>(
    kind: ScreenKind,
    records: I,
    overrides: &OverrideStore,
) -> (Vec<ScreenRow>, Totals)
where
    I: IntoIterator<Item = &'a WorkerRecord>,
{
    let mut totals = Totals::default();
    let mut eligible = 0;
    let mut rows = Vec::new();

    for record in records {
        let figures = kind.line(record, overrides);
        totals.add(&figures);
        if record.act_re == Some(0.0) {
            eligible += 1;
        }

        let attendance_applied = (kind == ScreenKind::WageSlip).then(|| {
            record
                .valid_id()
                .map(|id| overrides.is_attendance_applied(id))
                .unwrap_or(false)
        });

        rows.push(ScreenRow {
            worker: record.clone(),
            figures,
            attendance_applied,
        });
    }

    if kind == ScreenKind::Wages {
        totals.attendance_eligible = Some(eligible);
    }
    (rows, totals)
}
