//! Request bodies sent to the remote payroll API.

use serde::Serialize;

use crate::model::worker::WorkerRecord;
use crate::payroll::calculator::whole_days;
use crate::payroll::overrides::{OverrideField, OverrideStore, WorkerId};
use crate::payroll::screen::{ScreenKind, effective, leave_days};

/// Body of the by-section fetch and the PDF calls.
#[derive(Debug, Clone, Serialize)]
pub struct SectionQuery {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Body of the delete calls.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct IdRequest {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusUpdate {
    pub id: WorkerId,
    pub name: String,
    pub section_name: String,
    pub job_name: String,
    #[serde(rename = "bType")]
    pub bonus_period: String,
    pub card_no: String,
    #[serde(rename = "bankAC")]
    pub bank_account: String,
    pub bonus: f64,
    pub gross: f64,
    pub net: f64,
    pub deduct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeUpdate {
    pub id: WorkerId,
    pub name: String,
    pub section_name: String,
    pub job_name: String,
    pub month: String,
    pub card_no: String,
    pub hour: f64,
    pub exhour: f64,
    #[serde(rename = "bankAC")]
    pub bank_account: String,
    pub bonus: f64,
    pub gross: f64,
    #[serde(rename = "net_OT")]
    pub net: f64,
    pub deduct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WageSlipUpdate {
    pub id: WorkerId,
    pub name: String,
    pub section_name: String,
    pub job_name: String,
    pub month: String,
    pub card_no: String,
    pub basic: f64,
    pub hr: f64,
    pub medical: f64,
    pub conv: f64,
    pub food: f64,
    pub wages: f64,
    pub days: f64,
    pub grade: f64,
    #[serde(rename = "ot_Amount")]
    pub overtime_amount: f64,
    #[serde(rename = "ot_Hours")]
    pub overtime_hours: f64,
    pub rate: f64,
    #[serde(rename = "bankAC")]
    pub bank_account: String,
    #[serde(rename = "att_Bonus")]
    pub attendance_bonus: f64,
    #[serde(rename = "gross_Wages")]
    pub gross_wages: f64,
    #[serde(rename = "net_Wages")]
    pub net_wages: f64,
    #[serde(rename = "net_Pay")]
    pub net_pay: f64,
    pub deduct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WagesUpdate {
    pub id: WorkerId,
    #[serde(rename = "salaryAmt")]
    pub salary_amount: f64,
    #[serde(rename = "work_Day")]
    pub working_days: i64,
    pub other: f64,
    #[serde(rename = "festH")]
    pub festive_holidays: i64,
    #[serde(rename = "we")]
    pub weekends: i64,
    #[serde(rename = "sl")]
    pub sick_leave: i64,
    #[serde(rename = "cl")]
    pub casual_leave: i64,
    #[serde(rename = "el")]
    pub earned_leave: i64,
    #[serde(rename = "absent")]
    pub absent_days: i64,
    #[serde(rename = "tdays")]
    pub total_days: i64,
    pub bonus: f64,
    #[serde(rename = "lwp")]
    pub leave_without_pay: i64,
    pub gross: f64,
    pub net: f64,
    pub deduct: f64,
    pub month: String,
}

/// Full row payload of a screen's update endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UpdatePayload {
    Bonus(BonusUpdate),
    Overtime(OvertimeUpdate),
    WageSlip(WageSlipUpdate),
    Wages(WagesUpdate),
}

/// Build the update body for one worker from its fetched record and the
/// current overrides. `section` fills in a missing section name, `date` is
/// the screen's date key (bonus period or month token).
pub fn build_update(
    kind: ScreenKind,
    id: WorkerId,
    record: &WorkerRecord,
    overrides: &OverrideStore,
    section: &str,
    date: &str,
) -> UpdatePayload {
    let line = kind.line(record, overrides);
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    let number = |value: Option<f64>| value.unwrap_or(0.0);
    let section_name = record
        .section_name
        .clone()
        .unwrap_or_else(|| section.to_string());

    match kind {
        ScreenKind::Bonus => UpdatePayload::Bonus(BonusUpdate {
            id,
            name: text(&record.name),
            section_name,
            job_name: text(&record.job_name),
            bonus_period: date.to_string(),
            card_no: text(&record.card_no),
            bank_account: text(&record.bank_account),
            bonus: line.gross,
            gross: line.gross,
            net: line.net,
            deduct: line.deduction,
        }),
        ScreenKind::Overtime => UpdatePayload::Overtime(OvertimeUpdate {
            id,
            name: text(&record.name),
            section_name,
            job_name: text(&record.job_name),
            month: date.to_string(),
            card_no: text(&record.card_no),
            hour: line.hours.unwrap_or(0.0),
            exhour: line.extra_hours.unwrap_or(0.0),
            bank_account: text(&record.bank_account),
            // overtime gross is also booked as the row's bonus amount
            bonus: line.gross,
            gross: line.gross,
            net: line.net,
            deduct: line.deduction,
        }),
        ScreenKind::WageSlip => UpdatePayload::WageSlip(WageSlipUpdate {
            id,
            name: text(&record.name),
            section_name,
            job_name: text(&record.job_name),
            month: date.to_string(),
            card_no: text(&record.card_no),
            basic: number(record.basic),
            hr: number(record.house_rent),
            medical: number(record.medical),
            conv: number(record.conveyance),
            food: number(record.food),
            wages: number(record.wages),
            days: number(record.days),
            grade: number(record.grade),
            overtime_amount: number(record.overtime_amount),
            overtime_hours: number(record.overtime_hours),
            rate: number(record.rate),
            bank_account: text(&record.bank_account),
            attendance_bonus: line.attendance_bonus.unwrap_or(0.0),
            gross_wages: line.gross,
            net_wages: line.net_wages.unwrap_or(0.0),
            net_pay: line.net,
            deduct: line.deduction,
        }),
        ScreenKind::Wages => {
            let days = leave_days(record, overrides);
            UpdatePayload::Wages(WagesUpdate {
                id,
                salary_amount: number(record.salary),
                working_days: days.working_days,
                other: effective(record, overrides, OverrideField::Other),
                festive_holidays: days.festive_holidays,
                weekends: days.weekends,
                sick_leave: days.sick_leave,
                casual_leave: days.casual_leave,
                earned_leave: days.earned_leave,
                absent_days: days.absent_days,
                total_days: days.total_days(),
                bonus: line.bonus.unwrap_or(0.0),
                leave_without_pay: whole_days(effective(
                    record,
                    overrides,
                    OverrideField::LeaveWithoutPay,
                )),
                gross: line.gross,
                net: line.net,
                deduct: line.deduction,
                month: date.to_string(),
            })
        }
    }
}
