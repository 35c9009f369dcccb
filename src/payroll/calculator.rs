//! Per-row payroll arithmetic for the bonus, overtime, wage slip and monthly
//! wages screens. Everything is plain `f64`; absent inputs are zero. These
//! are previews, the remote ledger is authoritative.

use serde::Serialize;
use utoipa::ToSchema;

/// Standard monthly hours the salary is divided by to get an hourly rate.
pub const STANDARD_MONTHLY_HOURS: f64 = 208.0;

/// Overtime hours are paid at twice the hourly rate.
pub const OVERTIME_RATE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct GrossNet {
    pub gross: f64,
    pub net: f64,
}

/// Gross is the server's gross when present, otherwise its bonus amount.
pub fn bonus(gross: Option<f64>, bonus: Option<f64>, deduction: f64) -> GrossNet {
    let gross = gross.or(bonus).unwrap_or(0.0);
    GrossNet {
        gross,
        net: gross - deduction,
    }
}

pub fn overtime_gross(salary: f64, hours: f64) -> f64 {
    if hours > 0.0 {
        ((salary / STANDARD_MONTHLY_HOURS) * (OVERTIME_RATE * hours)).floor()
    } else {
        0.0
    }
}

pub fn overtime(salary: f64, hours: f64, deduction: f64) -> GrossNet {
    let gross = overtime_gross(salary, hours);
    GrossNet {
        gross,
        net: gross - deduction,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WageSlipFigures {
    pub net_wages: f64,
    pub net_pay: f64,
}

pub fn wage_slip(
    gross_wages: f64,
    deduction: f64,
    attendance_bonus: f64,
    overtime_amount: f64,
) -> WageSlipFigures {
    let net_wages = gross_wages - deduction + attendance_bonus;
    WageSlipFigures {
        net_wages,
        net_pay: net_wages + overtime_amount,
    }
}

/// Day counts of the monthly wages table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeaveDays {
    pub working_days: i64,
    pub festive_holidays: i64,
    pub weekends: i64,
    pub earned_leave: i64,
    pub casual_leave: i64,
    pub sick_leave: i64,
    pub absent_days: i64,
}

impl LeaveDays {
    /// Not clamped: goes negative when the leave columns exceed the working
    /// days. Saturates at the `i64` bounds.
    pub fn total_days(&self) -> i64 {
        [
            self.festive_holidays,
            self.weekends,
            self.earned_leave,
            self.casual_leave,
            self.sick_leave,
            self.absent_days,
        ]
        .into_iter()
        .fold(self.working_days, i64::saturating_sub)
    }
}

/// Day counts are whole numbers; fractional input is truncated.
pub fn whole_days(value: f64) -> i64 {
    value.trunc() as i64
}

pub fn monthly(salary: f64, bonus: f64, deduction: f64) -> GrossNet {
    let gross = salary + bonus;
    GrossNet {
        gross,
        net: gross - deduction,
    }
}

/// Computed figures of one screen row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineFigures {
    pub gross: f64,
    pub deduction: f64,
    /// Net of the row: net bonus, net overtime, net pay or net wages.
    pub net: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance_bonus: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_wages: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_days: Option<i64>,
}

/// Column sums shown under a screen's table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub workers: usize,
    pub gross: f64,
    pub deductions: f64,
    pub net: f64,
    /// Rows with no attendance remark (monthly wages only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance_eligible: Option<usize>,
}

impl Totals {
    pub fn add(&mut self, line: &LineFigures) {
        self.workers += 1;
        self.gross += line.gross;
        self.deductions += line.deduction;
        self.net += line.net;
    }
}
