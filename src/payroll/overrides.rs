use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use crate::model::worker::WorkerRecord;

pub type WorkerId = i64;

/// Row values an operator can edit on a payroll screen.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Display, EnumString, Serialize, Deserialize, ToSchema,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum OverrideField {
    Deduction,
    Hours,
    ExtraHours,
    AttendanceBonus,
    Bonus,
    WorkingDays,
    FestiveHolidays,
    Weekends,
    EarnedLeave,
    CasualLeave,
    SickLeave,
    AbsentDays,
    Other,
    LeaveWithoutPay,
}

/// Empty or unparsable operator input counts as zero.
pub fn parse_input(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Operator-entered values keyed by worker, seeded from the fetched rows and
/// kept until an explicit reset.
#[derive(Debug, Default, Clone)]
pub struct OverrideStore {
    values: HashMap<WorkerId, HashMap<OverrideField, f64>>,
    attendance_applied: HashSet<WorkerId>,
}

impl OverrideStore {
    /// Initialise `fields` for every worker that has no value yet. Values the
    /// operator already entered are left alone, so calling this again with
    /// the same rows changes nothing. Returns how many entries were added.
    pub fn seed<'a, I>(&mut self, records: I, fields: &[OverrideField]) -> usize
    where
        I: IntoIterator<Item = &'a WorkerRecord>,
    {
        let mut added = 0;
        for record in records {
            let Some(id) = record.valid_id() else {
                continue;
            };
            let entry = self.values.entry(id).or_default();
            for field in fields {
                if !entry.contains_key(field) {
                    entry.insert(*field, record.server_value(*field).unwrap_or(0.0));
                    added += 1;
                }
            }
        }
        added
    }

    pub fn get(&self, worker_id: WorkerId, field: OverrideField) -> f64 {
        self.values
            .get(&worker_id)
            .and_then(|fields| fields.get(&field))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn contains(&self, worker_id: WorkerId, field: OverrideField) -> bool {
        self.values
            .get(&worker_id)
            .is_some_and(|fields| fields.contains_key(&field))
    }

    /// Store operator input for one worker and field; returns the parsed value.
    pub fn set(&mut self, worker_id: WorkerId, field: OverrideField, raw: &str) -> f64 {
        let value = parse_input(raw);
        self.set_value(worker_id, field, value);
        value
    }

    pub fn set_value(&mut self, worker_id: WorkerId, field: OverrideField, value: f64) {
        self.values.entry(worker_id).or_default().insert(field, value);
    }

    pub fn is_attendance_applied(&self, worker_id: WorkerId) -> bool {
        self.attendance_applied.contains(&worker_id)
    }

    /// Checkbox-gated attendance bonus. Switching on copies the job's default
    /// amount, switching off zeroes it. Later manual edits through `set` stick.
    pub fn toggle_attendance(&mut self, worker_id: WorkerId, applied: bool, job_default: f64) -> f64 {
        let value = if applied {
            self.attendance_applied.insert(worker_id);
            job_default
        } else {
            self.attendance_applied.remove(&worker_id);
            0.0
        };
        self.set_value(worker_id, OverrideField::AttendanceBonus, value);
        value
    }

    pub fn reset(&mut self) {
        self.values.clear();
        self.attendance_applied.clear();
    }
}
