//! View projection over fetched rows: filtering by section, job and free
//! text, and ordering by a chosen column. Nothing here mutates the rows.

use std::cmp::Ordering;

use serde::Deserialize;
use strum_macros::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

/// A sortable column value.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Number(f64),
    Text(String),
}

impl SortValue {
    pub fn text(value: Option<&str>) -> Option<SortValue> {
        value.map(|v| SortValue::Text(v.to_string()))
    }

    pub fn number(value: Option<f64>) -> Option<SortValue> {
        value.map(SortValue::Number)
    }

    fn compare(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
            (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
        }
    }
}

/// Anything that can be listed on a console screen.
pub trait Projectable {
    fn record_id(&self) -> Option<i64>;
    fn display_name(&self) -> Option<&str>;

    fn section_name(&self) -> Option<&str> {
        None
    }

    fn job_name(&self) -> Option<&str> {
        None
    }

    fn card_no(&self) -> Option<&str> {
        None
    }

    /// Value of the column named `key`, `None` when the record has no value
    /// or the column is unknown.
    fn sort_value(&self, key: &str) -> Option<SortValue>;
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Display, EnumString, Deserialize, ToSchema)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "ascending")]
    #[strum(serialize = "asc", serialize = "ascending")]
    Asc,
    #[serde(alias = "descending")]
    #[strum(serialize = "desc", serialize = "descending")]
    Desc,
}

/// Filter and sort selection of one screen request. Blank strings mean
/// "no filter".
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ViewQuery {
    /// Exact section name.
    pub section: Option<String>,
    /// Exact job name.
    pub job: Option<String>,
    /// Case-insensitive free text.
    pub search: Option<String>,
    /// Column key to order by.
    pub sort: Option<String>,
    pub direction: Option<SortDirection>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl ViewQuery {
    pub fn matches<T: Projectable>(&self, record: &T) -> bool {
        if let Some(section) = non_blank(&self.section) {
            if record.section_name() != Some(section) {
                return false;
            }
        }

        if let Some(job) = non_blank(&self.job) {
            if record.job_name() != Some(job) {
                return false;
            }
        }

        if let Some(search) = non_blank(&self.search) {
            let needle = search.trim().to_lowercase();
            let contains = |hay: Option<&str>| {
                hay.map(|h| h.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            };
            let id_matches = record
                .record_id()
                .map(|id| id.to_string().contains(&needle))
                .unwrap_or(false);

            if !(contains(record.display_name())
                || contains(record.section_name())
                || contains(record.job_name())
                || contains(record.card_no())
                || id_matches)
            {
                return false;
            }
        }

        true
    }
}

/// Subset of `records` that satisfies every set filter, in input order.
pub fn filter<'a, T: Projectable>(records: &'a [T], query: &ViewQuery) -> Vec<&'a T> {
    records.iter().filter(|r| query.matches(*r)).collect()
}

/// Stable sort by `key`. Absent values go last whatever the direction.
pub fn sort<T: Projectable>(records: &mut [&T], key: &str, direction: SortDirection) {
    records.sort_by(|a, b| match (a.sort_value(key), b.sort_value(key)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => match direction {
            SortDirection::Asc => x.compare(&y),
            SortDirection::Desc => y.compare(&x),
        },
    });
}

/// Filter, then sort when a key is given.
pub fn project<'a, T: Projectable>(records: &'a [T], query: &ViewQuery) -> Vec<&'a T> {
    let mut rows = filter(records, query);
    if let Some(key) = non_blank(&query.sort) {
        sort(&mut rows, key, query.direction.unwrap_or_default());
    }
    rows
}
