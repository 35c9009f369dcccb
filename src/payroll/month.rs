use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Serialize, Serializer};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Canonical month names as they appear in the month picker labels.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
pub enum MonthName {
    January = 1,
    February = 2,
    March = 3,
    April = 4,
    May = 5,
    June = 6,
    July = 7,
    August = 8,
    September = 9,
    October = 10,
    November = 11,
    December = 12,
}

impl MonthName {
    pub fn number(self) -> u32 {
        self as u32
    }

    pub fn from_number(n: u32) -> Option<Self> {
        MonthName::iter().find(|m| m.number() == n)
    }
}

/// A calendar month. Wire format is `YYYY-MM`, picker label is `MONTH, YYYY`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MonthToken {
    pub year: i32,
    pub month: MonthName,
}

impl MonthToken {
    pub fn new(year: i32, month: MonthName) -> Self {
        Self { year, month }
    }

    pub fn label(&self) -> String {
        format!("{}, {}", self.month, self.year)
    }

    fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month.number(), 1)
    }

    pub fn days_in_month(&self) -> u32 {
        self.first_day()
            .map(|first| {
                first
                    .iter_days()
                    .take_while(|d| d.month() == first.month())
                    .count() as u32
            })
            .unwrap_or(0)
    }

    /// Friday is the weekly holiday, so "weekends" counts Fridays only.
    pub fn weekends(&self) -> u32 {
        self.first_day()
            .map(|first| {
                first
                    .iter_days()
                    .take_while(|d| d.month() == first.month())
                    .filter(|d| d.weekday() == Weekday::Fri)
                    .count() as u32
            })
            .unwrap_or(0)
    }

    pub fn working_days(&self) -> u32 {
        self.days_in_month() - self.weekends()
    }
}

impl fmt::Display for MonthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month.number())
    }
}

impl Serialize for MonthToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for MonthToken {
    type Err = ();

    /// Parses the `YYYY-MM` wire form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s.trim().rsplit_once('-').ok_or(())?;
        if month.len() != 2 {
            return Err(());
        }
        let year = year.parse::<i32>().map_err(|_| ())?;
        let month = month
            .parse::<u32>()
            .ok()
            .and_then(MonthName::from_number)
            .ok_or(())?;
        Ok(MonthToken::new(year, month))
    }
}

/// `"MARCH, 2025"` -> `2025-03`. Anything that is not exactly
/// `<MONTH_NAME>, <YEAR>` yields `None`.
pub fn encode(label: &str) -> Option<MonthToken> {
    let (name, year) = label.split_once(", ")?;
    if year.contains(", ") {
        return None;
    }
    let month = MonthName::from_str(name.trim()).ok()?;
    let year = year.trim().parse::<i32>().ok()?;
    Some(MonthToken::new(year, month))
}

/// `"2025-03"` -> `"MARCH, 2025"`.
pub fn decode(token: &str) -> Option<String> {
    token.parse::<MonthToken>().ok().map(|t| t.label())
}

/// The twelve picker labels for one year.
pub fn labels_for_year(year: i32) -> Vec<String> {
    MonthName::iter()
        .map(|m| MonthToken::new(year, m).label())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_every_canonical_month() {
        let expected = [
            ("JANUARY", "01"),
            ("FEBRUARY", "02"),
            ("MARCH", "03"),
            ("APRIL", "04"),
            ("MAY", "05"),
            ("JUNE", "06"),
            ("JULY", "07"),
            ("AUGUST", "08"),
            ("SEPTEMBER", "09"),
            ("OCTOBER", "10"),
            ("NOVEMBER", "11"),
            ("DECEMBER", "12"),
        ];
        for year in [1999, 2025, 2030] {
            for (name, mm) in expected {
                let token = encode(&format!("{name}, {year}")).expect("canonical label");
                assert_eq!(token.to_string(), format!("{year}-{mm}"));
            }
        }
    }

    #[test]
    fn tokens_are_unique_per_label() {
        let mut seen = std::collections::HashSet::new();
        for year in 2020..2030 {
            for label in labels_for_year(year) {
                let token = encode(&label).unwrap().to_string();
                assert!(seen.insert(token), "duplicate token for {label}");
            }
        }
        assert_eq!(seen.len(), 120);
    }

    #[test]
    fn malformed_labels_are_absent() {
        for bad in [
            "",
            "MARCH 2025",
            "MARCH,2025",
            "March, 2025",
            "MARCHY, 2025",
            "MARCH, twenty",
            "MARCH, 2025, 2026",
            ", 2025",
        ] {
            assert!(encode(bad).is_none(), "{bad:?} should not encode");
        }
    }

    #[test]
    fn month_name_whitespace_is_ignored() {
        assert_eq!(encode(" JULY , 2024").unwrap().to_string(), "2024-07");
    }

    #[test]
    fn decode_inverts_encode() {
        assert_eq!(decode("2025-03").as_deref(), Some("MARCH, 2025"));
        assert_eq!(decode("2025-13"), None);
        assert_eq!(decode("2025-3"), None);
        assert_eq!(decode("garbage"), None);
        for label in labels_for_year(2026) {
            let token = encode(&label).unwrap().to_string();
            assert_eq!(decode(&token), Some(label));
        }
    }

    #[test]
    fn calendar_figures() {
        // January 2025 has Fridays on the 3rd, 10th, 17th, 24th and 31st.
        let jan = MonthToken::new(2025, MonthName::January);
        assert_eq!(jan.days_in_month(), 31);
        assert_eq!(jan.weekends(), 5);
        assert_eq!(jan.working_days(), 26);

        let feb_leap = MonthToken::new(2024, MonthName::February);
        assert_eq!(feb_leap.days_in_month(), 29);
        assert_eq!(feb_leap.weekends(), 4);
    }

    #[test]
    fn picker_offers_twelve_labels() {
        let labels = labels_for_year(2025);
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0], "JANUARY, 2025");
        assert_eq!(labels[11], "DECEMBER, 2025");
    }
}
