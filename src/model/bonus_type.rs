use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::lenient;

pub const BONUS_TYPE_READ: &str = "BReadInformation";
pub const BONUS_TYPE_LIST_FIELD: &str = "breadInformation";

/// Bonus occasion offered on the bonus screen (e.g. an Eid bonus).
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "bcode": "EID1", "btype": "EID-UL-FITR" }))]
pub struct BonusType {
    #[serde(default, deserialize_with = "lenient::text")]
    pub bcode: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub btype: Option<String>,
}

/// Period key of the bonus screen: bonus type and month label joined, either
/// one alone when the other is unset, `"N/A"` when neither is set.
pub fn bonus_period(bonus_type: Option<&str>, month_label: Option<&str>) -> String {
    let bonus_type = bonus_type.map(str::trim).filter(|s| !s.is_empty());
    let month = month_label.map(str::trim).filter(|s| !s.is_empty());
    match (bonus_type, month) {
        (Some(b), Some(m)) => format!("{b} - {m}"),
        (Some(b), None) => b.to_string(),
        (None, Some(m)) => m.to_string(),
        (None, None) => UNSET_PERIOD.to_string(),
    }
}

pub const UNSET_PERIOD: &str = "N/A";
