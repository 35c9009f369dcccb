use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::lenient;

pub const SECTION_READ: &str = "JSReadInformation";
pub const SECTION_LIST_FIELD: &str = "jsreadInformation";
pub const JOBS_BY_SECTION: &str = "JSearchInformationBySection";
pub const JOBS_BY_SECTION_FIELD: &str = "jSearchInformationBySections";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "sectionsId": 3, "sectionsName": "Sewing" }))]
pub struct SectionRef {
    #[serde(rename = "sectionsId", default, deserialize_with = "lenient::id")]
    pub id: Option<i64>,
    #[serde(rename = "sectionsName", default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
}

impl SectionRef {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

/// Find a section by identifier in a fetched catalog.
pub fn find_section(sections: &[SectionRef], id: i64) -> Option<&SectionRef> {
    sections.iter().find(|s| s.id == Some(id))
}
