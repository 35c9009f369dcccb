use anyhow::{Context, Result};

use crate::model::section::{SECTION_LIST_FIELD, SECTION_READ, SectionRef};
use crate::remote::client::RemoteApi;

/// Startup check that the remote payroll API answers. Returns the number of
/// sections it reported.
pub async fn probe_remote(remote: &RemoteApi) -> Result<usize> {
    let sections: Vec<SectionRef> = remote
        .fetch_list(SECTION_READ, SECTION_LIST_FIELD)
        .await
        .with_context(|| format!("remote payroll API at {} did not answer", remote.base_url()))?;

    log::info!(
        "remote payroll API reachable at {}, {} sections",
        remote.base_url(),
        sections.len()
    );
    Ok(sections.len())
}
