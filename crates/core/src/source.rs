//! Data source: the one-shot load of the doctor data set at startup.
//!
//! There are no retries and no streaming. A failed load is reported to the
//! caller, which is expected to show a single error notice and go no further.

use crate::config::SourceLocation;
use crate::doctor::Catalogue;
use crate::{DirectoryError, DirectoryResult};
use std::path::Path;

/// Load and validate the catalogue from `location`.
///
/// # Errors
///
/// Returns [`DirectoryError`] if the request fails, answers with a non-success
/// status, the file cannot be read, or the content is not a valid doctor list.
pub async fn load_catalogue(location: &SourceLocation) -> DirectoryResult<Catalogue> {
    tracing::info!("loading doctor data from {}", location);

    let text = match location {
        SourceLocation::Url(url) => fetch_text(url).await?,
        SourceLocation::File(path) => read_text(path)?,
    };

    let catalogue = Catalogue::from_json(&text)?;
    tracing::info!("loaded {} doctor records", catalogue.len());
    Ok(catalogue)
}

async fn fetch_text(url: &str) -> DirectoryResult<String> {
    let response = reqwest::get(url)
        .await
        .map_err(DirectoryError::SourceFetch)?;

    let status = response.status();
    if !status.is_success() {
        return Err(DirectoryError::SourceStatus {
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(DirectoryError::SourceFetch)
}

fn read_text(path: &Path) -> DirectoryResult<String> {
    std::fs::read_to_string(path).map_err(DirectoryError::SourceRead)
}
