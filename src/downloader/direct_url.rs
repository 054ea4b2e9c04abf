// Direct-URL resolution: top-level URL first, then formats best-last

use tracing::debug;

use super::errors::DownloadError;
use super::models::RawMetadata;

/// Pick one downloadable URL from the extractor document.
///
/// Formats are listed worst-to-best, so the scan runs from the end.
pub fn resolve(raw: &RawMetadata) -> Result<String, DownloadError> {
    if let Some(url) = raw.url.as_deref().filter(|u| !u.is_empty()) {
        debug!("Using top-level media URL");
        return Ok(url.to_string());
    }

    raw.formats()
        .iter()
        .rev()
        .find_map(|f| f.url.as_deref().filter(|u| !u.is_empty()))
        .map(|url| {
            debug!("Using media URL from format list");
            url.to_string()
        })
        .ok_or(DownloadError::NoDirectUrlFound)
}
