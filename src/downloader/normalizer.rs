// Converts the extractor document into the strict VideoMetadata record

use super::models::{FileSize, FormatDescriptor, Platform, RawMetadata, VideoMetadata};

pub const UNKNOWN_TITLE: &str = "Unknown";
pub const BEST_FORMAT_ID: &str = "best";
pub const BEST_QUALITY_LABEL: &str = "best quality";

/// Size fallback chain: `filesize`, then `filesize_approx`, then the largest
/// size any format reports. Never synthesizes zero.
pub fn resolve_size(raw: &RawMetadata) -> FileSize {
    raw.filesize
        .and_then(FileSize::from_raw)
        .or_else(|| raw.filesize_approx.and_then(FileSize::from_raw))
        .or_else(|| {
            raw.formats()
                .iter()
                .filter_map(|f| match f.effective_size() {
                    Some(FileSize::Bytes(n)) => Some(n),
                    _ => None,
                })
                .max()
                .map(FileSize::Bytes)
        })
        .unwrap_or(FileSize::NotAvailable)
}

pub fn normalize(raw: &RawMetadata, platform: Platform) -> VideoMetadata {
    let size = resolve_size(raw);

    VideoMetadata {
        title: raw
            .title
            .clone()
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        thumbnail: raw.thumbnail.clone(),
        duration: raw.duration.filter(|d| d.is_finite() && *d >= 0.0),
        platform,
        formats: vec![FormatDescriptor {
            format_id: BEST_FORMAT_ID.to_string(),
            quality: BEST_QUALITY_LABEL.to_string(),
            size,
            size_text: size.to_string(),
            url: None,
        }],
    }
}
