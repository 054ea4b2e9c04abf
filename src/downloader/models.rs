// Common data models for the resolution pipeline

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Supported source platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    YouTube,
    Instagram,
    Facebook,
    Twitter,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::YouTube => "YouTube",
            Self::Instagram => "Instagram",
            Self::Facebook => "Facebook",
            Self::Twitter => "Twitter",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A URL that passed classification, already rewritten to its canonical domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedUrl {
    pub platform: Platform,
    pub url: String,
}

/// Size of a media variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileSize {
    Bytes(u64),
    NotAvailable,
}

impl FileSize {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;

    /// Sizes arrive as JSON numbers; negative or non-finite values are not sizes.
    pub fn from_raw(value: f64) -> Option<Self> {
        if value.is_finite() && value >= 0.0 {
            Some(Self::Bytes(value as u64))
        } else {
            None
        }
    }
}

impl fmt::Display for FileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NotAvailable => write!(f, "N/A"),
            Self::Bytes(n) if n < Self::KB => write!(f, "{} B", n),
            Self::Bytes(n) if n < Self::MB => write!(f, "{:.1} KB", n as f64 / Self::KB as f64),
            Self::Bytes(n) => write!(f, "{:.1} MB", n as f64 / Self::MB as f64),
        }
    }
}

/// One candidate quality/size variant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormatDescriptor {
    pub format_id: String,
    pub quality: String,
    pub size: FileSize,
    /// Human-readable size, e.g. "12.3 MB" or "N/A"
    pub size_text: String,
    pub url: Option<String>,
}

/// Normalized video metadata handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoMetadata {
    pub title: String,
    pub thumbnail: Option<String>,
    /// Seconds; `None` when the extractor did not report one
    pub duration: Option<f64>,
    pub platform: Platform,
    /// Insertion order is preference order
    pub formats: Vec<FormatDescriptor>,
}

impl VideoMetadata {
    /// Duration as `m:ss`
    pub fn duration_label(&self) -> Option<String> {
        let total = self.duration? as u64;
        Some(format!("{}:{:02}", total / 60, total % 60))
    }
}

/// Strict schema for the extractor's JSON document.
///
/// Only the fields the pipeline reads are declared; everything else the
/// extractor prints is ignored by serde.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawMetadata {
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    pub duration: Option<f64>,
    pub url: Option<String>,
    pub ext: Option<String>,
    pub filesize: Option<f64>,
    pub filesize_approx: Option<f64>,
    pub formats: Option<Vec<RawFormat>>,
}

impl RawMetadata {
    pub fn formats(&self) -> &[RawFormat] {
        self.formats.as_deref().unwrap_or(&[])
    }
}

/// One entry of the extractor's `formats` array
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawFormat {
    pub format_id: Option<String>,
    pub url: Option<String>,
    pub ext: Option<String>,
    pub filesize: Option<f64>,
    pub filesize_approx: Option<f64>,
}

impl RawFormat {
    /// Exact size if known, otherwise the approximation
    pub fn effective_size(&self) -> Option<FileSize> {
        self.filesize
            .and_then(FileSize::from_raw)
            .or_else(|| self.filesize_approx.and_then(FileSize::from_raw))
    }
}

/// Result of a successful resolution: exactly one direct URL
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedMedia {
    pub direct_url: String,
    /// Container extension used for the `<title>.<extension>` filename
    pub extension: String,
    pub metadata: VideoMetadata,
}

/// Where a resolved URL should end up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadTarget {
    /// Give the URL back to the caller to open or fetch externally
    RemoteHandoff,
    /// Fetch into `directory` as `<title>.<extension>`
    Local { directory: PathBuf },
}

impl DownloadTarget {
    /// Local target in the user's download directory
    pub fn default_local() -> Self {
        Self::Local {
            directory: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

/// Outcome of materialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Materialized {
    Handoff(String),
    Saved(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_thresholds() {
        assert_eq!(FileSize::Bytes(1023).to_string(), "1023 B");
        assert_eq!(FileSize::Bytes(1024).to_string(), "1.0 KB");
        assert_eq!(FileSize::Bytes(1_048_575).to_string(), "1024.0 KB");
        assert_eq!(FileSize::Bytes(1_048_576).to_string(), "1.0 MB");
        assert_eq!(FileSize::Bytes(52_428_800).to_string(), "50.0 MB");
        assert_eq!(FileSize::NotAvailable.to_string(), "N/A");
    }

    #[test]
    fn test_from_raw_rejects_garbage() {
        assert_eq!(FileSize::from_raw(-1.0), None);
        assert_eq!(FileSize::from_raw(f64::NAN), None);
        assert_eq!(FileSize::from_raw(2048.0), Some(FileSize::Bytes(2048)));
    }

    #[test]
    fn test_duration_label() {
        let mut meta = VideoMetadata {
            title: "Demo".to_string(),
            thumbnail: None,
            duration: Some(125.0),
            platform: Platform::YouTube,
            formats: Vec::new(),
        };
        assert_eq!(meta.duration_label().as_deref(), Some("2:05"));

        meta.duration = None;
        assert_eq!(meta.duration_label(), None);
    }

    #[test]
    fn test_raw_metadata_tolerates_nulls() {
        let raw: RawMetadata = serde_json::from_str(
            r#"{"title": null, "formats": null, "duration": 12.5, "id": "x", "extra": [1, 2]}"#,
        )
        .unwrap();
        assert_eq!(raw.title, None);
        assert!(raw.formats().is_empty());
        assert_eq!(raw.duration, Some(12.5));
    }
}
