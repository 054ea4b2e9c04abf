// Extraction configuration: a fixed base overlaid with a per-platform patch

use std::collections::BTreeMap;
use std::time::Duration;

use super::models::Platform;

pub const DEFAULT_SOCKET_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_FORMAT: &str = "best";
pub const DEFAULT_MERGE_FORMAT: &str = "mp4";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

/// Per-request extraction parameters.
///
/// Built fresh for every request; nothing mutates it after [`build`] returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    pub quiet: bool,
    pub no_warnings: bool,
    /// Quality selector passed to the extractor (`-f`)
    pub format: String,
    pub merge_output_format: String,
    pub ignore_errors: bool,
    pub skip_certificate_check: bool,
    pub socket_timeout: Duration,
    pub http_headers: BTreeMap<String, String>,
}

impl ExtractionConfig {
    /// The shared starting point every platform config derives from
    pub fn base() -> Self {
        let http_headers = [
            ("User-Agent", USER_AGENT),
            (
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
            ("Accept-Language", "en-US,en;q=0.5"),
            ("Connection", "keep-alive"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            quiet: true,
            no_warnings: true,
            format: DEFAULT_FORMAT.to_string(),
            merge_output_format: DEFAULT_MERGE_FORMAT.to_string(),
            ignore_errors: true,
            skip_certificate_check: true,
            socket_timeout: Duration::from_secs(DEFAULT_SOCKET_TIMEOUT_SECS),
            http_headers,
        }
    }

    /// Compose a new config from `self` and `patch`: headers merge key-wise,
    /// scalar fields in the patch replace the base value.
    pub fn with_patch(&self, patch: &PlatformPatch) -> Self {
        let mut next = self.clone();

        if let Some(format) = patch.format {
            next.format = format.to_string();
        }

        for (key, value) in patch.extra_headers {
            next.http_headers.insert(key.to_string(), value.to_string());
        }

        next
    }
}

/// Overrides for one platform
#[derive(Debug, Clone, Copy)]
pub struct PlatformPatch {
    pub format: Option<&'static str>,
    pub extra_headers: &'static [(&'static str, &'static str)],
}

const INSTAGRAM_HEADERS: &[(&str, &str)] = &[
    ("X-IG-App-ID", "936619743392459"),
    ("X-ASBD-ID", "198387"),
    ("X-IG-WWW-Claim", "0"),
    ("Origin", "https://www.instagram.com"),
    ("Referer", "https://www.instagram.com/"),
    ("X-Requested-With", "XMLHttpRequest"),
];

/// Patch applied on top of [`ExtractionConfig::base`] for `platform`
pub fn platform_patch(platform: Platform) -> PlatformPatch {
    match platform {
        Platform::Instagram => PlatformPatch {
            format: Some(DEFAULT_FORMAT),
            extra_headers: INSTAGRAM_HEADERS,
        },
        Platform::YouTube | Platform::Facebook | Platform::Twitter => PlatformPatch {
            format: Some(DEFAULT_FORMAT),
            extra_headers: &[],
        },
    }
}

/// Build an independent extraction config for `platform`.
pub fn build(platform: Platform) -> ExtractionConfig {
    ExtractionConfig::base().with_patch(&platform_patch(platform))
}
