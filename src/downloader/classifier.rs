// URL classification: shape validation and platform detection
//
// Pure and synchronous; safe to call from the interaction thread.

use regex::Regex;
use tracing::debug;

use super::errors::DownloadError;
use super::models::{ClassifiedUrl, Platform};

lazy_static::lazy_static! {
    static ref SUPPORTED_URL_RE: Regex = Regex::new(
        r"(?i)^(https?://)?(www\.)?(youtube\.com|youtu\.be|facebook\.com|fb\.watch|twitter\.com|x\.com|instagram\.com)/\S+"
    )
    .unwrap();
}

const TWITTER_DOMAIN: &str = "twitter.com";
const X_DOMAIN: &str = "x.com";

/// Domain tokens checked in order; first containment hit wins.
const PLATFORM_TOKENS: &[(&str, Platform)] = &[
    ("youtube.com", Platform::YouTube),
    ("youtu.be", Platform::YouTube),
    ("instagram.com", Platform::Instagram),
    ("facebook.com", Platform::Facebook),
    ("fb.watch", Platform::Facebook),
    ("twitter.com", Platform::Twitter),
    ("x.com", Platform::Twitter),
];

/// Check that `url` has a plausible shape for one of the supported platforms.
pub fn validate_url(url: &str) -> bool {
    let trimmed = url.trim();
    !trimmed.is_empty() && SUPPORTED_URL_RE.is_match(trimmed)
}

/// Detect the platform by domain-token containment.
pub fn detect_platform(url: &str) -> Option<Platform> {
    let lower = url.to_lowercase();
    PLATFORM_TOKENS
        .iter()
        .find(|(token, _)| lower.contains(token))
        .map(|(_, platform)| *platform)
}

/// Validate `url`, detect its platform and return the canonical URL.
///
/// `x.com` hosts are rewritten to `twitter.com` here and nowhere else;
/// everything downstream must use the returned URL.
pub fn classify(url: &str) -> Result<ClassifiedUrl, DownloadError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(DownloadError::UnsupportedUrl("empty URL".to_string()));
    }

    let caps = SUPPORTED_URL_RE
        .captures(trimmed)
        .ok_or_else(|| DownloadError::UnsupportedUrl(trimmed.to_string()))?;

    let platform = detect_platform(trimmed)
        .ok_or_else(|| DownloadError::UnsupportedUrl(trimmed.to_string()))?;

    let canonical = match caps.get(3) {
        Some(host) if host.as_str().eq_ignore_ascii_case(X_DOMAIN) => format!(
            "{}{}{}",
            &trimmed[..host.start()],
            TWITTER_DOMAIN,
            &trimmed[host.end()..]
        ),
        _ => trimmed.to_string(),
    };

    debug!("Classified {} as {}", canonical, platform);

    Ok(ClassifiedUrl {
        platform,
        url: canonical,
    })
}
