// Error taxonomy and the free-text error classifier

use thiserror::Error;

/// Every failure the resolution pipeline can report to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadError {
    /// URL is empty, malformed, or not one of the supported platforms
    #[error("Unsupported URL: {0}")]
    UnsupportedUrl(String),

    #[error("This video is private")]
    PrivateContent,

    #[error("This video is not available")]
    ContentUnavailable,

    #[error("This content requires login")]
    LoginRequired,

    /// Anything the extractor reported that did not match a known pattern
    #[error("Failed to process video: {0}")]
    ExtractionFailed(String),

    /// The extractor finished without error but returned nothing
    #[error("Could not get information about the video")]
    NoInformationAvailable,

    #[error("Could not find a direct link to the video")]
    NoDirectUrlFound,

    #[error("Download failed: {0}")]
    DownloadWriteFailed(String),
}

impl DownloadError {
    /// True when the failure is about the content itself rather than the tool chain.
    pub fn is_user_content_issue(&self) -> bool {
        matches!(
            self,
            Self::PrivateContent | Self::ContentUnavailable | Self::LoginRequired
        )
    }
}

/// Failure reported by an extractor backend, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractorFailure {
    /// The backend's tool (binary or python module) could not be started
    ToolNotFound(String),

    /// The extractor itself printed an error; text kept verbatim
    Reported(String),

    /// Process or output parsing failure
    Failed(String),
}

impl ExtractorFailure {
    /// Failures that say nothing about the content and may succeed on another backend.
    pub fn is_tool_failure(&self) -> bool {
        !matches!(self, Self::Reported(_))
    }
}

impl std::fmt::Display for ExtractorFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ToolNotFound(tool) => write!(f, "Tool not found: {}", tool),
            Self::Reported(msg) => write!(f, "{}", msg),
            Self::Failed(msg) => write!(f, "{}", msg),
        }
    }
}

impl From<ExtractorFailure> for DownloadError {
    fn from(failure: ExtractorFailure) -> Self {
        match failure {
            ExtractorFailure::Reported(msg) => classify_error(&msg),
            ExtractorFailure::ToolNotFound(msg) | ExtractorFailure::Failed(msg) => {
                Self::ExtractionFailed(msg)
            }
        }
    }
}

/// Map an extractor error message onto the taxonomy.
///
/// Only the reason is matched: yt-dlp prefixes it with `ERROR: [site] <id>: `,
/// and the id or URL may itself contain a pattern word. Matching is
/// case-insensitive and checked in priority order: "private", then
/// "not available", then "sign in". Anything else keeps the message verbatim.
pub fn classify_error(message: &str) -> DownloadError {
    let reason = message
        .rsplit_once(": ")
        .map_or(message, |(_, reason)| reason);
    let lower = reason.to_lowercase();

    if lower.contains("private") {
        return DownloadError::PrivateContent;
    }

    if lower.contains("not available") {
        return DownloadError::ContentUnavailable;
    }

    if lower.contains("sign in") {
        return DownloadError::LoginRequired;
    }

    DownloadError::ExtractionFailed(message.to_string())
}
