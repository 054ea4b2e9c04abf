// InfoExtractor trait and the pieces both yt-dlp backends share

use async_trait::async_trait;
use std::fmt;
use std::process::Output;

use crate::downloader::config::ExtractionConfig;
use crate::downloader::errors::ExtractorFailure;
use crate::downloader::models::RawMetadata;

/// Extraction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractorMode {
    /// Python module yt_dlp
    Python,
    /// CLI binary yt-dlp
    Cli,
    /// Python for YouTube, CLI elsewhere, falling back to the other
    #[default]
    Auto,
}

impl fmt::Display for ExtractorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Python => write!(f, "python"),
            Self::Cli => write!(f, "cli"),
            Self::Auto => write!(f, "auto"),
        }
    }
}

/// Process-level tool settings; per-request parameters live in [`ExtractionConfig`]
#[derive(Debug, Clone, Default)]
pub struct ExtractorSettings {
    pub mode: ExtractorMode,
    /// Explicit yt-dlp binary; discovered when `None`
    pub ytdlp_path: Option<String>,
    /// Explicit python interpreter; discovered when `None`
    pub python_cmd: Option<String>,
    /// SOCKS5/HTTP proxy URL
    pub proxy: Option<String>,
}

impl ExtractorSettings {
    pub fn with_mode(mut self, mode: ExtractorMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_ytdlp_path(mut self, path: Option<String>) -> Self {
        self.ytdlp_path = path;
        self
    }

    pub fn with_python_cmd(mut self, cmd: Option<String>) -> Self {
        self.python_cmd = cmd;
        self
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }
}

/// Trait for info extractors
#[async_trait]
pub trait InfoExtractor: Send + Sync {
    /// Name of the extractor (for logging)
    fn name(&self) -> &'static str;

    /// Check if this extractor can run at all
    async fn is_available(&self) -> bool;

    /// Extract metadata without downloading.
    ///
    /// `Ok(None)` means the extractor ran cleanly but produced nothing.
    async fn extract(
        &self,
        url: &str,
        config: &ExtractionConfig,
    ) -> Result<Option<RawMetadata>, ExtractorFailure>;
}

/// yt-dlp arguments for a metadata-only run
pub(super) fn ytdlp_args(url: &str, config: &ExtractionConfig, proxy: Option<&str>) -> Vec<String> {
    let mut args = vec![
        "--dump-single-json".to_string(),
        "--no-playlist".to_string(),
    ];

    if config.quiet {
        args.push("--quiet".to_string());
    }
    if config.no_warnings {
        args.push("--no-warnings".to_string());
    }
    if config.ignore_errors {
        args.push("--ignore-errors".to_string());
    }

    args.push("-f".to_string());
    args.push(config.format.clone());
    args.push("--merge-output-format".to_string());
    args.push(config.merge_output_format.clone());
    args.push("--socket-timeout".to_string());
    args.push(config.socket_timeout.as_secs().to_string());

    if config.skip_certificate_check {
        args.push("--no-check-certificates".to_string());
    }

    for (name, value) in &config.http_headers {
        args.push("--add-header".to_string());
        args.push(format!("{}:{}", name, value));
    }

    if let Some(proxy) = proxy {
        args.push("--proxy".to_string());
        args.push(proxy.to_string());
    }

    // End of options so a URL can never be read as a flag
    args.push("--".to_string());
    args.push(url.to_string());
    args
}

/// Interpret a finished yt-dlp run.
///
/// A clean exit with a document wins over any `ERROR:` line on stderr
/// (`--ignore-errors` lets yt-dlp report a failed sub-item and still print
/// the document). The `ERROR:` line only decides the outcome when the run
/// failed or printed nothing.
pub(super) fn parse_output(output: &Output) -> Result<Option<RawMetadata>, ExtractorFailure> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let body = stdout.trim();
    let no_document = body.is_empty() || body == "null";

    let stderr = String::from_utf8_lossy(&output.stderr);
    if no_document || !output.status.success() {
        if let Some(line) = stderr.lines().find(|l| l.trim_start().starts_with("ERROR:")) {
            return Err(ExtractorFailure::Reported(line.trim().to_string()));
        }
    }

    if !output.status.success() {
        let detail = stderr.trim();
        return Err(ExtractorFailure::Failed(if detail.is_empty() {
            format!("yt-dlp exited with {}", output.status)
        } else {
            detail.to_string()
        }));
    }

    if no_document {
        return Ok(None);
    }

    serde_json::from_str::<RawMetadata>(body)
        .map(Some)
        .map_err(|e| ExtractorFailure::Failed(format!("Invalid JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downloader::config;
    use crate::downloader::models::Platform;

    #[cfg(unix)]
    fn output(code: i32, stdout: &str, stderr: &str) -> Output {
        use std::os::unix::process::ExitStatusExt;
        Output {
            status: std::process::ExitStatus::from_raw(code << 8),
            stdout: stdout.as_bytes().to_vec(),
            stderr: stderr.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_args_carry_config() {
        let config = config::build(Platform::Instagram);
        let args = ytdlp_args("https://instagram.com/p/x", &config, Some("socks5://127.0.0.1:1080"));

        assert_eq!(args[0], "--dump-single-json");
        assert!(args.contains(&"--no-check-certificates".to_string()));
        assert!(args.contains(&"X-IG-App-ID:936619743392459".to_string()));
        assert!(args.windows(2).any(|w| w[0] == "-f" && w[1] == "best"));
        assert!(args.windows(2).any(|w| w[0] == "--socket-timeout" && w[1] == "30"));
        assert!(args.windows(2).any(|w| w[0] == "--proxy" && w[1] == "socks5://127.0.0.1:1080"));
        assert_eq!(args.last().map(String::as_str), Some("https://instagram.com/p/x"));
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_reported_error() {
        let out = output(1, "", "WARNING: x\nERROR: [youtube] abc: Private video\n");
        assert_eq!(
            parse_output(&out),
            Err(ExtractorFailure::Reported("ERROR: [youtube] abc: Private video".to_string()))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_clean_exit_with_document_ignores_error_line() {
        let out = output(
            0,
            r#"{"title": "Demo", "url": "https://cdn/x.mp4"}"#,
            "ERROR: [youtube] abc: Private video\n",
        );
        let raw = parse_output(&out).unwrap().unwrap();
        assert_eq!(raw.title.as_deref(), Some("Demo"));
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_clean_exit_without_document_reports_error() {
        let out = output(0, "null\n", "ERROR: [youtube] abc: Private video\n");
        assert_eq!(
            parse_output(&out),
            Err(ExtractorFailure::Reported("ERROR: [youtube] abc: Private video".to_string()))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_empty_is_none() {
        assert_eq!(parse_output(&output(0, "", "")), Ok(None));
        assert_eq!(parse_output(&output(0, "null\n", "")), Ok(None));
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_document() {
        let out = output(0, r#"{"title": "Demo", "duration": 125, "url": "https://cdn/x.mp4"}"#, "");
        let raw = parse_output(&out).unwrap().unwrap();
        assert_eq!(raw.title.as_deref(), Some("Demo"));
        assert_eq!(raw.duration, Some(125.0));
        assert_eq!(raw.url.as_deref(), Some("https://cdn/x.mp4"));
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_garbage_and_bad_exit() {
        assert!(matches!(
            parse_output(&output(0, "not json", "")),
            Err(ExtractorFailure::Failed(_))
        ));
        assert!(matches!(
            parse_output(&output(2, "", "")),
            Err(ExtractorFailure::Failed(_))
        ));
    }
}
