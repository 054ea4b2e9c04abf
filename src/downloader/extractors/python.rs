// Python InfoExtractor - uses `python3 -m yt_dlp`
//
// Better at getting past YouTube bot detection than the bare binary.
// Requires Python 3 with the yt-dlp module installed.

use async_trait::async_trait;
use tokio::process::Command as TokioCommand;
use tracing::debug;

use super::traits::{parse_output, ytdlp_args, InfoExtractor};
use crate::downloader::config::ExtractionConfig;
use crate::downloader::errors::ExtractorFailure;
use crate::downloader::models::RawMetadata;
use crate::downloader::utils::{find_binary, run_output};

/// Python-based info extractor using the yt_dlp module
pub struct PythonInfoExtractor {
    python_cmd: String,
    proxy: Option<String>,
}

impl PythonInfoExtractor {
    pub fn new(python_cmd: Option<String>, proxy: Option<String>) -> Self {
        Self {
            python_cmd: python_cmd.unwrap_or_else(|| find_binary("python3")),
            proxy,
        }
    }

    fn build_args(&self, url: &str, config: &ExtractionConfig) -> Vec<String> {
        let mut args = vec!["-m".to_string(), "yt_dlp".to_string()];
        args.extend(ytdlp_args(url, config, self.proxy.as_deref()));
        args
    }
}

impl Default for PythonInfoExtractor {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[async_trait]
impl InfoExtractor for PythonInfoExtractor {
    fn name(&self) -> &'static str {
        "python-yt-dlp"
    }

    /// Check that the interpreter runs and the yt_dlp module imports
    async fn is_available(&self) -> bool {
        TokioCommand::new(&self.python_cmd)
            .args(["-c", "import yt_dlp"])
            .output()
            .await
            .map(|out| out.status.success())
            .unwrap_or(false)
    }

    async fn extract(
        &self,
        url: &str,
        config: &ExtractionConfig,
    ) -> Result<Option<RawMetadata>, ExtractorFailure> {
        let args = self.build_args(url, config);
        debug!("[PythonExtractor] Running: {} {}", self.python_cmd, args.join(" "));

        let output = run_output(&self.python_cmd, &args).await?;

        // A missing module is a tool problem, not something the site said
        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.contains("No module named yt_dlp") {
            return Err(ExtractorFailure::ToolNotFound(
                "Python yt_dlp module not installed".to_string(),
            ));
        }

        parse_output(&output)
    }
}
