// CLI InfoExtractor - uses the native `yt-dlp` binary
//
// Faster than Python mode and needs no interpreter, but more likely to trip
// YouTube's bot detection.

use async_trait::async_trait;
use tokio::process::Command as TokioCommand;
use tracing::debug;

use super::traits::{parse_output, ytdlp_args, InfoExtractor};
use crate::downloader::config::ExtractionConfig;
use crate::downloader::errors::ExtractorFailure;
use crate::downloader::models::RawMetadata;
use crate::downloader::utils::{find_binary, run_output};

/// CLI-based info extractor using the yt-dlp binary
pub struct CliInfoExtractor {
    ytdlp_path: String,
    proxy: Option<String>,
}

impl CliInfoExtractor {
    pub fn new(ytdlp_path: Option<String>, proxy: Option<String>) -> Self {
        Self {
            ytdlp_path: ytdlp_path.unwrap_or_else(|| find_binary("yt-dlp")),
            proxy,
        }
    }

    pub fn path(&self) -> &str {
        &self.ytdlp_path
    }
}

impl Default for CliInfoExtractor {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[async_trait]
impl InfoExtractor for CliInfoExtractor {
    fn name(&self) -> &'static str {
        "cli-yt-dlp"
    }

    async fn is_available(&self) -> bool {
        TokioCommand::new(&self.ytdlp_path)
            .arg("--version")
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
        let args = ytdlp_args(url, config, self.proxy.as_deref());
        debug!("[CliExtractor] Running: {} {}", self.ytdlp_path, args.join(" "));

        let output = run_output(&self.ytdlp_path, &args).await?;

        parse_output(&output)
    }
}
