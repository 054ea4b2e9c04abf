use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::downloader::{DownloadTarget, ExtractorMode, ExtractorSettings};

/// Resolve a YouTube, Instagram, Facebook or Twitter/X link to its media.
#[derive(Debug, Parser)]
#[command(name = "social-downloader")]
#[command(about = "Resolve social video links to direct media URLs", long_about = None)]
pub struct Cli {
    /// Page URL of the video.
    pub url: String,

    /// Save the media locally, into DIR or the user's download directory.
    #[arg(long, value_name = "DIR")]
    pub save: Option<Option<PathBuf>>,

    /// Which yt-dlp backend to use.
    #[arg(long, value_enum, default_value_t = CliMode::Auto)]
    pub mode: CliMode,

    /// SOCKS5/HTTP proxy for extraction and download.
    #[arg(long)]
    pub proxy: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliMode {
    Auto,
    Python,
    Cli,
}

impl Cli {
    pub fn target(&self) -> DownloadTarget {
        match &self.save {
            None => DownloadTarget::RemoteHandoff,
            Some(None) => DownloadTarget::default_local(),
            Some(Some(dir)) => DownloadTarget::Local {
                directory: dir.clone(),
            },
        }
    }

    pub fn settings(&self) -> ExtractorSettings {
        let mode = match self.mode {
            CliMode::Auto => ExtractorMode::Auto,
            CliMode::Python => ExtractorMode::Python,
            CliMode::Cli => ExtractorMode::Cli,
        };
        ExtractorSettings::default()
            .with_mode(mode)
            .with_proxy(self.proxy.clone())
    }
}
