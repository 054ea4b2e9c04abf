// InfoExtractor module - yt-dlp metadata extraction
//
// Provides two modes:
// - Python mode: Uses `python3 -m yt_dlp` (better for YouTube, avoids bot detection)
// - CLI mode: Uses native `yt-dlp` binary (faster, no Python dependency)
//
// The Orchestrator picks between them per URL and falls back when a
// backend is missing or breaks.

mod cli;
mod orchestrator;
mod python;
mod traits;

pub use cli::CliInfoExtractor;
pub use orchestrator::InfoExtractorOrchestrator;
pub use python::PythonInfoExtractor;
pub use traits::{ExtractorMode, ExtractorSettings, InfoExtractor};
