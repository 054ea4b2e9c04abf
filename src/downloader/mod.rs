// Downloader module - URL to direct-media resolution pipeline

pub mod classifier;
pub mod config;
pub mod direct_url;
pub mod errors;
pub mod extractors;
pub mod generation;
pub mod materialize;
pub mod models;
pub mod normalizer;
pub mod orchestrator;
pub mod utils;

pub use errors::{classify_error, DownloadError};
pub use extractors::{ExtractorMode, ExtractorSettings, InfoExtractor};
pub use generation::{Generation, RequestGenerations, Stamped};
pub use models::{
    DownloadTarget, FileSize, FormatDescriptor, Materialized, Platform, ResolvedMedia,
    VideoMetadata,
};
pub use orchestrator::{Downloader, PendingRequest};
