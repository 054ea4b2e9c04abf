// Request pipeline: classify -> configure -> extract -> normalize/resolve -> deliver

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::classifier;
use super::config::{self, ExtractionConfig};
use super::direct_url;
use super::errors::DownloadError;
use super::extractors::{ExtractorSettings, InfoExtractor, InfoExtractorOrchestrator};
use super::generation::{Generation, RequestGenerations, Stamped};
use super::materialize;
use super::models::{
    ClassifiedUrl, DownloadTarget, Materialized, RawMetadata, ResolvedMedia, VideoMetadata,
};
use super::normalizer;

/// Entry point for the presentation layer. Cheap to clone; clones share the
/// extractor and the generation counter.
#[derive(Clone)]
pub struct Downloader {
    extractor: Arc<dyn InfoExtractor>,
    generations: RequestGenerations,
    proxy: Option<String>,
}

/// An extraction running on a worker task
pub struct PendingRequest<T> {
    generation: Generation,
    handle: JoinHandle<Result<T, DownloadError>>,
}

impl<T> PendingRequest<T> {
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Wait for the worker and tag its result with this request's generation
    pub async fn wait(self) -> Stamped<Result<T, DownloadError>> {
        let value = match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(DownloadError::ExtractionFailed(format!(
                "extraction worker stopped: {}",
                e
            ))),
        };
        Stamped {
            generation: self.generation,
            value,
        }
    }
}

impl Downloader {
    pub fn new(settings: &ExtractorSettings) -> Self {
        Self::with_extractor(Arc::new(InfoExtractorOrchestrator::new(settings)))
            .with_proxy(settings.proxy.clone())
    }

    pub fn with_extractor(extractor: Arc<dyn InfoExtractor>) -> Self {
        Self {
            extractor,
            generations: RequestGenerations::new(),
            proxy: None,
        }
    }

    /// Proxy used for local materialization
    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn generations(&self) -> &RequestGenerations {
        &self.generations
    }

    /// Run the extractor for an already classified URL
    async fn extract(
        &self,
        classified: &ClassifiedUrl,
    ) -> Result<(RawMetadata, ExtractionConfig), DownloadError> {
        let config = config::build(classified.platform);
        debug!("Extracting {} with {}", classified.url, self.extractor.name());

        match self.extractor.extract(&classified.url, &config).await {
            Ok(Some(raw)) => Ok((raw, config)),
            Ok(None) => {
                warn!("Extractor returned nothing for {} URL", classified.platform);
                Err(DownloadError::NoInformationAvailable)
            }
            Err(failure) => {
                let error = DownloadError::from(failure);
                warn!("Extraction failed: {}", error);
                Err(error)
            }
        }
    }

    /// Fetch and normalize metadata for display
    pub async fn get_video_info(&self, url: &str) -> Result<VideoMetadata, DownloadError> {
        let classified = classifier::classify(url)?;
        let (raw, _) = self.extract(&classified).await?;
        let metadata = normalizer::normalize(&raw, classified.platform);

        info!("Got info for \"{}\" ({})", metadata.title, metadata.platform);
        Ok(metadata)
    }

    /// Resolve `url` to exactly one direct media URL
    pub async fn resolve(&self, url: &str) -> Result<ResolvedMedia, DownloadError> {
        let classified = classifier::classify(url)?;
        let (raw, config) = self.extract(&classified).await?;

        let direct_url = direct_url::resolve(&raw)?;
        let extension = raw
            .ext
            .clone()
            .filter(|ext| !ext.is_empty())
            .unwrap_or_else(|| config.merge_output_format.clone());
        let metadata = normalizer::normalize(&raw, classified.platform);

        info!("Resolved direct URL for \"{}\"", metadata.title);
        Ok(ResolvedMedia {
            direct_url,
            extension,
            metadata,
        })
    }

    /// Deliver already resolved media to `target`, fetching with the same
    /// headers the platform's extraction used
    pub async fn deliver(
        &self,
        media: &ResolvedMedia,
        target: &DownloadTarget,
    ) -> Result<Materialized, DownloadError> {
        let config = config::build(media.metadata.platform);
        materialize::materialize(media, target, &config, self.proxy.as_deref()).await
    }

    /// Resolve `url` and deliver it to `target`
    pub async fn download(
        &self,
        url: &str,
        target: &DownloadTarget,
    ) -> Result<Materialized, DownloadError> {
        let media = self.resolve(url).await?;
        self.deliver(&media, target).await
    }

    /// Start [`Self::get_video_info`] on a worker task
    pub fn submit_info(&self, url: &str) -> PendingRequest<VideoMetadata> {
        let generation = self.generations.next();
        let this = self.clone();
        let url = url.to_string();
        PendingRequest {
            generation,
            handle: tokio::spawn(async move { this.get_video_info(&url).await }),
        }
    }

    /// Start [`Self::resolve`] on a worker task
    pub fn submit_resolve(&self, url: &str) -> PendingRequest<ResolvedMedia> {
        let generation = self.generations.next();
        let this = self.clone();
        let url = url.to_string();
        PendingRequest {
            generation,
            handle: tokio::spawn(async move { this.resolve(&url).await }),
        }
    }

    /// Keep `stamped` only if it belongs to the newest submission
    pub fn accept<T>(&self, stamped: Stamped<T>) -> Option<T> {
        self.generations.accept(stamped)
    }
}

impl Default for Downloader {
    fn default() -> Self {
        Self::new(&ExtractorSettings::default())
    }
}
