pub mod cli;
pub mod downloader;
pub mod logging;

use downloader::{DownloadError, DownloadTarget, Downloader, ExtractorSettings, Materialized};

/// Resolve one URL, deliver it to `target` and print the result as JSON.
pub async fn run(
    url: &str,
    target: DownloadTarget,
    settings: &ExtractorSettings,
) -> Result<(), DownloadError> {
    let downloader = Downloader::new(settings);

    let media = downloader.resolve(url).await?;
    let delivered = downloader.deliver(&media, &target).await?;

    let (direct_url, saved_path) = match delivered {
        Materialized::Handoff(link) => (Some(link), None),
        Materialized::Saved(path) => (None, Some(path.display().to_string())),
    };

    let info = &media.metadata;
    let report = serde_json::json!({
        "title": info.title,
        "thumbnail": info.thumbnail,
        "duration": info.duration_label(),
        "platform": info.platform,
        "formats": info.formats,
        "direct_url": direct_url,
        "saved_path": saved_path,
    });
    println!("{:#}", report);
    Ok(())
}
