// Download orchestration: hand the URL back, or fetch it to disk

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use super::config::ExtractionConfig;
use super::errors::DownloadError;
use super::models::{DownloadTarget, Materialized, ResolvedMedia};
use super::utils::sanitize_file_stem;

/// `<title>.<extension>` inside `directory`
pub fn output_path(directory: &Path, title: &str, extension: &str) -> PathBuf {
    let ext = extension.trim_start_matches('.');
    directory.join(format!("{}.{}", sanitize_file_stem(title), ext))
}

/// Staging file the body is streamed into before it replaces `path`
fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}

/// Deliver `media` to `target`.
///
/// Remote handoff does no I/O. Local materialization fetches the whole body
/// with the request headers used for extraction, through `proxy` if given,
/// into `<title>.<extension>.part` and renames it into place on success.
/// Any failed status or write error becomes `DownloadWriteFailed`; only the
/// `.part` file is ever removed, so an existing output file survives.
pub async fn materialize(
    media: &ResolvedMedia,
    target: &DownloadTarget,
    config: &ExtractionConfig,
    proxy: Option<&str>,
) -> Result<Materialized, DownloadError> {
    let directory = match target {
        DownloadTarget::RemoteHandoff => {
            return Ok(Materialized::Handoff(media.direct_url.clone()));
        }
        DownloadTarget::Local { directory } => directory,
    };

    let path = output_path(directory, &media.metadata.title, &media.extension);
    info!("Saving {} to {}", media.metadata.title, path.display());

    match fetch_to_file(&media.direct_url, &path, config, proxy).await {
        Ok(bytes) => {
            info!("Saved {} bytes to {}", bytes, path.display());
            Ok(Materialized::Saved(path))
        }
        Err(e) => {
            warn!("Download to {} failed: {}", path.display(), e);
            Err(e)
        }
    }
}

fn request_headers(config: &ExtractionConfig) -> HeaderMap {
    config
        .http_headers
        .iter()
        .filter_map(|(name, value)| {
            let name = HeaderName::from_bytes(name.as_bytes()).ok()?;
            let value = HeaderValue::from_str(value).ok()?;
            Some((name, value))
        })
        .collect()
}

async fn fetch_to_file(
    url: &str,
    path: &Path,
    config: &ExtractionConfig,
    proxy: Option<&str>,
) -> Result<u64, DownloadError> {
    let write_failed = |e: &dyn std::fmt::Display| DownloadError::DownloadWriteFailed(e.to_string());

    let mut builder = reqwest::Client::builder()
        .connect_timeout(config.socket_timeout)
        .danger_accept_invalid_certs(config.skip_certificate_check)
        .default_headers(request_headers(config));

    if let Some(proxy_url) = proxy {
        let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| write_failed(&e))?;
        builder = builder.proxy(proxy);
    }

    let client = builder.build().map_err(|e| write_failed(&e))?;

    let mut response = client
        .get(url)
        .send()
        .await
        .map_err(|e| write_failed(&e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::DownloadWriteFailed(format!(
            "server responded with {}",
            status
        )));
    }

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| write_failed(&e))?;
    }

    let part = partial_path(path);
    let renamed = match stream_body(&mut response, &part).await {
        Ok(written) => tokio::fs::rename(&part, path).await.map(|_| written),
        Err(e) => Err(e),
    };

    match renamed {
        Ok(written) => Ok(written),
        Err(e) => {
            let _ = tokio::fs::remove_file(&part).await;
            Err(write_failed(&e))
        }
    }
}

async fn stream_body(response: &mut reqwest::Response, part: &Path) -> std::io::Result<u64> {
    let mut file = tokio::fs::File::create(part).await?;

    let mut written: u64 = 0;
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?
    {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;

    Ok(written)
}
