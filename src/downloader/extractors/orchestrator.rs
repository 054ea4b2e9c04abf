// InfoExtractor Orchestrator - mode selection and fallback
//
// Strategy:
// 1. For YouTube: Python mode preferred (better anti-bot bypass)
// 2. For other sites: CLI mode preferred (faster)
// 3. Fall back to the other backend only on tool failures; an error the
//    site reported (private, removed, login) would be the same on both

use async_trait::async_trait;
use tracing::{info, warn};

use super::cli::CliInfoExtractor;
use super::python::PythonInfoExtractor;
use super::traits::{ExtractorMode, ExtractorSettings, InfoExtractor};
use crate::downloader::config::ExtractionConfig;
use crate::downloader::errors::ExtractorFailure;
use crate::downloader::models::RawMetadata;

/// Orchestrator that manages the Python and CLI extractors
pub struct InfoExtractorOrchestrator {
    mode: ExtractorMode,
    python: Box<dyn InfoExtractor>,
    cli: Box<dyn InfoExtractor>,
}

impl InfoExtractorOrchestrator {
    pub fn new(settings: &ExtractorSettings) -> Self {
        Self::with_backends(
            settings.mode,
            Box::new(PythonInfoExtractor::new(
                settings.python_cmd.clone(),
                settings.proxy.clone(),
            )),
            Box::new(CliInfoExtractor::new(
                settings.ytdlp_path.clone(),
                settings.proxy.clone(),
            )),
        )
    }

    pub fn with_backends(
        mode: ExtractorMode,
        python: Box<dyn InfoExtractor>,
        cli: Box<dyn InfoExtractor>,
    ) -> Self {
        Self { mode, python, cli }
    }

    /// Backends to try for `url`, in order
    fn plan(&self, url: &str) -> Vec<&dyn InfoExtractor> {
        let lower = url.to_lowercase();
        let is_youtube = lower.contains("youtube.com") || lower.contains("youtu.be");

        match self.mode {
            ExtractorMode::Python => vec![self.python.as_ref()],
            ExtractorMode::Cli => vec![self.cli.as_ref()],
            ExtractorMode::Auto if is_youtube => vec![self.python.as_ref(), self.cli.as_ref()],
            ExtractorMode::Auto => vec![self.cli.as_ref(), self.python.as_ref()],
        }
    }
}

impl Default for InfoExtractorOrchestrator {
    fn default() -> Self {
        Self::new(&ExtractorSettings::default())
    }
}

#[async_trait]
impl InfoExtractor for InfoExtractorOrchestrator {
    fn name(&self) -> &'static str {
        "orchestrator"
    }

    async fn is_available(&self) -> bool {
        for backend in self.plan("") {
            if backend.is_available().await {
                return true;
            }
        }
        false
    }

    async fn extract(
        &self,
        url: &str,
        config: &ExtractionConfig,
    ) -> Result<Option<RawMetadata>, ExtractorFailure> {
        let mut last_failure = None;

        for backend in self.plan(url) {
            if !backend.is_available().await {
                warn!("[Orchestrator] {} is not available, skipping", backend.name());
                last_failure = Some(ExtractorFailure::ToolNotFound(backend.name().to_string()));
                continue;
            }

            info!("[Orchestrator] Trying {} ({} mode)", backend.name(), self.mode);

            match backend.extract(url, config).await {
                Ok(result) => {
                    info!("[Orchestrator] {} succeeded", backend.name());
                    return Ok(result);
                }
                Err(failure) if failure.is_tool_failure() => {
                    warn!("[Orchestrator] {} failed: {}", backend.name(), failure);
                    last_failure = Some(failure);
                }
                Err(failure) => return Err(failure),
            }
        }

        Err(last_failure.unwrap_or_else(|| {
            ExtractorFailure::ToolNotFound("no extractor backend configured".to_string())
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Scripted {
        name: &'static str,
        available: bool,
        result: Result<Option<RawMetadata>, ExtractorFailure>,
        calls: Arc<AtomicUsize>,
    }

    impl Scripted {
        fn boxed(
            name: &'static str,
            available: bool,
            result: Result<Option<RawMetadata>, ExtractorFailure>,
        ) -> (Box<dyn InfoExtractor>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let backend = Self {
                name,
                available,
                result,
                calls: calls.clone(),
            };
            (Box::new(backend), calls)
        }
    }

    #[async_trait]
    impl InfoExtractor for Scripted {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn is_available(&self) -> bool {
            self.available
        }

        async fn extract(
            &self,
            _url: &str,
            _config: &ExtractionConfig,
        ) -> Result<Option<RawMetadata>, ExtractorFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    fn titled(title: &str) -> Option<RawMetadata> {
        Some(RawMetadata {
            title: Some(title.to_string()),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_auto_prefers_python_for_youtube() {
        let (python, python_calls) = Scripted::boxed("py", true, Ok(titled("from python")));
        let (cli, cli_calls) = Scripted::boxed("cli", true, Ok(titled("from cli")));
        let orch = InfoExtractorOrchestrator::with_backends(ExtractorMode::Auto, python, cli);

        let raw = orch
            .extract("https://youtu.be/abc", &ExtractionConfig::base())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(raw.title.as_deref(), Some("from python"));
        assert_eq!(python_calls.load(Ordering::SeqCst), 1);
        assert_eq!(cli_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_auto_prefers_cli_elsewhere() {
        let (python, _) = Scripted::boxed("py", true, Ok(titled("from python")));
        let (cli, _) = Scripted::boxed("cli", true, Ok(titled("from cli")));
        let orch = InfoExtractorOrchestrator::with_backends(ExtractorMode::Auto, python, cli);

        let raw = orch
            .extract("https://twitter.com/u/status/1", &ExtractionConfig::base())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(raw.title.as_deref(), Some("from cli"));
    }

    #[tokio::test]
    async fn test_falls_back_on_tool_failure() {
        let (python, _) = Scripted::boxed(
            "py",
            true,
            Err(ExtractorFailure::Failed("timed out".to_string())),
        );
        let (cli, cli_calls) = Scripted::boxed("cli", true, Ok(titled("from cli")));
        let orch = InfoExtractorOrchestrator::with_backends(ExtractorMode::Auto, python, cli);

        let raw = orch
            .extract("https://youtube.com/watch?v=abc", &ExtractionConfig::base())
            .await
            .unwrap();
        assert!(raw.is_some());
        assert_eq!(cli_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reported_error_is_not_retried() {
        let (python, _) = Scripted::boxed(
            "py",
            true,
            Err(ExtractorFailure::Reported("ERROR: Private video".to_string())),
        );
        let (cli, cli_calls) = Scripted::boxed("cli", true, Ok(titled("from cli")));
        let orch = InfoExtractorOrchestrator::with_backends(ExtractorMode::Auto, python, cli);

        let result = orch
            .extract("https://youtube.com/watch?v=abc", &ExtractionConfig::base())
            .await;
        assert!(matches!(result, Err(ExtractorFailure::Reported(_))));
        assert_eq!(cli_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_nothing_available() {
        let (python, _) = Scripted::boxed("py", false, Ok(None));
        let (cli, _) = Scripted::boxed("cli", false, Ok(None));
        let orch = InfoExtractorOrchestrator::with_backends(ExtractorMode::Auto, python, cli);

        assert!(!orch.is_available().await);
        let result = orch
            .extract("https://fb.watch/abc", &ExtractionConfig::base())
            .await;
        assert!(matches!(result, Err(ExtractorFailure::ToolNotFound(_))));
    }

    #[tokio::test]
    async fn test_fixed_mode_uses_single_backend() {
        let (python, python_calls) = Scripted::boxed("py", true, Ok(titled("py")));
        let (cli, _) = Scripted::boxed(
            "cli",
            true,
            Err(ExtractorFailure::Failed("boom".to_string())),
        );
        let orch = InfoExtractorOrchestrator::with_backends(ExtractorMode::Cli, python, cli);

        let result = orch
            .extract("https://fb.watch/abc", &ExtractionConfig::base())
            .await;
        assert!(matches!(result, Err(ExtractorFailure::Failed(_))));
        assert_eq!(python_calls.load(Ordering::SeqCst), 0);
    }
}
