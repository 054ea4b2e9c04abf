// Helper functions shared by the extractor backends and materialization

use std::io::ErrorKind;
use std::path::Path;
use std::process::{Output, Stdio};
use tokio::io::AsyncReadExt;
use tokio::process::Command as TokioCommand;

use super::errors::ExtractorFailure;

/// Longest filename stem we produce, in bytes
const MAX_STEM_BYTES: usize = 200;
const FALLBACK_STEM: &str = "video";

/// Install locations probed before falling back to `PATH` lookup
const COMMON_BIN_DIRS: &[&str] = &["/opt/homebrew/bin", "/usr/local/bin", "/usr/bin"];

/// Locate `binary` in the common install directories, else rely on `PATH`.
pub fn find_binary(binary: &str) -> String {
    COMMON_BIN_DIRS
        .iter()
        .map(|dir| Path::new(dir).join(binary))
        .find(|candidate| candidate.exists())
        .map(|candidate| candidate.to_string_lossy().to_string())
        .unwrap_or_else(|| binary.to_string())
}

/// Run a command to completion, capturing both pipes.
///
/// There is no wall-clock limit here; the extractor bounds its own socket
/// operations. The child is killed if the returned future is dropped.
pub async fn run_output(program: &str, args: &[String]) -> Result<Output, ExtractorFailure> {
    let mut child = TokioCommand::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => ExtractorFailure::ToolNotFound(program.to_string()),
            _ => ExtractorFailure::Failed(format!("Failed to start {}: {}", program, e)),
        })?;

    let mut stdout_pipe = child.stdout.take().ok_or_else(|| {
        ExtractorFailure::Failed(format!("Failed to capture stdout from {}", program))
    })?;
    let mut stderr_pipe = child.stderr.take().ok_or_else(|| {
        ExtractorFailure::Failed(format!("Failed to capture stderr from {}", program))
    })?;

    let stdout_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        stdout_pipe.read_to_end(&mut buf).await.map(|_| buf)
    });
    let stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        stderr_pipe.read_to_end(&mut buf).await.map(|_| buf)
    });

    let status = child
        .wait()
        .await
        .map_err(|e| ExtractorFailure::Failed(format!("Failed to wait for {}: {}", program, e)))?;
    let stdout = join_pipe(stdout_task, "stdout").await?;
    let stderr = join_pipe(stderr_task, "stderr").await?;

    Ok(Output {
        status,
        stdout,
        stderr,
    })
}

async fn join_pipe(
    task: tokio::task::JoinHandle<std::io::Result<Vec<u8>>>,
    name: &str,
) -> Result<Vec<u8>, ExtractorFailure> {
    task.await
        .map_err(|e| ExtractorFailure::Failed(format!("{} task failed: {}", name, e)))?
        .map_err(|e| ExtractorFailure::Failed(format!("Failed to read {}: {}", name, e)))
}

/// Turn a video title into a filename stem that is safe on every desktop OS.
///
/// Path separators, control characters and Windows-reserved characters
/// become `_`; leading/trailing dots and spaces are trimmed.
pub fn sanitize_file_stem(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let trimmed = replaced.trim_matches(|c: char| c == ' ' || c == '.');

    let mut take = trimmed.len().min(MAX_STEM_BYTES);
    while !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    let stem = trimmed[..take].trim_end();

    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_separators() {
        assert_eq!(sanitize_file_stem("a/b\\c: d?"), "a_b_c_ d_");
    }

    #[test]
    fn test_sanitize_trims_and_falls_back() {
        assert_eq!(sanitize_file_stem("  ..Demo..  "), "Demo");
        assert_eq!(sanitize_file_stem("..."), "video");
        assert_eq!(sanitize_file_stem(""), "video");
    }

    #[test]
    fn test_sanitize_truncates_on_char_boundary() {
        let title = "é".repeat(150); // 300 bytes
        let stem = sanitize_file_stem(&title);
        assert!(stem.len() <= MAX_STEM_BYTES);
        assert!(stem.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_find_binary_falls_back_to_name() {
        assert_eq!(
            find_binary("definitely-not-a-real-tool-xyz"),
            "definitely-not-a-real-tool-xyz"
        );
    }

    #[tokio::test]
    async fn test_missing_program_is_tool_not_found() {
        let result = run_output("definitely-not-a-real-tool-xyz", &[]).await;
        assert!(matches!(result, Err(ExtractorFailure::ToolNotFound(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_long_running_command_is_not_cut_short() {
        let args = vec!["-c".to_string(), "sleep 1; echo done".to_string()];
        let output = run_output("sh", &args).await.unwrap();
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "done");
    }
}
