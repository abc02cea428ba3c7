//! Writing exports to disk and opening the printable document.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use tokio::sync::mpsc;

use planner_core::prelude::*;
use planner_core::ExportFormat;

use crate::message::Message;
use crate::services::PlannerStore;

/// A rendered export waiting to be written.
#[derive(Debug, Clone)]
pub(crate) struct ExportJob {
    pub format: ExportFormat,
    pub dir: PathBuf,
    pub file_name: String,
    pub contents: String,
    pub open_in_browser: bool,
    pub browser: String,
}

/// Write `contents` under `dir`, creating the directory if needed.
pub(crate) fn write_export(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| Error::storage(dir, e.to_string()))?;
    let path = dir.join(file_name);
    std::fs::write(&path, contents).map_err(|e| Error::storage(&path, e.to_string()))?;
    Ok(path)
}

pub(super) fn spawn_export(job: ExportJob, store: Arc<PlannerStore>, msg_tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        let msg = match write_export(&job.dir, &job.file_name, &job.contents) {
            Ok(path) => {
                let export_count = store.record_export().unwrap_or_else(|e| {
                    warn!("Failed to record export: {}", e);
                    store.export_count()
                });
                info!("Exported {} to {}", job.format.label(), path.display());

                // Only the printable document is opened; JSON is a download
                if job.format == ExportFormat::Pdf && job.open_in_browser {
                    if let Err(e) = open_in_browser(&path, &job.browser) {
                        warn!("Failed to open {} in browser: {}", path.display(), e);
                    }
                }

                Message::ExportCompleted {
                    format: job.format,
                    path: path.display().to_string(),
                    export_count,
                }
            }
            Err(e) => {
                error!("Export failed: {}", e);
                Message::ExportFailed {
                    format: job.format,
                    error: e.to_string(),
                }
            }
        };
        let _ = msg_tx.send(msg).await;
    });
}

/// Open a file in the browser.
///
/// If `browser` is non-empty, uses it as the browser command.
/// Otherwise uses the platform-default opener.
fn open_in_browser(path: &Path, browser: &str) -> std::io::Result<()> {
    if !browser.is_empty() {
        Command::new(browser).arg(path).spawn()?;
        return Ok(());
    }

    #[cfg(target_os = "macos")]
    {
        Command::new("open").arg(path).spawn()?;
        return Ok(());
    }

    #[cfg(target_os = "linux")]
    {
        Command::new("xdg-open").arg(path).spawn()?;
        return Ok(());
    }

    #[cfg(target_os = "windows")]
    {
        Command::new("cmd").arg("/C").arg("start").arg("").arg(path).spawn()?;
        return Ok(());
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        return Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "no browser opener available for this platform",
        ));
    }

    #[allow(unreachable_code)]
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_export_creates_directory() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("nested").join("exports");

        let path = write_export(&dir, "plan.json", "{}").unwrap();

        assert_eq!(path, dir.join("plan.json"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_json_export_counts_and_reports_path() {
        let temp = tempdir().unwrap();
        let store = Arc::new(PlannerStore::in_memory(10));
        let (tx, mut rx) = mpsc::channel(4);

        spawn_export(
            ExportJob {
                format: ExportFormat::Json,
                dir: temp.path().to_path_buf(),
                file_name: "plan.json".to_string(),
                contents: "{}".to_string(),
                open_in_browser: true,
                browser: String::new(),
            },
            store.clone(),
            tx,
        );

        match rx.recv().await {
            Some(Message::ExportCompleted {
                format,
                path,
                export_count,
            }) => {
                assert_eq!(format, ExportFormat::Json);
                assert!(path.ends_with("plan.json"));
                assert_eq!(export_count, 1);
            }
            other => panic!("expected ExportCompleted, got {:?}", other),
        }
        assert_eq!(store.export_count(), 1);
    }
}
