use std::path::{Path, PathBuf};

use miette::{Context as _, IntoDiagnostic as _};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::service::ScanService;

pub const DEFAULT_REPORT_FILE: &str = "scan_report.pdf";

/// Downloads the rendered report of the latest scan into `path`.
pub async fn export_to<S: ScanService>(service: &S, path: &Path) -> miette::Result<PathBuf> {
    let bytes = service.export_report().await?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .into_diagnostic()
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }

    tokio::fs::write(path, &bytes)
        .await
        .into_diagnostic()
        .with_context(|| format!("Failed to write report {}", path.display()))?;

    debug!(path = %path.display(), size = bytes.len(), "report saved");

    Ok(path.to_path_buf())
}

/// Triggers an export in the background. Failures are only logged; callers
/// that care can await the handle.
pub fn trigger_export<S>(service: S, path: PathBuf) -> JoinHandle<Option<PathBuf>>
where
    S: ScanService + Send + Sync + 'static,
{
    tokio::spawn(async move {
        match export_to(&service, &path).await {
            Ok(saved) => Some(saved),
            Err(error) => {
                warn!(%error, "report export failed");
                None
            }
        }
    })
}
