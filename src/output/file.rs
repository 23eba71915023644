use crate::output::ExportResult;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Path of the CSV file for an article: `<dir>/<slug><suffix>`
pub fn output_path(dir: &Path, slug: &str, suffix: &str) -> PathBuf {
    dir.join(format!("{slug}{suffix}"))
}

/// Writes CSV bytes to `path`, replacing any existing file
///
/// Missing parent directories are created. On Unix the file is left
/// world-writable (`0o777`).
///
/// # Arguments
///
/// * `path` - Destination file
/// * `csv` - Complete CSV document
///
/// # Returns
///
/// * `Ok(())` - File written
/// * `Err(ExportError)` - Directory creation, write or chmod failed
pub fn save_comments(path: &Path, csv: &[u8]) -> ExportResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, csv)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o777))?;
    }

    info!(path = %path.display(), bytes = csv.len(), "comments saved");
    Ok(())
}
