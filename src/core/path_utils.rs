/*
 * Resolves the per-user local directory where the presenter application keeps
 * its settings and log file. The directory is created on first use.
 */
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/*
 * Retrieves the application's local (non-roaming) configuration directory,
 * creating it if necessary. Returns `None` if the platform offers no suitable
 * location or the directory could not be created.
 */
pub fn get_base_app_config_local_dir(app_name: &str) -> Option<PathBuf> {
    log::trace!("PathUtils: Resolving local config dir for '{app_name}'");
    let proj_dirs = ProjectDirs::from("", "", app_name)?;
    ensure_dir(proj_dirs.config_local_dir())
}

// Creates `dir` if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> Option<PathBuf> {
    if !dir.exists() {
        if let Err(e) = fs::create_dir_all(dir) {
            log::error!("PathUtils: Failed to create directory {dir:?}: {e}");
            return None;
        }
        log::debug!("PathUtils: Created directory: {dir:?}");
    }
    Some(dir.to_path_buf())
}
