//! Log setup. The terminal belongs to the UI, so events go to a file.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "TMENU_LOG";

/// `<cache_dir>/tmenu/tmenu.log`, or `tmenu.log` when there is no cache dir.
pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("tmenu"))
        .unwrap_or_default()
        .join("tmenu.log")
}

/// Filter from `TMENU_LOG`, falling back to `info` (or `debug` when verbose).
pub fn env_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback))
}

fn open_log(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber. Failures are reported on stderr and
/// otherwise ignored; the menu runs without logs.
pub fn init(log_file: Option<&Path>, verbose: bool) {
    let path = log_file.map_or_else(default_log_path, Path::to_path_buf);
    let file = match open_log(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("tmenu: cannot open log file {}: {e}", path.display());
            return;
        }
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
    if let Err(e) = installed {
        eprintln!("tmenu: logging disabled: {e}");
    }
}
