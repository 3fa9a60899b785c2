//! Data directory resolution.
//!
//! Always uses XDG layout: `$XDG_DATA_HOME/dayring` or `~/.local/share/dayring`.
//! We intentionally ignore the platform-specific `dirs::data_dir()` (which
//! returns `~/Library/Application Support` on macOS).

use std::path::PathBuf;

/// Return the default dayring data directory.
pub fn data_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join("dayring");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".local")
        .join("share")
        .join("dayring")
}

/// Path of the plan document within a data directory.
pub fn plans_path(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("plans.json")
}

/// Path of the activity log within a data directory.
pub fn activity_path(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("activity.json")
}

/// Path of the retention sweep marker within a data directory.
pub fn sweep_marker_path(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("last_sweep")
}
