//! Path handling for the Zellij plugin sandbox.
//!
//! In the sandbox the host filesystem is mounted under `/host`, which points at
//! the directory Zellij was started from, usually the user's home.

use std::path::PathBuf;

/// Returns the data directory holding the log file.
///
/// ```
/// use cinescope::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/cinescope"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("cinescope")
}

/// Expands a leading `~` to the sandbox's `/host` mount.
///
/// Used for user-supplied paths such as `theme_file`.
///
/// ```
/// use cinescope::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dracula.toml"), "/host/themes/dracula.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/cinescope.toml"), "/etc/cinescope.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
