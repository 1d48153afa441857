//! Utility functions for directory lookup and text layout
//!
//! Directory lookup follows the XDG Base Directory specification:
//!
//! - Config: `~/.config/fwctl/` - `config.json` with API URL, token, timeout
//!
//! # Example
//!
//! ```
//! use fwctl::utils::get_config_dir;
//!
//! if let Some(config_path) = get_config_dir() {
//!     let _file = config_path.join("config.json");
//! }
//! ```

use directories::ProjectDirs;
use std::path::PathBuf;

pub fn get_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("io", "absam", "fwctl").map(|pd| pd.config_dir().to_path_buf())
}

/// Truncates a string to a maximum length and adds an ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        // Find the nearest character boundary to avoid splitting multi-byte characters
        let end = s
            .char_indices()
            .map(|(idx, _)| idx)
            .take_while(|&idx| idx <= max_len.saturating_sub(3))
            .last()
            .unwrap_or(0);
        format!("{}...", &s[..end])
    }
}
