use std::path::PathBuf;

/// Fixed settings of an analyzer session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory scanned (non-recursively) for price files.
    pub scan_dir: PathBuf,
    /// Case-sensitive substring a file name must contain to be loaded.
    pub file_marker: String,
    /// HTML report written on exit.
    pub output_file: PathBuf,
    /// Input that ends the session (compared case-insensitively).
    pub exit_command: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scan_dir: PathBuf::from("."),
            file_marker: "price".to_string(),
            output_file: PathBuf::from("output.html"),
            exit_command: "exit".to_string(),
        }
    }
}
