//! Export configuration.

use ktng_data::backend::KTNG_CORP_CODE;
use ktng_output::DEFAULT_COLLATION_LOCALE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for an export session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Backend base URL (None = unset; requests then fail at fetch time)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Company identifier sent as the path segment (default: KT&G)
    #[serde(default = "default_company_id")]
    pub company_id: String,

    /// Directory exports are saved to (default: the user's download directory)
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Locale for ordering account names (default: "ko")
    #[serde(default = "default_collation_locale")]
    pub collation_locale: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            company_id: default_company_id(),
            output_dir: default_output_dir(),
            collation_locale: default_collation_locale(),
        }
    }
}

fn default_company_id() -> String {
    KTNG_CORP_CODE.to_string()
}

/// Platform download directory, or the working directory when there is none.
///
/// - Linux: `$XDG_DOWNLOAD_DIR` or `~/Downloads`
/// - macOS: `~/Downloads`
/// - Windows: `{FOLDERID_Downloads}`
pub fn default_output_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn default_collation_locale() -> String {
    DEFAULT_COLLATION_LOCALE.to_string()
}
