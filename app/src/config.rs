use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "https://open.cnpja.com";

const PREFERENCES_FILE: &str = "CNPJConsult_preferences.json";
const HISTORY_FILE: &str = "HistoricoConsult_preferences.json";

/// Configuração resolvida a partir da linha de comando e do ambiente.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub api_url: String,
}

impl AppConfig {
    pub fn new(data_dir: Option<PathBuf>, api_url: Option<String>) -> Self {
        Self {
            data_dir: data_dir.unwrap_or_else(default_data_dir),
            api_url: api_url
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        }
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.data_dir.join(PREFERENCES_FILE)
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILE)
    }
}

// Pasta Documentos do usuário; sem ela, ~/Documents.
fn default_data_dir() -> PathBuf {
    dirs::document_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
        .unwrap_or_else(|| Path::new(".").to_path_buf())
}
