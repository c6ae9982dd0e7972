use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::Preferences;
use crate::utils;

pub struct PreferencesStore {
    path: PathBuf,
}

impl PreferencesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Arquivo ausente ou ilegível vira o padrão; o erro só vai para o log.
    pub fn load(&self) -> Preferences {
        if !self.path.exists() {
            log::debug!("Preferências não encontradas em {:?}, usando padrão", self.path);
            return Preferences::default();
        }
        match self.read() {
            Ok(prefs) => prefs,
            Err(e) => {
                log::warn!("Erro ao carregar preferências: {:#}", e);
                Preferences::default()
            }
        }
    }

    fn read(&self) -> Result<Preferences> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Falha ao ler {:?}", self.path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("JSON inválido em {:?}", self.path))
    }

    pub fn save(&self, prefs: &Preferences) -> Result<PathBuf> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            utils::ensure_dir(dir)?;
        }
        let json = serde_json::to_string(prefs)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Falha ao salvar preferências em {:?}", self.path))?;
        log::debug!("Preferências salvas em {:?}", self.path);
        Ok(self.path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let store = PreferencesStore::new(tmp.path().join("prefs.json"));
        let prefs = store.load();
        assert_eq!(
            prefs,
            Preferences {
                copy_legal_name: true,
                copy_tax_id: true,
                copy_phone: true,
                copy_address: true,
                alert_on_status: false,
            }
        );
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("prefs.json");
        fs::write(&path, "{ não é json").unwrap();
        assert_eq!(PreferencesStore::new(&path).load(), Preferences::default());
    }

    #[test]
    fn save_then_load_replaces_everything() {
        let tmp = tempfile::tempdir().unwrap();
        let store = PreferencesStore::new(tmp.path().join("sub").join("prefs.json"));
        let prefs = Preferences {
            copy_phone: false,
            alert_on_status: true,
            ..Preferences::default()
        };
        let saved_at = store.save(&prefs).unwrap();
        assert_eq!(saved_at, store.path());
        assert_eq!(store.load(), prefs);

        // JSON compacto, com as chaves originais
        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(!raw.contains('\n'));
        assert!(raw.contains("\"alertas_situacao\":true"));
    }

    #[test]
    fn save_reports_io_errors() {
        let tmp = tempfile::tempdir().unwrap();
        // o "arquivo" é um diretório
        let store = PreferencesStore::new(tmp.path());
        assert!(store.save(&Preferences::default()).is_err());
    }
}
