use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use serde::ser::Serialize;
use serde::Deserialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::HistoryEntry;
use crate::utils;

pub const DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Ordem de exibição do histórico.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Nome (A-Z), sem diferenciar maiúsculas.
    Nome,
    #[default]
    Recente,
    Antiga,
    /// Ordem em que foram gravadas.
    Insercao,
}

pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Grava a consulta se o CNPJ ainda não estiver no histórico.
    /// Devolve `true` quando uma entrada nova foi escrita.
    pub fn append(&self, name: &str, tax_id: &str) -> Result<bool> {
        let key = utils::history_key(tax_id);
        let mut entries = self.read_all();

        if entries.iter().any(|entry| entry.tax_id == key) {
            log::debug!("CNPJ {} já está no histórico", key);
            return Ok(false);
        }

        entries.push(HistoryEntry {
            name: name.to_string(),
            tax_id: key,
            timestamp: Local::now().format(DATE_FORMAT).to_string(),
        });
        self.write_all(&entries)?;
        Ok(true)
    }

    pub fn list(&self, order: SortOrder) -> Vec<HistoryEntry> {
        let mut entries = self.read_all();
        sort_entries(&mut entries, order);
        entries
    }

    // Ausente ou ilegível conta como vazio.
    fn read_all(&self) -> Vec<HistoryEntry> {
        if !self.path.exists() {
            return Vec::new();
        }
        let parsed = fs::read_to_string(&self.path)
            .context("Falha ao ler histórico")
            .and_then(|content| {
                serde_json::from_str::<Vec<HistoryEntry>>(&content)
                    .context("Histórico com JSON inválido")
            });
        match parsed {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("{:#} ({:?})", e, self.path);
                Vec::new()
            }
        }
    }

    fn write_all(&self, entries: &[HistoryEntry]) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            utils::ensure_dir(dir)?;
        }
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        entries.serialize(&mut ser)?;
        fs::write(&self.path, buf)
            .with_context(|| format!("Falha ao gravar histórico em {:?}", self.path))?;
        Ok(())
    }
}

fn parse_timestamp(entry: &HistoryEntry) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&entry.timestamp, DATE_FORMAT).ok()
}

/// Ordenação estável; datas ilegíveis contam como as mais antigas.
pub fn sort_entries(entries: &mut [HistoryEntry], order: SortOrder) {
    match order {
        SortOrder::Nome => entries.sort_by_cached_key(|e| e.name.to_uppercase()),
        SortOrder::Recente => entries.sort_by(|a, b| parse_timestamp(b).cmp(&parse_timestamp(a))),
        SortOrder::Antiga => entries.sort_by(|a, b| parse_timestamp(a).cmp(&parse_timestamp(b))),
        SortOrder::Insercao => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, cnpj: &str, data: &str) -> HistoryEntry {
        HistoryEntry {
            name: name.into(),
            tax_id: cnpj.into(),
            timestamp: data.into(),
        }
    }

    #[test]
    fn append_deduplicates_by_tax_id() {
        let tmp = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(tmp.path().join("historico.json"));

        assert!(store.append("PRIMEIRA", "11.222.333/0001-81").unwrap());
        assert!(!store.append("SEGUNDA", "11222333000181").unwrap());

        let entries = store.list(SortOrder::Insercao);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "PRIMEIRA");
        assert_eq!(entries[0].tax_id, "11222333000181");
        assert!(NaiveDateTime::parse_from_str(&entries[0].timestamp, DATE_FORMAT).is_ok());
    }

    #[test]
    fn append_pads_short_ids() {
        let tmp = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(tmp.path().join("historico.json"));
        store.append("CURTA", "191").unwrap();
        assert_eq!(store.list(SortOrder::Insercao)[0].tax_id, "00000000000191");
    }

    #[test]
    fn file_is_pretty_printed_with_four_spaces() {
        let tmp = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(tmp.path().join("historico.json"));
        store.append("ACME", "11222333000181").unwrap();
        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.starts_with("[\n    {\n        \"nome\": \"ACME\""));
    }

    #[test]
    fn corrupt_file_is_treated_as_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("historico.json");
        fs::write(&path, "lixo").unwrap();
        let store = HistoryStore::new(&path);
        assert!(store.list(SortOrder::Recente).is_empty());
        assert!(store.append("ACME", "11222333000181").unwrap());
        assert_eq!(store.list(SortOrder::Recente).len(), 1);
    }

    #[test]
    fn missing_file_lists_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(tmp.path().join("nada.json"));
        assert!(store.list(SortOrder::Nome).is_empty());
    }

    #[test]
    fn sorts_by_date_descending_and_ascending() {
        let base = vec![
            entry("A", "1", "01/01/2024 10:00"),
            entry("B", "2", "03/01/2024 10:00"),
            entry("C", "3", "02/01/2024 10:00"),
        ];

        let mut desc = base.clone();
        sort_entries(&mut desc, SortOrder::Recente);
        let names: Vec<_> = desc.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["B", "C", "A"]);

        let mut asc = base.clone();
        sort_entries(&mut asc, SortOrder::Antiga);
        let names: Vec<_> = asc.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["A", "C", "B"]);

        let mut same = base.clone();
        sort_entries(&mut same, SortOrder::Insercao);
        assert_eq!(same, base);
    }

    #[test]
    fn name_sort_is_case_insensitive_and_stable() {
        let mut entries = vec![
            entry("beta", "1", "01/01/2024 10:00"),
            entry("Alfa", "2", "01/01/2024 10:00"),
            entry("BETA", "3", "01/01/2024 10:00"),
            entry("alfa", "4", "01/01/2024 10:00"),
        ];
        sort_entries(&mut entries, SortOrder::Nome);
        let ids: Vec<_> = entries.iter().map(|e| e.tax_id.as_str()).collect();
        assert_eq!(ids, ["2", "4", "1", "3"]);
    }

    #[test]
    fn unparsable_dates_sort_as_oldest() {
        let mut entries = vec![
            entry("X", "1", "ontem"),
            entry("Y", "2", "05/02/2024 08:30"),
        ];
        sort_entries(&mut entries, SortOrder::Recente);
        assert_eq!(entries[0].name, "Y");
        sort_entries(&mut entries, SortOrder::Antiga);
        assert_eq!(entries[0].name, "X");
    }
}
