use anyhow::{Context, Result};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::Path;

pub const CNPJ_LEN: usize = 14;

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Falha ao criar diretório: {}", path.display()))?;
    }
    Ok(())
}

pub fn digits_only(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// CNPJ normalizado: exatamente 14 dígitos, sem pontuação.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaxId(String);

impl TaxId {
    /// Remove tudo que não é dígito. Devolve a quantidade de dígitos
    /// encontrada quando ela é diferente de 14.
    pub fn parse(raw: &str) -> Result<Self, usize> {
        let digits = digits_only(raw);
        if digits.len() == CNPJ_LEN {
            Ok(Self(digits))
        } else {
            Err(digits.len())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Chave do histórico: só dígitos, zeros à esquerda até 14, cortado em 14.
pub fn history_key(raw: &str) -> String {
    let digits = digits_only(raw);
    let mut key = format!("{:0>width$}", digits, width = CNPJ_LEN);
    key.truncate(CNPJ_LEN);
    key
}

/// Percorre `data` seguindo um caminho com pontos (`company.nature.text`).
/// Para em `None` assim que uma chave falta ou o nó não é um objeto.
pub fn get_nested_value<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(data, |node, key| node.as_object()?.get(key))
}
