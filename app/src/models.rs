use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// Lista ausente ou `null` viram lista vazia.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

// Resposta de GET /office/{cnpj} da API pública da CNPJá.
// Todos os campos são opcionais: a API omite ou devolve null livremente.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub founded: Option<String>,
    #[serde(default)]
    pub status: Option<Labeled>,
    #[serde(default)]
    pub company: Option<Company>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phones: Vec<Phone>,
    #[serde(default)]
    pub main_activity: Option<Labeled>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub side_activities: Vec<Labeled>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub registrations: Vec<Registration>,
    /// Corpo JSON exatamente como recebido, para `--json`, `--campo` e a API local.
    #[serde(skip)]
    pub raw: Value,
}

impl CompanyRecord {
    /// Decodifica os campos tipados e guarda a árvore original em `raw`.
    pub fn from_json(raw: Value) -> Result<Self, serde_json::Error> {
        let mut record = Self::deserialize(&raw)?;
        record.raw = raw;
        Ok(record)
    }

    /// Nome empresarial (`company.name`), apenas quando não vazio.
    pub fn legal_name(&self) -> Option<&str> {
        self.company
            .as_ref()
            .and_then(|c| c.name.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().and_then(|s| s.text.as_deref())
    }

    pub fn equity(&self) -> f64 {
        self.company.as_ref().and_then(|c| c.equity).unwrap_or(0.0)
    }

    pub fn nature_text(&self) -> Option<&str> {
        self.company
            .as_ref()
            .and_then(|c| c.nature.as_ref())
            .and_then(|n| n.text.as_deref())
    }

    pub fn size_text(&self) -> Option<&str> {
        self.company
            .as_ref()
            .and_then(|c| c.size.as_ref())
            .and_then(|s| s.text.as_deref())
    }

    pub fn main_activity_text(&self) -> Option<&str> {
        self.main_activity.as_ref().and_then(|a| a.text.as_deref())
    }

    pub fn members(&self) -> &[Member] {
        self.company.as_ref().map(|c| c.members.as_slice()).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub equity: Option<f64>,
    #[serde(default)]
    pub nature: Option<Labeled>,
    #[serde(default)]
    pub size: Option<Labeled>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub members: Vec<Member>,
}

/// Par `{id, text}` usado pela API para situação, natureza, porte, CNAE etc.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Labeled {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Phone {
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub since: Option<String>,
    #[serde(default)]
    pub role: Option<Labeled>,
    #[serde(default)]
    pub person: Option<Person>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub status_date: Option<String>,
    #[serde(default)]
    pub status: Option<Labeled>,
    #[serde(default, rename = "type")]
    pub kind: Option<Labeled>,
}

/// Uma linha do arquivo de histórico.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cnpj")]
    pub tax_id: String,
    /// `DD/MM/YYYY HH:MM`, horário local.
    #[serde(rename = "data")]
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    #[serde(rename = "copiar_nome_empresarial")]
    pub copy_legal_name: bool,
    #[serde(rename = "copiar_cnpj")]
    pub copy_tax_id: bool,
    #[serde(rename = "copiar_telefone")]
    pub copy_phone: bool,
    #[serde(rename = "copiar_endereco")]
    pub copy_address: bool,
    #[serde(rename = "alertas_situacao")]
    pub alert_on_status: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            copy_legal_name: true,
            copy_tax_id: true,
            copy_phone: true,
            copy_address: true,
            alert_on_status: false,
        }
    }
}
