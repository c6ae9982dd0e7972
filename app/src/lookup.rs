use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::ACCEPT;

use crate::history::HistoryStore;
use crate::models::CompanyRecord;
use crate::utils::{TaxId, CNPJ_LEN};

/// Falha de transporte: status HTTP inesperado ou erro de rede.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportFailure {
    #[error("HTTP {0}")]
    Status(u16),

    #[error("{0}")]
    Network(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("O CNPJ deve conter 14 dígitos numéricos (recebidos {0}).")]
    InvalidLength(usize),

    #[error("CNPJ inválido. Verifique e tente novamente.")]
    RejectedByServer,

    #[error("CNPJ não encontrado na base de dados.")]
    NotFound,

    #[error("Falha na consulta: {0}")]
    Transport(TransportFailure),

    #[error("Erro inesperado: {0}")]
    Unexpected(String),
}

impl LookupError {
    /// Formato inválido, seja na entrada ou recusado pela API.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, Self::InvalidLength(_) | Self::RejectedByServer)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::InvalidLength(_) => "CNPJ inválido",
            Self::RejectedByServer => "Erro de Requisição",
            Self::NotFound => "Não encontrado",
            Self::Transport(_) | Self::Unexpected(_) => "Erro",
        }
    }
}

/// Resposta crua da API, antes da classificação.
#[derive(Debug, Clone)]
pub struct SourceReply {
    pub status: u16,
    pub body: String,
}

/// Origem dos dados de um estabelecimento.
#[async_trait]
pub trait CompanySource: Send + Sync {
    async fn fetch_office(&self, tax_id: &TaxId) -> Result<SourceReply, TransportFailure>;
}

/// Cliente da API pública da CNPJá.
pub struct CnpjaClient {
    client: reqwest::Client,
    base_url: String,
}

impl CnpjaClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        // Sem timeout e sem reaproveitar conexões: uma tentativa por consulta.
        let client = reqwest::Client::builder()
            .user_agent(concat!("cnpj-consulta/", env!("CARGO_PKG_VERSION")))
            .pool_max_idle_per_host(0)
            .build()
            .context("Falha ao criar cliente HTTP")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn office_url(&self, tax_id: &TaxId) -> String {
        format!("{}/office/{}", self.base_url, tax_id)
    }
}

#[async_trait]
impl CompanySource for CnpjaClient {
    async fn fetch_office(&self, tax_id: &TaxId) -> Result<SourceReply, TransportFailure> {
        let url = self.office_url(tax_id);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| TransportFailure::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportFailure::Network(e.to_string()))?;
        Ok(SourceReply { status, body })
    }
}

/// Traduz a resposta crua em registro ou erro de consulta.
pub fn classify(reply: SourceReply) -> Result<CompanyRecord, LookupError> {
    match reply.status {
        404 => Err(LookupError::NotFound),
        400 => Err(LookupError::RejectedByServer),
        200..=299 => serde_json::from_str(&reply.body)
            .and_then(CompanyRecord::from_json)
            .map_err(|e| LookupError::Unexpected(format!("resposta ilegível: {}", e))),
        other => Err(LookupError::Transport(TransportFailure::Status(other))),
    }
}

/// Consulta completa: valida, busca, classifica e registra no histórico.
pub struct Lookup<S> {
    source: S,
    history: HistoryStore,
}

impl<S: CompanySource> Lookup<S> {
    pub fn new(source: S, history: HistoryStore) -> Self {
        Self { source, history }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub async fn lookup(&self, raw_input: &str) -> Result<CompanyRecord, LookupError> {
        let tax_id = TaxId::parse(raw_input.trim()).map_err(|found| {
            log::debug!("Entrada com {} dígitos, esperado {}", found, CNPJ_LEN);
            LookupError::InvalidLength(found)
        })?;

        let reply = self
            .source
            .fetch_office(&tax_id)
            .await
            .map_err(LookupError::Transport)?;
        let record = classify(reply)?;

        if let Some(name) = record.legal_name() {
            // O histórico nunca impede a exibição do resultado.
            if let Err(e) = self.history.append(name, tax_id.as_str()) {
                log::warn!("Erro ao salvar histórico: {:#}", e);
            }
        }

        Ok(record)
    }
}
