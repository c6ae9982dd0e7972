mod api;
mod clipboard;
mod config;
mod extenso;
mod format;
mod history;
mod lookup;
mod models;
mod preferences;
mod report;
mod ui;
mod utils;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::history::{HistoryStore, SortOrder};
use crate::lookup::{CnpjaClient, Lookup};
use crate::models::Preferences;
use crate::preferences::PreferencesStore;
use crate::report::Tab;

#[derive(Parser)]
#[command(name = "cnpj-consulta")]
#[command(about = "Consulta de CNPJ na API pública da CNPJá", long_about = None)]
struct Cli {
    /// Modo silencioso (menos saída)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Modo verboso (mais detalhes)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Pasta dos arquivos de preferências e histórico (padrão: Documentos)
    #[arg(long, global = true, env = "CNPJ_DADOS_DIR")]
    dados: Option<PathBuf>,

    /// URL base da API
    #[arg(long, global = true, env = "CNPJA_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Consulta um CNPJ e mostra os dados da empresa
    Consultar(ConsultarArgs),
    /// Lista as consultas já realizadas
    Historico {
        /// Ordenação da lista
        #[arg(short, long, value_enum, default_value_t = OrdemArg::Recente)]
        ordem: OrdemArg,
        /// Consulta novamente a N-ésima entrada da lista (a partir de 1)
        #[arg(short, long)]
        abrir: Option<usize>,
    },
    /// Mostra ou altera as preferências
    Preferencias(PreferenciasArgs),
    /// Inicia servidor web API para consulta de CNPJ
    Servidor {
        /// Porta do servidor
        #[arg(short, long, default_value = "8080")]
        port: u16,
        /// Endereço do servidor
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OrdemArg {
    /// Nome (A-Z), sem diferenciar maiúsculas
    Nome,
    /// Data, mais recente primeiro
    Recente,
    /// Data, mais antiga primeiro
    Antiga,
    /// Ordem em que foram gravadas
    Insercao,
}

impl From<OrdemArg> for SortOrder {
    fn from(arg: OrdemArg) -> Self {
        match arg {
            OrdemArg::Nome => SortOrder::Nome,
            OrdemArg::Recente => SortOrder::Recente,
            OrdemArg::Antiga => SortOrder::Antiga,
            OrdemArg::Insercao => SortOrder::Insercao,
        }
    }
}

#[derive(Args, Default)]
struct ConsultarArgs {
    /// CNPJ, com ou sem pontuação
    cnpj: Option<String>,
    /// Lê o CNPJ da área de transferência
    #[arg(long, conflicts_with = "cnpj")]
    colar: bool,
    /// Mostra apenas uma aba
    #[arg(short, long, value_enum)]
    aba: Option<Tab>,
    /// Mostra o capital social por extenso
    #[arg(short, long)]
    extenso: bool,
    /// Copia o resumo (conforme preferências) para a área de transferência
    #[arg(short, long)]
    copiar: bool,
    /// Imprime o registro completo em JSON
    #[arg(long, conflicts_with = "campo")]
    json: bool,
    /// Imprime um único campo, ex.: company.nature.text
    #[arg(long)]
    campo: Option<String>,
}

#[derive(Args)]
struct PreferenciasArgs {
    #[arg(long, action = ArgAction::Set)]
    copiar_nome: Option<bool>,
    #[arg(long, action = ArgAction::Set)]
    copiar_cnpj: Option<bool>,
    #[arg(long, action = ArgAction::Set)]
    copiar_telefone: Option<bool>,
    #[arg(long, action = ArgAction::Set)]
    copiar_endereco: Option<bool>,
    /// Alertas de situação cadastral
    #[arg(long, action = ArgAction::Set)]
    alertas: Option<bool>,
}

impl PreferenciasArgs {
    fn has_changes(&self) -> bool {
        self.copiar_nome.is_some()
            || self.copiar_cnpj.is_some()
            || self.copiar_telefone.is_some()
            || self.copiar_endereco.is_some()
            || self.alertas.is_some()
    }

    fn apply(&self, current: Preferences) -> Preferences {
        Preferences {
            copy_legal_name: self.copiar_nome.unwrap_or(current.copy_legal_name),
            copy_tax_id: self.copiar_cnpj.unwrap_or(current.copy_tax_id),
            copy_phone: self.copiar_telefone.unwrap_or(current.copy_phone),
            copy_address: self.copiar_endereco.unwrap_or(current.copy_address),
            alert_on_status: self.alertas.unwrap_or(current.alert_on_status),
        }
    }
}

fn build_lookup(config: &AppConfig) -> Result<Lookup<CnpjaClient>> {
    let client = CnpjaClient::new(&config.api_url)?;
    Ok(Lookup::new(client, HistoryStore::new(config.history_path())))
}

fn read_input(args: &ConsultarArgs) -> Result<String> {
    if args.colar {
        return clipboard::paste();
    }
    match &args.cnpj {
        Some(cnpj) => Ok(cnpj.clone()),
        None => ui::ask_input("Digite o CNPJ da empresa:").context("Falha ao ler o CNPJ"),
    }
}

async fn consultar(
    lookup: &Lookup<CnpjaClient>,
    prefs: &Preferences,
    input: &str,
    args: &ConsultarArgs,
) -> Result<()> {
    let spinner = ui::spinner("Consultando CNPJ...");
    let result = lookup.lookup(input).await;
    spinner.finish_and_clear();

    let record = match result {
        Ok(record) => record,
        Err(e) => {
            ui::print_error(&format!("{}: {}", e.title(), e));
            anyhow::bail!("Consulta não concluída");
        }
    };

    if let Some(path) = &args.campo {
        ui::print_plain(&format::display_value(utils::get_nested_value(&record.raw, path)));
        return Ok(());
    }
    if args.json {
        ui::print_plain(&serde_json::to_string_pretty(&record.raw)?);
        return Ok(());
    }

    if prefs.alert_on_status {
        report::print_status_alert(&record);
    }

    report::print_record(&record, args.aba);

    if args.extenso {
        ui::print_header("Capital Social por Extenso");
        match extenso::spell_out_currency(record.equity()) {
            Ok(text) => ui::print_plain(&text),
            Err(e) => ui::print_error(&format!("Não foi possível converter o valor: {}", e)),
        }
    }

    if args.copiar {
        copy_summary(&record, prefs);
    }

    Ok(())
}

fn copy_summary(record: &models::CompanyRecord, prefs: &Preferences) {
    let Some(text) = report::clipboard_text(record, prefs) else {
        ui::print_warning("Nenhuma opção de cópia selecionada nas preferências.");
        return;
    };
    if !clipboard::is_available() {
        ui::print_warning("Sem suporte à área de transferência; resumo abaixo:");
        ui::print_plain(&text);
        return;
    }
    match clipboard::copy(&text) {
        Ok(()) => ui::print_success("Informações copiadas para a área de transferência!"),
        Err(e) => ui::print_error(&format!("{:#}", e)),
    }
}

async fn historico(
    config: &AppConfig,
    prefs: &Preferences,
    ordem: SortOrder,
    abrir: Option<usize>,
) -> Result<()> {
    let lookup = build_lookup(config)?;
    let entries = lookup.history().list(ordem);
    if entries.is_empty() {
        ui::print_info("Nenhuma consulta realizada ainda.");
        return Ok(());
    }

    if let Some(n) = abrir {
        let entry = n
            .checked_sub(1)
            .and_then(|idx| entries.get(idx))
            .with_context(|| format!("Entrada {} não existe (1 a {})", n, entries.len()))?;
        ui::print_info(&format!("Consultando {} ({})", entry.name, format::format_cnpj(&entry.tax_id)));
        let args = ConsultarArgs {
            cnpj: Some(entry.tax_id.clone()),
            ..Default::default()
        };
        return consultar(&lookup, prefs, &entry.tax_id, &args).await;
    }

    ui::print_header("Histórico de Consultas");
    let rows: Vec<Vec<String>> = entries
        .iter()
        .enumerate()
        .map(|(idx, e)| {
            vec![
                (idx + 1).to_string(),
                e.name.clone(),
                format::format_cnpj(&e.tax_id),
                e.timestamp.clone(),
            ]
        })
        .collect();
    ui::print_table(&["#", "Nome", "CNPJ", "Data"], &rows);
    ui::print_verbose(&format!("Arquivo: {}", lookup.history().path().display()));
    Ok(())
}

fn preferencias(store: &PreferencesStore, args: &PreferenciasArgs) -> Result<()> {
    let mut prefs = store.load();

    if args.has_changes() {
        prefs = args.apply(prefs);
        let saved_path = store.save(&prefs).context("Falha ao salvar preferências")?;
        ui::print_success(&format!(
            "Preferências salvas com sucesso em: {}",
            saved_path.display()
        ));
    }

    let yes_no = |v: bool| if v { "Sim" } else { "Não" };
    ui::print_header("Preferências");
    ui::print_field("Copiar Nome empresarial", yes_no(prefs.copy_legal_name));
    ui::print_field("Copiar CNPJ", yes_no(prefs.copy_tax_id));
    ui::print_field("Copiar Telefone", yes_no(prefs.copy_phone));
    ui::print_field("Copiar Endereço", yes_no(prefs.copy_address));
    ui::print_field("Alertas de Situação Cadastral", yes_no(prefs.alert_on_status));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    ui::init(cli.quiet, cli.verbose);
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = AppConfig::new(cli.dados, cli.api_url);
    ui::print_verbose(&format!("Pasta de dados: {}", config.data_dir.display()));
    ui::print_verbose(&format!("API: {}", config.api_url));

    let prefs_store = PreferencesStore::new(config.preferences_path());
    ui::print_verbose(&format!("Preferências: {}", prefs_store.path().display()));

    match cli.command {
        Commands::Consultar(args) => {
            let input = read_input(&args)?;
            let lookup = build_lookup(&config)?;
            consultar(&lookup, &prefs_store.load(), &input, &args).await?;
        }
        Commands::Historico { ordem, abrir } => {
            historico(&config, &prefs_store.load(), ordem.into(), abrir).await?;
        }
        Commands::Preferencias(args) => {
            preferencias(&prefs_store, &args)?;
        }
        Commands::Servidor { port, host } => {
            let lookup = build_lookup(&config)?;
            api::start_server(lookup, &host, port).await?;
        }
    }

    Ok(())
}
