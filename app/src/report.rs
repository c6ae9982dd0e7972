// Apresentação de uma consulta no terminal: as quatro abas da tela original
// e o texto copiado para a área de transferência.

use clap::ValueEnum;

use crate::format::{self, or_not_informed, NOT_INFORMED};
use crate::models::{CompanyRecord, Preferences};
use crate::ui;

const NA: &str = "N/A";

pub const PARTNER_HEADERS: [&str; 6] = ["Nome", "CPF", "Tipo", "Cargo", "Desde", "Idade"];
pub const REGISTRATION_HEADERS: [&str; 5] = ["Número", "UF", "Situação", "Tipo", "Data Status"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Tab {
    /// Informações Básicas
    Info,
    /// Sócios
    Socios,
    /// Atividades
    Atividades,
    /// Inscrições estaduais
    Inscricoes,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Info, Tab::Socios, Tab::Atividades, Tab::Inscricoes];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Info => "Informações Básicas",
            Tab::Socios => "Sócios",
            Tab::Atividades => "Atividades",
            Tab::Inscricoes => "Inscrições",
        }
    }
}

fn or_na(value: Option<&str>) -> String {
    value.unwrap_or(NA).to_string()
}

pub fn basic_info(record: &CompanyRecord) -> Vec<(&'static str, String)> {
    vec![
        ("Nome Empresarial", or_not_informed(record.legal_name())),
        ("Nome Fantasia", or_not_informed(record.alias.as_deref())),
        ("Data de Abertura", format::format_date(record.founded.as_deref())),
        ("Situação Cadastral", or_not_informed(record.status_text())),
        ("Natureza Jurídica", or_not_informed(record.nature_text())),
        ("Porte da Empresa", or_not_informed(record.size_text())),
        ("Capital Social", format::format_currency(record.equity())),
        ("Telefone", format::format_phone(&record.phones)),
        ("Endereço", format::format_address(record.address.as_ref())),
        ("Atividade Principal", or_not_informed(record.main_activity_text())),
    ]
}

pub fn partner_rows(record: &CompanyRecord) -> Vec<Vec<String>> {
    record
        .members()
        .iter()
        .map(|member| {
            let person = member.person.as_ref();
            vec![
                or_na(person.and_then(|p| p.name.as_deref())),
                or_na(person.and_then(|p| p.tax_id.as_deref())),
                or_na(person.and_then(|p| p.kind.as_deref())),
                or_na(member.role.as_ref().and_then(|r| r.text.as_deref())),
                or_na(member.since.as_deref()),
                or_na(person.and_then(|p| p.age.as_deref())),
            ]
        })
        .collect()
}

pub fn side_activities(record: &CompanyRecord) -> Vec<String> {
    record
        .side_activities
        .iter()
        .map(|activity| or_na(activity.text.as_deref()))
        .collect()
}

pub fn registration_rows(record: &CompanyRecord) -> Vec<Vec<String>> {
    record
        .registrations
        .iter()
        .map(|reg| {
            vec![
                or_na(reg.number.as_deref()),
                or_na(reg.state.as_deref()),
                or_na(reg.status.as_ref().and_then(|s| s.text.as_deref())),
                or_na(reg.kind.as_ref().and_then(|t| t.text.as_deref())),
                or_na(reg.status_date.as_deref()),
            ]
        })
        .collect()
}

/// Texto para a área de transferência conforme as preferências.
/// `None` quando nenhuma opção de cópia está marcada.
pub fn clipboard_text(record: &CompanyRecord, prefs: &Preferences) -> Option<String> {
    let mut text = String::new();

    if prefs.copy_legal_name {
        text.push_str(&format!(
            "Nome Empresarial: {}\nNome Fantasia: {}\n\n",
            or_not_informed(record.legal_name()),
            or_not_informed(record.alias.as_deref())
        ));
    }
    if prefs.copy_tax_id {
        let cnpj = record
            .tax_id
            .as_deref()
            .map(format::format_cnpj)
            .unwrap_or_else(|| NOT_INFORMED.to_string());
        text.push_str(&format!("CNPJ: {}\n\n", cnpj));
    }
    if prefs.copy_phone {
        text.push_str(&format!("Telefone: {}\n\n", format::format_phone(&record.phones)));
    }
    if prefs.copy_address {
        text.push_str(&format!(
            "Endereço:\n{}\n",
            format::format_address(record.address.as_ref())
        ));
    }

    (!text.is_empty()).then_some(text)
}

pub fn print_tab(record: &CompanyRecord, tab: Tab) {
    ui::print_header(tab.title());
    match tab {
        Tab::Info => {
            for (label, value) in basic_info(record) {
                ui::print_field(label, &value);
            }
        }
        Tab::Socios => {
            let rows = partner_rows(record);
            if rows.is_empty() {
                ui::print_plain("Nenhum sócio informado");
            } else {
                ui::print_table(&PARTNER_HEADERS, &rows);
            }
        }
        Tab::Atividades => {
            ui::print_field("Atividade Principal", &or_not_informed(record.main_activity_text()));
            ui::print_plain("");
            ui::print_field("Atividades Secundárias", "");
            let activities = side_activities(record);
            if activities.is_empty() {
                ui::print_plain("Nenhuma atividade secundária registrada");
            } else {
                for activity in &activities {
                    ui::print_bullet(activity);
                }
            }
        }
        Tab::Inscricoes => {
            let rows = registration_rows(record);
            if rows.is_empty() {
                ui::print_plain("Nenhuma inscrição registrada");
            } else {
                ui::print_table(&REGISTRATION_HEADERS, &rows);
            }
        }
    }
}

pub fn print_record(record: &CompanyRecord, only: Option<Tab>) {
    match only {
        Some(tab) => print_tab(record, tab),
        None => Tab::ALL.iter().for_each(|tab| print_tab(record, *tab)),
    }
}

pub fn print_status_alert(record: &CompanyRecord) {
    let alert = format::status_alert(record.status_text());
    match alert.level {
        format::AlertLevel::Info => ui::print_info(&alert.message),
        format::AlertLevel::Warning => ui::print_warning(&alert.message),
    }
}
