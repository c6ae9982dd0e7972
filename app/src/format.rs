use chrono::NaiveDate;
use serde_json::Value;

use crate::extenso::MAX_VALUE;
use crate::models::{Address, Phone};
use crate::utils::{digits_only, CNPJ_LEN};

pub const NOT_INFORMED: &str = "Não informado";

pub fn or_not_informed(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_INFORMED.to_string(),
    }
}

/// `11222333000181` → `11.222.333/0001-81`. Fora de 14 dígitos, devolve
/// apenas os dígitos.
pub fn format_cnpj(cnpj: &str) -> String {
    let d = digits_only(cnpj);
    if d.len() != CNPJ_LEN {
        return d;
    }
    format!("{}.{}.{}/{}-{}", &d[..2], &d[2..5], &d[5..8], &d[8..12], &d[12..14])
}

pub fn format_phone(phones: &[Phone]) -> String {
    match phones.first() {
        Some(phone) => format!(
            "({}) {}",
            phone.area.as_deref().unwrap_or(""),
            phone.number.as_deref().unwrap_or("")
        ),
        None => NOT_INFORMED.to_string(),
    }
}

pub fn format_address(address: Option<&Address>) -> String {
    let Some(a) = address else {
        return NOT_INFORMED.to_string();
    };
    let f = |v: &Option<String>| v.as_deref().unwrap_or("").to_string();
    format!(
        "{}, {} - {}, {} - {}, CEP: {}",
        f(&a.street),
        f(&a.number),
        f(&a.district),
        f(&a.city),
        f(&a.state),
        f(&a.zip)
    )
}

/// Real brasileiro: `R$ 1.234,56`. Acima de `MAX_VALUE`, "Não informado".
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() || value.abs() >= MAX_VALUE {
        return NOT_INFORMED.to_string();
    }
    let cents = (value.abs() * 100.0).round() as u128;
    let integer = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (idx, ch) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, grouped, fraction)
}

/// `2001-05-17` → `17-05-2001`. Datas fora do formato são mostradas como vieram.
pub fn format_date(date: Option<&str>) -> String {
    match date.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map(|parsed| parsed.format("%d-%m-%Y").to_string())
            .unwrap_or_else(|_| d.to_string()),
        None => NOT_INFORMED.to_string(),
    }
}

/// Valor JSON como texto de tela: strings sem aspas, null como "Não informado".
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NOT_INFORMED.to_string(),
        Some(Value::String(s)) => or_not_informed(Some(s)),
        Some(other) => other.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusAlert {
    pub level: AlertLevel,
    pub message: String,
}

/// Aviso de situação cadastral exibido quando `alertas_situacao` está ligado.
pub fn status_alert(status: Option<&str>) -> StatusAlert {
    let warn = |message: &str| StatusAlert {
        level: AlertLevel::Warning,
        message: message.to_string(),
    };
    match status {
        Some("Ativa") => StatusAlert {
            level: AlertLevel::Info,
            message: "Empresa ATIVA - Regular".to_string(),
        },
        Some("Baixada") => warn("Empresa BAIXADA - Verifique os detalhes"),
        Some("SUSPENSA") => warn("Empresa SUSPENSA - Pode haver restrições"),
        Some("INAPTA") => warn("Empresa INAPTA - Verifique os detalhes"),
        Some("BAIXADA POR INEXISTÊNCIA DE FATO") => {
            warn("Empresa BAIXADA POR INEXISTÊNCIA DE FATO")
        }
        other => StatusAlert {
            level: AlertLevel::Info,
            message: format!("Situação: {}", or_not_informed(other)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn phone(area: &str, number: &str) -> Phone {
        Phone {
            area: Some(area.into()),
            number: Some(number.into()),
        }
    }

    #[test]
    fn cnpj_punctuation() {
        assert_eq!(format_cnpj("11222333000181"), "11.222.333/0001-81");
        assert_eq!(format_cnpj("11.222.333/0001-81"), "11.222.333/0001-81");
        assert_eq!(format_cnpj("12.3"), "123");
    }

    #[test]
    fn cnpj_formatting_is_idempotent() {
        let once = format_cnpj("11222333000181");
        let twice = format_cnpj(&digits_only(&once));
        assert_eq!(once, twice);
    }

    #[test]
    fn phone_uses_first_entry() {
        assert_eq!(format_phone(&[]), "Não informado");
        assert_eq!(format_phone(&[phone("11", "999999999")]), "(11) 999999999");
        assert_eq!(
            format_phone(&[phone("21", "1"), phone("11", "2")]),
            "(21) 1"
        );
    }

    #[test]
    fn address_falls_back_per_field() {
        assert_eq!(format_address(None), "Não informado");
        let full = Address {
            street: Some("Rua A".into()),
            number: Some("10".into()),
            district: Some("Centro".into()),
            city: Some("São Paulo".into()),
            state: Some("SP".into()),
            zip: Some("01000000".into()),
        };
        assert_eq!(
            format_address(Some(&full)),
            "Rua A, 10 - Centro, São Paulo - SP, CEP: 01000000"
        );
        let partial = Address {
            city: Some("Recife".into()),
            ..Default::default()
        };
        assert_eq!(format_address(Some(&partial)), ",  - , Recife - , CEP: ");
    }

    #[test]
    fn currency_in_reais() {
        assert_eq!(format_currency(0.0), "R$ 0,00");
        assert_eq!(format_currency(1234.56), "R$ 1.234,56");
        assert_eq!(format_currency(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(format_currency(999.999), "R$ 1.000,00");
        assert_eq!(format_currency(-12.5), "-R$ 12,50");
        assert_eq!(format_currency(f64::NAN), "Não informado");
        assert_eq!(format_currency(1e40), "Não informado");
        assert_eq!(format_currency(-1e18), "Não informado");
        assert_eq!(format_currency(1e15), "R$ 1.000.000.000.000.000,00");
    }

    #[test]
    fn founding_date_is_reordered() {
        assert_eq!(format_date(Some("2001-05-17")), "17-05-2001");
        assert_eq!(format_date(Some("17/05/2001")), "17/05/2001");
        assert_eq!(format_date(None), "Não informado");
    }

    #[test]
    fn display_value_unquotes_strings() {
        assert_eq!(display_value(Some(&json!("ACME"))), "ACME");
        assert_eq!(display_value(Some(&json!(42))), "42");
        assert_eq!(display_value(Some(&Value::Null)), "Não informado");
        assert_eq!(display_value(None), "Não informado");
    }

    #[test]
    fn status_alerts() {
        assert_eq!(status_alert(Some("Ativa")).level, AlertLevel::Info);
        let suspended = status_alert(Some("SUSPENSA"));
        assert_eq!(suspended.level, AlertLevel::Warning);
        assert_eq!(suspended.message, "Empresa SUSPENSA - Pode haver restrições");
        assert_eq!(status_alert(Some("Nula")).message, "Situação: Nula");
        assert_eq!(status_alert(None).message, "Situação: Não informado");
    }
}
