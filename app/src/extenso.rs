// Valores monetários por extenso, em português do Brasil.

const UNITS: [&str; 20] = [
    "zero", "um", "dois", "três", "quatro", "cinco", "seis", "sete", "oito", "nove", "dez",
    "onze", "doze", "treze", "quatorze", "quinze", "dezesseis", "dezessete", "dezoito",
    "dezenove",
];

const TENS: [&str; 10] = [
    "", "", "vinte", "trinta", "quarenta", "cinquenta", "sessenta", "setenta", "oitenta",
    "noventa",
];

const HUNDREDS: [&str; 10] = [
    "", "cento", "duzentos", "trezentos", "quatrocentos", "quinhentos", "seiscentos",
    "setecentos", "oitocentos", "novecentos",
];

// (singular, plural) por grupo de três dígitos; índice 1 é "mil".
const SCALES: [(&str, &str); 6] = [
    ("", ""),
    ("mil", "mil"),
    ("milhão", "milhões"),
    ("bilhão", "bilhões"),
    ("trilhão", "trilhões"),
    ("quatrilhão", "quatrilhões"),
];

/// Maior valor aceito (exclusivo).
pub const MAX_VALUE: f64 = 1e18;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpellOutError {
    #[error("valor não numérico: {0}")]
    NonFinite(f64),

    #[error("valores negativos não são suportados: {0}")]
    Negative(f64),

    #[error("valor acima do limite suportado: {0}")]
    TooLarge(f64),
}

fn below_thousand(n: u64) -> String {
    if n == 100 {
        return "cem".to_string();
    }
    let mut parts: Vec<&str> = Vec::new();
    let hundreds = (n / 100) as usize;
    let rest = (n % 100) as usize;
    if hundreds > 0 {
        parts.push(HUNDREDS[hundreds]);
    }
    if rest > 0 {
        if rest < 20 {
            parts.push(UNITS[rest]);
        } else {
            parts.push(TENS[rest / 10]);
            if rest % 10 > 0 {
                parts.push(UNITS[rest % 10]);
            }
        }
    }
    parts.join(" e ")
}

/// Inteiro por extenso (`1234` → "mil duzentos e trinta e quatro").
pub fn integer_in_words(n: u64) -> String {
    if n == 0 {
        return UNITS[0].to_string();
    }

    let mut groups = Vec::new();
    let mut rest = n;
    while rest > 0 {
        groups.push(rest % 1000);
        rest /= 1000;
    }

    // grupos não nulos, do mais significativo ao menos
    let spoken: Vec<(u64, String)> = groups
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, group)| **group > 0)
        .map(|(scale, &group)| {
            let text = match scale {
                0 => below_thousand(group),
                1 if group == 1 => SCALES[1].0.to_string(),
                _ => {
                    let (singular, plural) = SCALES[scale];
                    let noun = if group == 1 { singular } else { plural };
                    format!("{} {}", below_thousand(group), noun)
                }
            };
            (group, text)
        })
        .collect();

    let mut out = String::new();
    for (idx, (group, text)) in spoken.iter().enumerate() {
        if idx > 0 {
            // "e" antes de um grupo < 100 ou de centena redonda
            if *group < 100 || group % 100 == 0 {
                out.push_str(" e ");
            } else {
                out.push(' ');
            }
        }
        out.push_str(text);
    }
    out
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `1200.50` → "Mil e duzentos reais e cinquenta centavos".
pub fn spell_out_currency(value: f64) -> Result<String, SpellOutError> {
    if !value.is_finite() {
        return Err(SpellOutError::NonFinite(value));
    }
    if value < 0.0 {
        return Err(SpellOutError::Negative(value));
    }
    if value >= MAX_VALUE {
        return Err(SpellOutError::TooLarge(value));
    }

    let cents_total = (value * 100.0).round() as u128;
    let reais = (cents_total / 100) as u64;
    let cents = (cents_total % 100) as u64;

    let reais_text = (reais > 0).then(|| {
        let noun = if reais == 1 {
            "real"
        } else if reais % 1_000_000 == 0 {
            "de reais"
        } else {
            "reais"
        };
        format!("{} {}", integer_in_words(reais), noun)
    });
    let cents_text = (cents > 0).then(|| {
        let noun = if cents == 1 { "centavo" } else { "centavos" };
        format!("{} {}", integer_in_words(cents), noun)
    });

    let text = match (reais_text, cents_text) {
        (Some(r), Some(c)) => format!("{} e {}", r, c),
        (Some(r), None) => r,
        (None, Some(c)) => c,
        (None, None) => "zero reais".to_string(),
    };
    Ok(capitalize(&text))
}
