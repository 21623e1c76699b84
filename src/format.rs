use chrono::{DateTime, NaiveDate, Utc};

use crate::model::DocumentKey;

/// Brazilian real with thousands grouping: `R$ 1.234.567,89`.
pub fn currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let units = cents / 100;
    let frac = cents % 100;

    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac:02}")
}

/// Percentage with two decimals and a comma separator: `1,65%`.
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value).replace('.', ",")
}

/// Share of `part` in `whole` as a percentage string; `0,00%` when `whole` is zero.
pub fn share(part: f64, whole: f64) -> String {
    if whole.abs() < f64::EPSILON {
        return percent(0.0);
    }
    percent(part / whole * 100.0)
}

pub fn date(d: NaiveDate) -> String {
    d.format("%d/%m/%Y").to_string()
}

pub fn timestamp(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Access key grouped in blocks of four digits for readability.
pub fn document_key(key: &DocumentKey) -> String {
    match key {
        DocumentKey::Key(k) => k
            .as_bytes()
            .chunks(4)
            .map(|c| String::from_utf8_lossy(c).into_owned())
            .collect::<Vec<_>>()
            .join(" "),
        DocumentKey::NotInformed => "not informed".to_string(),
    }
}

/// Keep only characters that are safe in a file name.
pub fn file_stem(raw: &str) -> String {
    let stem: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "report".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(currency(1500.0), "R$ 1.500,00");
        assert_eq!(currency(0.0), "R$ 0,00");
        assert_eq!(currency(1234567.891), "R$ 1.234.567,89");
        assert_eq!(currency(999.999), "R$ 1.000,00");
        assert_eq!(currency(-12.5), "-R$ 12,50");
    }

    #[test]
    fn share_of_zero_whole() {
        assert_eq!(share(10.0, 0.0), "0,00%");
        assert_eq!(share(500.0, 1500.0), "33,33%");
    }

    #[test]
    fn document_key_grouping() {
        let key = DocumentKey::Key("3524".repeat(11));
        assert_eq!(document_key(&key).split(' ').count(), 11);
        assert_eq!(document_key(&DocumentKey::NotInformed), "not informed");
    }

    #[test]
    fn file_stem_replaces_separators() {
        assert_eq!(file_stem("RPT/2024 01"), "RPT_2024_01");
        assert_eq!(file_stem(""), "report");
    }
}
