//! Display formatting for DANFE fields.
//!
//! Every function here is total: input of the wrong shape is passed through
//! unchanged instead of failing.

use chrono::{DateTime, FixedOffset};
use rust_decimal::{Decimal, RoundingStrategy};

/// Currency prefix used on the receipt.
pub const CURRENCY_PREFIX: &str = "R$";

/// `12345678000199` → `12.345.678/0001-99`.
pub fn format_cnpj(cnpj: &str) -> String {
    if !is_ascii_of_len(cnpj, 14) {
        return cnpj.to_string();
    }
    format!(
        "{}.{}.{}/{}-{}",
        &cnpj[0..2],
        &cnpj[2..5],
        &cnpj[5..8],
        &cnpj[8..12],
        &cnpj[12..14]
    )
}

/// `12345678909` → `123.456.789-09`.
pub fn format_cpf(cpf: &str) -> String {
    if !is_ascii_of_len(cpf, 11) {
        return cpf.to_string();
    }
    format!(
        "{}.{}.{}-{}",
        &cpf[0..3],
        &cpf[3..6],
        &cpf[6..9],
        &cpf[9..11]
    )
}

/// `01310100` → `01310-100`.
pub fn format_cep(cep: &str) -> String {
    if !is_ascii_of_len(cep, 8) {
        return cep.to_string();
    }
    format!("{}-{}", &cep[0..5], &cep[5..8])
}

/// Format a CNPJ or CPF depending on its length.
pub fn format_tax_id(id: &str) -> String {
    match id.len() {
        11 => format_cpf(id),
        _ => format_cnpj(id),
    }
}

/// Two decimal places with the `R$` prefix: `dec!(12.5)` → `R$ 12.50`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{CURRENCY_PREFIX} {rounded:.2}")
}

/// Trailing zeros trimmed: `1.0000` → `1`, `0.2500` → `0.25`.
pub fn format_quantity(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Insert a space every 4 characters.
pub fn format_access_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + key.len() / 4);
    for (i, c) in key.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// `dd/mm/YYYY HH:MM:SS` in the timestamp's own offset.
pub fn format_datetime(value: &DateTime<FixedOffset>) -> String {
    value.format("%d/%m/%Y %H:%M:%S").to_string()
}

/// `dd/mm/YYYY` in the timestamp's own offset.
pub fn format_date(value: &DateTime<FixedOffset>) -> String {
    value.format("%d/%m/%Y").to_string()
}

// Byte slicing above is only safe on ASCII input.
fn is_ascii_of_len(s: &str, len: usize) -> bool {
    s.len() == len && s.is_ascii()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn cnpj() {
        assert_eq!(format_cnpj("12345678000199"), "12.345.678/0001-99");
        assert_eq!(format_cnpj("1234567800019"), "1234567800019");
        assert_eq!(format_cnpj(""), "");
    }

    #[test]
    fn cpf() {
        assert_eq!(format_cpf("12345678909"), "123.456.789-09");
        assert_eq!(format_cpf("123456789"), "123456789");
    }

    #[test]
    fn cep() {
        assert_eq!(format_cep("01310100"), "01310-100");
        assert_eq!(format_cep("0131010"), "0131010");
    }

    #[test]
    fn non_ascii_of_right_byte_length_passes_through() {
        // 14 bytes, 13 chars
        assert_eq!(format_cnpj("é23456789012X"), "é23456789012X");
        assert_eq!(format_cnpj("é234567890123"), "é234567890123");
    }

    #[test]
    fn tax_id_by_length() {
        assert_eq!(format_tax_id("12345678909"), "123.456.789-09");
        assert_eq!(format_tax_id("12345678000199"), "12.345.678/0001-99");
        assert_eq!(format_tax_id("X1"), "X1");
    }

    #[test]
    fn currency() {
        assert_eq!(format_currency(dec!(12.5)), "R$ 12.50");
        assert_eq!(format_currency(dec!(0)), "R$ 0.00");
        assert_eq!(format_currency(dec!(1234.567)), "R$ 1234.57");
        assert_eq!(format_currency(dec!(0.125)), "R$ 0.13");
        assert_eq!(format_currency(dec!(10.0000)), "R$ 10.00");
    }

    #[test]
    fn quantity() {
        assert_eq!(format_quantity(dec!(1.0000)), "1");
        assert_eq!(format_quantity(dec!(0.2500)), "0.25");
        assert_eq!(format_quantity(dec!(2.345)), "2.345");
        assert_eq!(format_quantity(dec!(10)), "10");
    }

    #[test]
    fn access_key_grouping() {
        assert_eq!(format_access_key("12345678"), "1234 5678");
        assert_eq!(format_access_key("123456789"), "1234 5678 9");
        assert_eq!(format_access_key(""), "");
        let key = "35240112345678000199650010000001231000001234";
        let grouped = format_access_key(key);
        assert_eq!(grouped.split(' ').count(), 11);
        assert_eq!(grouped.replace(' ', ""), key);
    }

    #[test]
    fn datetime_keeps_document_offset() {
        let ts = DateTime::parse_from_rfc3339("2024-01-15T10:30:00-03:00").unwrap();
        assert_eq!(format_datetime(&ts), "15/01/2024 10:30:00");
        assert_eq!(format_date(&ts), "15/01/2024");
    }
}
