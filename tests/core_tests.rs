#![cfg(feature = "core")]

use danfe::core::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// --- Payment methods ---

#[test]
fn payment_codes_round_trip() {
    for code in [
        "01", "02", "03", "04", "05", "10", "11", "12", "13", "14", "15", "16", "17", "18", "19",
        "90", "99",
    ] {
        let method = PaymentMethod::from_code(code);
        assert_ne!(method, PaymentMethod::NotInformed, "code {code}");
        assert_eq!(method.code(), Some(code));
    }
    assert_eq!(PaymentMethod::from_code("06").code(), None);
}

#[test]
fn payment_code_whitespace_is_ignored() {
    assert_eq!(PaymentMethod::from_code(" 17 "), PaymentMethod::Pix);
}

#[test]
fn payment_labels() {
    assert_eq!(payment_method_description("03"), "Cartão de Crédito");
    assert_eq!(payment_method_description("04"), "Cartão de Débito");
    assert_eq!(payment_method_description("90"), "Sem pagamento");
    assert_eq!(payment_method_description(""), "Não informado");
}

// --- Formatting ---

#[test]
fn receipt_money_formatting() {
    assert_eq!(format_currency(dec!(30)), "R$ 30.00");
    assert_eq!(format_currency(dec!(5.5000000000)), "R$ 5.50");
    assert_eq!(format_currency(dec!(2.675)), "R$ 2.68");
    assert_eq!(format_currency(dec!(-1.5)), "R$ -1.50");
}

#[test]
fn receipt_quantity_formatting() {
    assert_eq!(format_quantity(dec!(2.0000)), "2");
    assert_eq!(format_quantity(dec!(0.3450)), "0.345");
}

#[test]
fn tax_ids() {
    assert_eq!(format_tax_id("11222333000181"), "11.222.333/0001-81");
    assert_eq!(format_tax_id("12345678909"), "123.456.789-09");
    assert_eq!(format_tax_id("ABC"), "ABC");
}

// --- Model helpers ---

#[test]
fn access_key_validation() {
    assert!(is_valid_access_key("35240112345678000199650010000001231000001234"));
    assert!(!is_valid_access_key("NFe35240112345678000199650010000001231000001234"));
    assert_eq!(ACCESS_KEY_LEN, 44);
    assert_eq!(RETAIL_RECEIPT_MODEL, "65");
}

#[test]
fn recipient_tax_id_order() {
    let recipient = Recipient {
        cnpj: Some("11222333000181".into()),
        cpf: Some("12345678909".into()),
        ..Default::default()
    };
    assert_eq!(recipient.tax_id(), Some("11222333000181"));

    let foreign = Recipient {
        foreign_id: Some("P1234567".into()),
        ..Default::default()
    };
    assert_eq!(foreign.tax_id(), Some("P1234567"));
}

#[test]
fn ipi_amounts() {
    let taxed = Ipi::Taxed(IpiTaxed {
        cst: "50".into(),
        base: Some(dec!(100)),
        rate: Some(dec!(5)),
        unit_quantity: None,
        unit_value: None,
        amount: dec!(5.00),
    });
    assert_eq!(taxed.amount(), dec!(5.00));
    assert_eq!(taxed.situation_code(), "50");

    let exempt = Ipi::NotTaxed(CstOnly { cst: "53".into() });
    assert_eq!(exempt.amount(), Decimal::ZERO);
}

#[test]
fn empty_breakdown_is_zero() {
    assert_eq!(TaxBreakdown::default().total(), Decimal::ZERO);
}

// --- Errors ---

#[test]
fn error_messages() {
    assert_eq!(
        DanfeError::UnsupportedFormat("docx".into()).to_string(),
        "unsupported output format 'docx': use 'html' or 'pdf'"
    );
    let io: DanfeError = std::io::Error::other("disk full").into();
    assert!(matches!(io, DanfeError::Io(_)));
}
