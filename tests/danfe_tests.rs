#![cfg(feature = "html")]

use danfe::danfe::{UNIDENTIFIED_CONSUMER, render_html, render_to_writer};
use danfe::nfe::from_xml_str;
use pretty_assertions::assert_eq;

const FULL: &str = include_str!("fixtures/nfce.xml");
const MINIMAL: &str = include_str!("fixtures/nfce_minimal.xml");

fn render(xml: &str) -> String {
    render_html(&from_xml_str(xml).unwrap()).unwrap()
}

/// Lines of the rendered section starting at `title`, up to the next section.
fn section(html: &str, title: &str) -> Vec<String> {
    let marker = format!("<div class=\"section-title\">{title}</div>");
    let start = html.find(&marker).unwrap() + marker.len();
    let rest = &html[start..];
    let end = rest.find("<div class=\"section-title\">").unwrap_or(rest.len());
    rest[..end]
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[test]
fn is_a_standalone_80mm_page() {
    let html = render(FULL);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<meta charset=\"UTF-8\">"));
    assert!(html.contains("size: 80mm auto"));
    assert!(!html.contains("<link"));
    assert!(!html.contains("<script"));
    assert!(html.trim_end().ends_with("</html>"));
}

#[test]
fn header_formats_documents() {
    let html = render(FULL);
    assert!(html.contains("<div class=\"cnpj\">CNPJ: 12.345.678/0001-99</div>"));
    assert!(html.contains("Avenida Paulista, 1000 - Loja 2"));
    assert!(html.contains("Bela Vista, São Paulo-SP<br>CEP: 01310-100"));
    assert!(html.contains("DANFE NFC-e"));
}

#[test]
fn sections_appear_in_order() {
    let html = render(FULL);
    let positions: Vec<usize> = ["ITENS", "TOTAIS", "PAGAMENTO", "CONSUMIDOR", "DADOS DA NFC-e"]
        .iter()
        .map(|t| html.find(&format!(">{t}</div>")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[test]
fn totals_section() {
    let html = render(FULL);
    assert_eq!(
        section(&html, "TOTAIS"),
        vec![
            "<div class=\"totals\">",
            "<div class=\"total-line\"><span>Qtde itens:</span><span>2</span></div>",
            "<div class=\"total-line\"><span>Valor total:</span><span>R$ 31.00</span></div>",
            "<div class=\"total-line\"><span>Desconto:</span><span>R$ 1.00</span></div>",
            "<div class=\"total-line total-final\"><span>TOTAL A PAGAR:</span><span>R$ 30.00</span></div>",
            "<div class=\"total-line taxes\"><span>Tributos totais incidentes (Lei Federal 12.741/2012):</span><span>R$ 4.50</span></div>",
            "</div>",
        ]
    );
}

#[test]
fn payment_section() {
    let html = render(FULL);
    assert_eq!(
        section(&html, "PAGAMENTO"),
        vec![
            "<div class=\"payment\">",
            "<div class=\"payment-line\"><span>Dinheiro:</span><span>R$ 20.00</span></div>",
            "<div class=\"payment-line\"><span>Pagamento Instantâneo (PIX):</span><span>R$ 15.00</span></div>",
            "<div class=\"payment-line\"><span>Troco:</span><span>R$ 5.00</span></div>",
            "</div>",
        ]
    );
}

#[test]
fn other_payment_uses_free_text() {
    let html = render(MINIMAL);
    assert!(html.contains("<span>Vale da casa:</span><span>R$ 14.00</span>"));
}

#[test]
fn consumer_section() {
    let html = render(FULL);
    assert_eq!(
        section(&html, "CONSUMIDOR"),
        vec![
            "<div class=\"consumer\">",
            "CONSUMIDOR - CPF 123.456.789-09<br>",
            "Maria da Silva",
            "</div>",
            "<div class=\"nfce-info\">NFC-e Nº 123 Série 1<br>Emissão: 15/01/2024 10:30:00</div>",
        ]
    );

    let html = render(MINIMAL);
    assert!(section(&html, "CONSUMIDOR").contains(&UNIDENTIFIED_CONSUMER.to_string()));
}

#[test]
fn recipient_with_cnpj_only() {
    let xml = FULL.replace(
        "<CPF>12345678909</CPF>\n        <xNome>Maria da Silva</xNome>",
        "<CNPJ>11222333000181</CNPJ>",
    );
    let html = render(&xml);
    assert!(html.contains("CONSUMIDOR - CNPJ 11.222.333/0001-81"));
    assert!(!html.contains(UNIDENTIFIED_CONSUMER));
}

#[test]
fn footer_section() {
    let html = render(FULL);
    let footer = section(&html, "DADOS DA NFC-e").join("\n");
    assert!(footer.contains("Protocolo: 135240000012345"));
    assert!(footer.contains("Autorização: 15/01/2024 10:30:05"));
    assert!(footer.contains("https://www.nfce.fazenda.sp.gov.br/consulta"));
    assert!(footer.contains("3524 0112 3456 7800 0199 6500 1000 0001 2310 0000 1234"));
    assert!(footer.contains("Obrigado pela preferência &amp; volte sempre"));
    assert!(footer.contains("<img src=\"data:image/png;base64,iVBORw0KGgo"));
}

#[test]
fn footer_without_notes_or_qr() {
    let html = render(MINIMAL);
    let footer = section(&html, "DADOS DA NFC-e").join("\n");
    assert!(footer.contains("3524 0198 7654 3200 0110 6500 2000 0000 4510 0000 0459"));
    assert!(!footer.contains("Informações de interesse do contribuinte"));
    assert!(!footer.contains("<img"));
}

#[test]
fn zero_approximate_taxes_are_suppressed() {
    let html = render(MINIMAL);
    assert!(!html.contains("Lei Federal 12.741"));
}

#[test]
fn negative_discount_is_suppressed() {
    let xml = FULL.replace("<vDesc>1.00</vDesc>\n          <vII>", "<vDesc>-1.00</vDesc>\n          <vII>");
    assert!(!render(&xml).contains("Desconto:"));
}

// ---------------------------------------------------------------------------
// Determinism and sinks
// ---------------------------------------------------------------------------

#[test]
fn identical_input_identical_output() {
    assert_eq!(render(FULL), render(FULL));
    assert_eq!(render(MINIMAL), render(MINIMAL));
}

struct FailingWriter;

impl std::io::Write for FailingWriter {
    fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::other("disk full"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn sink_failure_is_io_error() {
    let env = from_xml_str(FULL).unwrap();
    let err = render_to_writer(&env, &mut FailingWriter).unwrap_err();
    assert!(matches!(err, danfe::DanfeError::Io(_)));
}
