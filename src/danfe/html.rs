use std::borrow::Cow;
use std::fmt::{self, Write as _};

use quick_xml::escape::escape;
use rust_decimal::Decimal;
use tracing::debug;

use super::qr::qr_data_uri;
use crate::core::*;

/// Printed when the document has no identified consumer.
pub const UNIDENTIFIED_CONSUMER: &str = "CONSUMIDOR NÃO IDENTIFICADO";

const HOMOLOGATION_WARNING: &str = "EMITIDA EM AMBIENTE DE HOMOLOGAÇÃO - SEM VALOR FISCAL";
const CONTINGENCY_WARNING: &str = "EMITIDA EM CONTINGÊNCIA";

/// Render the DANFE NFC-e for an 80mm thermal printer.
///
/// Output is deterministic for a given envelope. Content never makes this
/// fail: missing or odd values degrade to placeholders or passthrough.
pub fn render_html(envelope: &Envelope) -> Result<String, DanfeError> {
    let mut out = String::with_capacity(16 * 1024);
    write_document(&mut out, envelope)
        .map_err(|_| DanfeError::Io(std::io::Error::other("HTML formatting failed")))?;
    debug!(
        number = %envelope.number(),
        bytes = out.len(),
        "rendered DANFE HTML"
    );
    Ok(out)
}

/// Render the DANFE into `writer`. Fails only if the writer does.
pub fn render_to_writer<W: std::io::Write>(
    envelope: &Envelope,
    writer: &mut W,
) -> Result<(), DanfeError> {
    let html = render_html(envelope)?;
    writer.write_all(html.as_bytes())?;
    writer.flush()?;
    Ok(())
}

fn esc(s: &str) -> Cow<'_, str> {
    escape(s)
}

/// Conditional rows use a strict `> 0` test, so negative values are
/// suppressed as well.
fn is_positive(value: Decimal) -> bool {
    value > Decimal::ZERO
}

fn write_document(out: &mut String, envelope: &Envelope) -> fmt::Result {
    let info = &envelope.nfe.info;

    out.push_str("<!DOCTYPE html>\n<html lang=\"pt-br\">\n<head>\n");
    out.push_str("<meta charset=\"UTF-8\">\n");
    out.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    writeln!(out, "<title>DANFE NFC-e {}</title>", esc(envelope.number()))?;
    writeln!(out, "<style>{STYLE}</style>")?;
    out.push_str("</head>\n<body>\n<div class=\"danfe\">\n");

    write_header(out, &info.emitter)?;

    if envelope.is_homologation() {
        writeln!(out, "<div class=\"warning\">{HOMOLOGATION_WARNING}</div>")?;
    }
    if envelope.is_contingency() {
        writeln!(out, "<div class=\"warning\">{CONTINGENCY_WARNING}</div>")?;
    }

    write_items(out, &info.items)?;
    write_totals(out, info.items.len(), &info.totals.icms)?;
    write_payment(out, &info.payment)?;
    write_consumer(out, info.recipient.as_ref())?;

    writeln!(
        out,
        "<div class=\"nfce-info\">NFC-e Nº {} Série {}<br>Emissão: {}</div>",
        esc(envelope.number()),
        esc(envelope.series()),
        format_datetime(&envelope.issued_at())
    )?;

    write_footer(out, envelope)?;
    write_qr_code(out, envelope.qr_code_payload())?;

    out.push_str("</div>\n</body>\n</html>\n");
    Ok(())
}

fn write_header(out: &mut String, emitter: &Emitter) -> fmt::Result {
    let addr = &emitter.address;

    out.push_str("<div class=\"header\">\n");
    writeln!(out, "<div class=\"company-name\">{}</div>", esc(&emitter.name))?;
    match emitter.cpf.as_deref().filter(|_| emitter.cnpj.is_empty()) {
        Some(cpf) => writeln!(out, "<div class=\"cnpj\">CPF: {}</div>", esc(&format_cpf(cpf)))?,
        None => writeln!(
            out,
            "<div class=\"cnpj\">CNPJ: {}</div>",
            esc(&format_cnpj(&emitter.cnpj))
        )?,
    }

    write!(
        out,
        "<div class=\"address\">{}, {}",
        esc(&addr.street),
        esc(&addr.number)
    )?;
    if let Some(complement) = addr.complement.as_deref().filter(|c| !c.trim().is_empty()) {
        write!(out, " - {}", esc(complement))?;
    }
    writeln!(
        out,
        "<br>{}, {}-{}<br>CEP: {}</div>",
        esc(&addr.district),
        esc(&addr.municipality),
        esc(&addr.state),
        esc(&format_cep(&addr.postal_code))
    )?;

    out.push_str("<div class=\"document-title\">DANFE NFC-e</div>\n");
    out.push_str(
        "<div class=\"document-subtitle\">Documento Auxiliar da Nota Fiscal de Consumidor Eletrônica</div>\n",
    );
    out.push_str("</div>\n");
    Ok(())
}

fn write_items(out: &mut String, items: &[LineItem]) -> fmt::Result {
    out.push_str("<div class=\"section-title\">ITENS</div>\n");
    for (index, item) in items.iter().enumerate() {
        let prod = &item.product;
        out.push_str("<div class=\"item\">\n<div class=\"item-line\">");
        write!(
            out,
            "<span class=\"item-code\">{:02} - {}</span>",
            index + 1,
            esc(&prod.code)
        )?;
        write!(
            out,
            "<span class=\"item-values\">{}{} x {} = {}</span>",
            format_quantity(prod.quantity),
            esc(&prod.unit),
            format_currency(prod.unit_price),
            format_currency(prod.total)
        )?;
        writeln!(
            out,
            "</div>\n<div class=\"item-desc\">{}</div>\n</div>",
            esc(&prod.description)
        )?;
    }
    Ok(())
}

fn write_row(out: &mut String, class: &str, label: &str, value: &str) -> fmt::Result {
    writeln!(
        out,
        "<div class=\"{class}\"><span>{}</span><span>{}</span></div>",
        esc(label),
        esc(value)
    )
}

fn write_totals(out: &mut String, item_count: usize, totals: &IcmsTotals) -> fmt::Result {
    out.push_str("<div class=\"section-title\">TOTAIS</div>\n<div class=\"totals\">\n");
    write_row(out, "total-line", "Qtde itens:", &item_count.to_string())?;
    write_row(
        out,
        "total-line",
        "Valor total:",
        &format_currency(totals.products),
    )?;
    if is_positive(totals.discount) {
        write_row(
            out,
            "total-line",
            "Desconto:",
            &format_currency(totals.discount),
        )?;
    }
    if is_positive(totals.other) {
        write_row(
            out,
            "total-line",
            "Outros valores:",
            &format_currency(totals.other),
        )?;
    }
    write_row(
        out,
        "total-line total-final",
        "TOTAL A PAGAR:",
        &format_currency(totals.grand_total),
    )?;
    if let Some(taxes) = totals.approximate_taxes.filter(|t| is_positive(*t)) {
        write_row(
            out,
            "total-line taxes",
            "Tributos totais incidentes (Lei Federal 12.741/2012):",
            &format_currency(taxes),
        )?;
    }
    out.push_str("</div>\n");
    Ok(())
}

fn payment_label(detail: &PaymentDetail) -> Cow<'_, str> {
    let method = PaymentMethod::from_code(&detail.method);
    match detail.description.as_deref().map(str::trim) {
        Some(text) if method == PaymentMethod::Other && !text.is_empty() => Cow::Borrowed(text),
        _ => Cow::Borrowed(method.description()),
    }
}

fn write_payment(out: &mut String, payment: &Payment) -> fmt::Result {
    out.push_str("<div class=\"section-title\">PAGAMENTO</div>\n<div class=\"payment\">\n");
    for detail in &payment.details {
        let label = format!("{}:", payment_label(detail));
        write_row(out, "payment-line", &label, &format_currency(detail.amount))?;
    }
    if is_positive(payment.change) {
        write_row(
            out,
            "payment-line",
            "Troco:",
            &format_currency(payment.change),
        )?;
    }
    out.push_str("</div>\n");
    Ok(())
}

/// `(label, formatted id)` for the consumer's CNPJ, CPF or foreign ID.
fn consumer_id(recipient: &Recipient) -> Option<(&'static str, String)> {
    let non_empty = |v: &Option<String>| {
        v.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    if let Some(cnpj) = non_empty(&recipient.cnpj) {
        return Some(("CNPJ", format_cnpj(&cnpj)));
    }
    if let Some(cpf) = non_empty(&recipient.cpf) {
        return Some(("CPF", format_cpf(&cpf)));
    }
    non_empty(&recipient.foreign_id).map(|id| ("ID Estrangeiro", id))
}

fn write_consumer(out: &mut String, recipient: Option<&Recipient>) -> fmt::Result {
    out.push_str("<div class=\"section-title\">CONSUMIDOR</div>\n<div class=\"consumer\">\n");

    let name = recipient
        .and_then(|r| r.name.as_deref())
        .map(str::trim)
        .filter(|n| !n.is_empty());
    let id = recipient.and_then(consumer_id);

    if name.is_none() && id.is_none() {
        writeln!(out, "{UNIDENTIFIED_CONSUMER}")?;
    }
    if let Some((label, value)) = &id {
        writeln!(out, "CONSUMIDOR - {label} {}<br>", esc(value))?;
    }
    if let Some(name) = name {
        writeln!(out, "{}", esc(name))?;
    }

    out.push_str("</div>\n");
    Ok(())
}

fn write_footer(out: &mut String, envelope: &Envelope) -> fmt::Result {
    let prot = &envelope.protocol.info;

    out.push_str("<div class=\"section-title\">DADOS DA NFC-e</div>\n<div class=\"footer\">\n");
    writeln!(out, "Protocolo: {}<br>", esc(&prot.number))?;
    writeln!(out, "Autorização: {}<br>", format_datetime(&prot.received_at))?;

    let url = envelope.consultation_url();
    if !url.is_empty() {
        writeln!(
            out,
            "Consulte pela Chave de Acesso em<br><span class=\"url\">{}</span>",
            esc(url)
        )?;
    }
    writeln!(
        out,
        "<div class=\"key\">{}</div>",
        esc(&format_access_key(envelope.access_key()))
    )?;

    let notes = envelope
        .nfe
        .info
        .additional_info
        .as_ref()
        .and_then(|a| a.complementary.as_deref())
        .map(str::trim)
        .filter(|n| !n.is_empty());
    if let Some(notes) = notes {
        writeln!(
            out,
            "<div class=\"notes\"><strong>Informações de interesse do contribuinte:</strong><br>{}</div>",
            esc(notes)
        )?;
    }

    out.push_str("</div>\n");
    Ok(())
}

fn write_qr_code(out: &mut String, payload: &str) -> fmt::Result {
    if payload.is_empty() {
        return Ok(());
    }
    let Some(uri) = qr_data_uri(payload) else {
        return Ok(());
    };
    writeln!(
        out,
        "<div class=\"qr-code\">\n<img src=\"{uri}\" alt=\"QR Code\">\n<div class=\"qr-text\">Consulta via leitor de QR Code</div>\n</div>"
    )
}

const STYLE: &str = r#"
@page { size: 80mm auto; margin: 0; }
@media print {
  body { margin: 0; padding: 0; width: 80mm; }
  .danfe { box-shadow: none; border: none; width: 80mm; max-width: 80mm; }
}
body { font-family: Arial, sans-serif; font-size: 8px; line-height: 1.2; margin: 0; padding: 0; background: #fff; width: 80mm; max-width: 80mm; }
.danfe { width: 80mm; max-width: 80mm; margin: 0; padding: 2mm; box-sizing: border-box; background: #fff; }
.header { text-align: center; margin-bottom: 4px; }
.company-name { font-weight: bold; font-size: 14px; margin-bottom: 1px; }
.cnpj { font-weight: bold; font-size: 12px; margin-bottom: 1px; }
.address { font-size: 11px; line-height: 1.0; margin-bottom: 1px; }
.document-title { font-weight: bold; font-size: 13px; margin: 4px 0 2px 0; }
.document-subtitle { font-size: 10px; margin-bottom: 4px; }
.warning { font-weight: bold; font-size: 10px; text-align: center; margin: 2px 0; }
.section-title { font-weight: bold; font-size: 11px; text-align: center; margin: 4px 0 2px 0; padding: 1px 0; border-top: 1px dashed #333; border-bottom: 1px dashed #333; }
.item { font-size: 10px; margin-bottom: 3px; }
.item-line { display: flex; justify-content: space-between; align-items: center; font-weight: bold; margin-bottom: 1px; }
.item-values { text-align: right; }
.totals, .payment, .consumer, .nfce-info { font-size: 10px; margin-bottom: 4px; }
.total-line, .payment-line { display: flex; justify-content: space-between; }
.total-final { font-weight: bold; font-size: 11px; border-top: 1px solid #333; padding-top: 1px; }
.taxes { font-size: 9px; }
.footer { text-align: center; font-size: 10px; margin-bottom: 4px; }
.url { word-break: break-all; }
.key { word-break: break-all; font-size: 9px; margin: 2px 0; }
.notes { margin-top: 8px; font-size: 10px; }
.qr-code { text-align: center; padding: 2px; margin-top: 4px; }
.qr-code img { width: 20mm; height: 20mm; border: 1px solid #ddd; }
.qr-text { font-size: 9px; color: #666; margin-top: 1px; }
"#;
