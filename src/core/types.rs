use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::tax::{TaxBreakdown, Taxes};

/// Model code (`ide/mod`) of an NFC-e, the retail consumer receipt.
pub const RETAIL_RECEIPT_MODEL: &str = "65";

/// Number of digits in an access key (`chNFe`).
pub const ACCESS_KEY_LEN: usize = 44;

/// `nfeProc`: an authorized NF-e/NFC-e together with its protocol stamp.
///
/// Created once by decoding and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "@versao", default)]
    pub version: String,
    #[serde(rename = "NFe")]
    pub nfe: Nfe,
    #[serde(rename = "protNFe")]
    pub protocol: Protocol,
}

/// `NFe`: the signed fiscal document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nfe {
    #[serde(rename = "infNFe")]
    pub info: NfeInfo,
    /// `infNFeSupl`: consumer-facing QR code data (NFC-e only).
    #[serde(rename = "infNFeSupl", default)]
    pub supplement: Option<Supplement>,
}

/// `infNFe`: document content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NfeInfo {
    /// `Id`: "NFe" followed by the access key.
    #[serde(rename = "@Id", default)]
    pub id: String,
    #[serde(rename = "@versao", default)]
    pub version: String,
    #[serde(rename = "ide")]
    pub header: Header,
    #[serde(rename = "emit")]
    pub emitter: Emitter,
    /// `dest`: absent for an unidentified consumer.
    #[serde(rename = "dest", default)]
    pub recipient: Option<Recipient>,
    /// `det`: line items in source order.
    #[serde(rename = "det", default)]
    pub items: Vec<LineItem>,
    #[serde(rename = "total")]
    pub totals: Totals,
    #[serde(rename = "transp", default)]
    pub transport: Option<Transport>,
    #[serde(rename = "cobr", default)]
    pub billing: Option<Billing>,
    #[serde(rename = "pag", default)]
    pub payment: Payment,
    #[serde(rename = "infAdic", default)]
    pub additional_info: Option<AdditionalInfo>,
}

/// `ide`: identification of the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Header {
    /// `cUF`: IBGE code of the emitter's state.
    #[serde(rename = "cUF", default)]
    pub state_code: String,
    /// `cNF`: random numeric code that composes the access key.
    #[serde(rename = "cNF", default)]
    pub numeric_code: String,
    /// `natOp`: nature of the operation.
    #[serde(rename = "natOp", default)]
    pub operation_nature: String,
    /// `mod`: 55 for NF-e, 65 for NFC-e.
    #[serde(rename = "mod", default)]
    pub model: String,
    #[serde(rename = "serie", default)]
    pub series: String,
    #[serde(rename = "nNF", default)]
    pub number: String,
    #[serde(rename = "dhEmi")]
    pub issued_at: DateTime<FixedOffset>,
    #[serde(rename = "dhSaiEnt", default)]
    pub departed_at: Option<DateTime<FixedOffset>>,
    /// `tpNF`: 0 inbound, 1 outbound.
    #[serde(rename = "tpNF", default)]
    pub operation_type: String,
    #[serde(rename = "idDest", default)]
    pub destination: String,
    #[serde(rename = "cMunFG", default)]
    pub municipality_code: String,
    /// `tpImp`: DANFE print layout (4 = NFC-e DANFE).
    #[serde(rename = "tpImp", default)]
    pub print_type: String,
    /// `tpEmis`: 1 normal, 9 offline contingency.
    #[serde(rename = "tpEmis", default)]
    pub emission_type: String,
    #[serde(rename = "cDV", default)]
    pub check_digit: String,
    /// `tpAmb`: 1 production, 2 homologation.
    #[serde(rename = "tpAmb", default)]
    pub environment: String,
    #[serde(rename = "finNFe", default)]
    pub purpose: String,
    #[serde(rename = "indFinal", default)]
    pub final_consumer: String,
    #[serde(rename = "indPres", default)]
    pub presence: String,
    #[serde(rename = "procEmi", default)]
    pub emission_process: String,
    #[serde(rename = "verProc", default)]
    pub process_version: String,
    /// `dhCont`: when contingency mode was entered.
    #[serde(rename = "dhCont", default)]
    pub contingency_at: Option<DateTime<FixedOffset>>,
    /// `xJust`: reason for contingency.
    #[serde(rename = "xJust", default)]
    pub contingency_reason: Option<String>,
}

/// `emit`: the seller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Emitter {
    #[serde(rename = "CNPJ", default)]
    pub cnpj: String,
    #[serde(rename = "CPF", default)]
    pub cpf: Option<String>,
    #[serde(rename = "xNome", default)]
    pub name: String,
    #[serde(rename = "xFant", default)]
    pub trade_name: Option<String>,
    #[serde(rename = "enderEmit")]
    pub address: Address,
    /// `IE`: state registration.
    #[serde(rename = "IE", default)]
    pub state_registration: String,
    /// `CRT`: tax regime (1 Simples Nacional, 3 normal).
    #[serde(rename = "CRT", default)]
    pub tax_regime: String,
}

/// `enderEmit` / `enderDest`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "xLgr", default)]
    pub street: String,
    #[serde(rename = "nro", default)]
    pub number: String,
    #[serde(rename = "xCpl", default)]
    pub complement: Option<String>,
    #[serde(rename = "xBairro", default)]
    pub district: String,
    #[serde(rename = "cMun", default)]
    pub municipality_code: String,
    #[serde(rename = "xMun", default)]
    pub municipality: String,
    #[serde(rename = "UF", default)]
    pub state: String,
    #[serde(rename = "CEP", default)]
    pub postal_code: String,
    #[serde(rename = "cPais", default)]
    pub country_code: Option<String>,
    #[serde(rename = "xPais", default)]
    pub country: Option<String>,
    #[serde(rename = "fone", default)]
    pub phone: Option<String>,
}

/// `dest`: the consumer, when identified.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recipient {
    #[serde(rename = "CNPJ", default)]
    pub cnpj: Option<String>,
    #[serde(rename = "CPF", default)]
    pub cpf: Option<String>,
    #[serde(rename = "idEstrangeiro", default)]
    pub foreign_id: Option<String>,
    #[serde(rename = "xNome", default)]
    pub name: Option<String>,
    #[serde(rename = "enderDest", default)]
    pub address: Option<Address>,
    #[serde(rename = "indIEDest", default)]
    pub state_registration_indicator: Option<String>,
    #[serde(rename = "email", default)]
    pub email: Option<String>,
}

impl Recipient {
    /// CNPJ, CPF or foreign ID, whichever is present and non-empty.
    pub fn tax_id(&self) -> Option<&str> {
        [&self.cnpj, &self.cpf, &self.foreign_id]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
    }
}

/// `det`: one line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// `nItem`: item number as written in the document.
    #[serde(rename = "@nItem", default)]
    pub number: String,
    #[serde(rename = "prod")]
    pub product: Product,
    #[serde(rename = "imposto")]
    pub taxes: Taxes,
    #[serde(rename = "infAdProd", default)]
    pub additional_info: Option<String>,
}

/// `prod`: product or service sold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "cProd", default)]
    pub code: String,
    #[serde(rename = "cEAN", default)]
    pub gtin: Option<String>,
    #[serde(rename = "xProd", default)]
    pub description: String,
    #[serde(rename = "NCM", default)]
    pub ncm: String,
    #[serde(rename = "CEST", default)]
    pub cest: Option<String>,
    #[serde(rename = "CFOP", default)]
    pub cfop: String,
    #[serde(rename = "uCom", default)]
    pub unit: String,
    #[serde(rename = "qCom", with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
    #[serde(rename = "vUnCom", with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
    #[serde(rename = "vProd", with = "rust_decimal::serde::str")]
    pub total: Decimal,
    #[serde(rename = "cEANTrib", default)]
    pub taxable_gtin: Option<String>,
    #[serde(rename = "uTrib", default)]
    pub taxable_unit: String,
    #[serde(rename = "qTrib", default, with = "rust_decimal::serde::str")]
    pub taxable_quantity: Decimal,
    #[serde(rename = "vUnTrib", default, with = "rust_decimal::serde::str")]
    pub taxable_unit_price: Decimal,
    #[serde(rename = "vFrete", default, with = "rust_decimal::serde::str_option")]
    pub freight: Option<Decimal>,
    #[serde(rename = "vSeg", default, with = "rust_decimal::serde::str_option")]
    pub insurance: Option<Decimal>,
    #[serde(rename = "vDesc", default, with = "rust_decimal::serde::str_option")]
    pub discount: Option<Decimal>,
    #[serde(rename = "vOutro", default, with = "rust_decimal::serde::str_option")]
    pub other: Option<Decimal>,
    /// `indTot`: 1 when `vProd` counts towards the document total.
    #[serde(rename = "indTot", default)]
    pub total_indicator: String,
}

/// `total`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Totals {
    #[serde(rename = "ICMSTot")]
    pub icms: IcmsTotals,
}

/// `ICMSTot`: document totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IcmsTotals {
    #[serde(rename = "vBC", default, with = "rust_decimal::serde::str")]
    pub icms_base: Decimal,
    #[serde(rename = "vICMS", default, with = "rust_decimal::serde::str")]
    pub icms: Decimal,
    #[serde(rename = "vICMSDeson", default, with = "rust_decimal::serde::str")]
    pub icms_relieved: Decimal,
    #[serde(rename = "vFCPUFDest", default, with = "rust_decimal::serde::str_option")]
    pub fcp_destination: Option<Decimal>,
    #[serde(rename = "vICMSUFDest", default, with = "rust_decimal::serde::str_option")]
    pub icms_destination: Option<Decimal>,
    #[serde(rename = "vICMSUFRemet", default, with = "rust_decimal::serde::str_option")]
    pub icms_origin: Option<Decimal>,
    #[serde(rename = "vFCP", default, with = "rust_decimal::serde::str_option")]
    pub fcp: Option<Decimal>,
    #[serde(rename = "vBCST", default, with = "rust_decimal::serde::str")]
    pub st_base: Decimal,
    #[serde(rename = "vST", default, with = "rust_decimal::serde::str")]
    pub st: Decimal,
    #[serde(rename = "vFCPST", default, with = "rust_decimal::serde::str_option")]
    pub fcp_st: Option<Decimal>,
    #[serde(rename = "vFCPSTRet", default, with = "rust_decimal::serde::str_option")]
    pub fcp_st_retained: Option<Decimal>,
    #[serde(rename = "vProd", default, with = "rust_decimal::serde::str")]
    pub products: Decimal,
    #[serde(rename = "vFrete", default, with = "rust_decimal::serde::str")]
    pub freight: Decimal,
    #[serde(rename = "vSeg", default, with = "rust_decimal::serde::str")]
    pub insurance: Decimal,
    #[serde(rename = "vDesc", default, with = "rust_decimal::serde::str")]
    pub discount: Decimal,
    #[serde(rename = "vII", default, with = "rust_decimal::serde::str")]
    pub import_tax: Decimal,
    #[serde(rename = "vIPI", default, with = "rust_decimal::serde::str")]
    pub ipi: Decimal,
    #[serde(rename = "vIPIDevol", default, with = "rust_decimal::serde::str_option")]
    pub ipi_returned: Option<Decimal>,
    #[serde(rename = "vPIS", default, with = "rust_decimal::serde::str")]
    pub pis: Decimal,
    #[serde(rename = "vCOFINS", default, with = "rust_decimal::serde::str")]
    pub cofins: Decimal,
    #[serde(rename = "vOutro", default, with = "rust_decimal::serde::str")]
    pub other: Decimal,
    /// `vNF`: amount the consumer pays.
    #[serde(rename = "vNF", default, with = "rust_decimal::serde::str")]
    pub grand_total: Decimal,
    /// `vTotTrib`: approximate tax burden (Lei 12.741/2012).
    #[serde(rename = "vTotTrib", default, with = "rust_decimal::serde::str_option")]
    pub approximate_taxes: Option<Decimal>,
}

/// `transp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transport {
    /// `modFrete`: 9 means no freight, the usual value for NFC-e.
    #[serde(rename = "modFrete", default)]
    pub freight_mode: String,
    #[serde(rename = "transporta", default)]
    pub carrier: Option<Carrier>,
    #[serde(rename = "veicTransp", default)]
    pub vehicle: Option<Vehicle>,
    #[serde(rename = "vol", default)]
    pub volumes: Vec<Volume>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Carrier {
    #[serde(rename = "CNPJ", default)]
    pub cnpj: Option<String>,
    #[serde(rename = "CPF", default)]
    pub cpf: Option<String>,
    #[serde(rename = "xNome", default)]
    pub name: Option<String>,
    #[serde(rename = "IE", default)]
    pub state_registration: Option<String>,
    #[serde(rename = "xEnder", default)]
    pub address: Option<String>,
    #[serde(rename = "xMun", default)]
    pub municipality: Option<String>,
    #[serde(rename = "UF", default)]
    pub state: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(rename = "placa", default)]
    pub plate: String,
    #[serde(rename = "UF", default)]
    pub state: String,
    #[serde(rename = "RNTC", default)]
    pub rntc: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Volume {
    #[serde(rename = "qVol", default)]
    pub quantity: Option<String>,
    #[serde(rename = "esp", default)]
    pub kind: Option<String>,
    #[serde(rename = "marca", default)]
    pub brand: Option<String>,
    #[serde(rename = "nVol", default)]
    pub numbering: Option<String>,
    #[serde(rename = "pesoL", default, with = "rust_decimal::serde::str_option")]
    pub net_weight: Option<Decimal>,
    #[serde(rename = "pesoB", default, with = "rust_decimal::serde::str_option")]
    pub gross_weight: Option<Decimal>,
}

/// `cobr`: invoice and instalments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Billing {
    #[serde(rename = "fat", default)]
    pub invoice: Option<BillingInvoice>,
    #[serde(rename = "dup", default)]
    pub instalments: Vec<Instalment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingInvoice {
    #[serde(rename = "nFat", default)]
    pub number: Option<String>,
    #[serde(rename = "vOrig", default, with = "rust_decimal::serde::str_option")]
    pub original: Option<Decimal>,
    #[serde(rename = "vDesc", default, with = "rust_decimal::serde::str_option")]
    pub discount: Option<Decimal>,
    #[serde(rename = "vLiq", default, with = "rust_decimal::serde::str_option")]
    pub net: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instalment {
    #[serde(rename = "nDup", default)]
    pub number: Option<String>,
    #[serde(rename = "dVenc", default)]
    pub due_date: Option<NaiveDate>,
    #[serde(rename = "vDup", default, with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

/// `pag`: tendered payments and change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "detPag", default)]
    pub details: Vec<PaymentDetail>,
    /// `vTroco`: change given back to the consumer.
    #[serde(rename = "vTroco", default, with = "rust_decimal::serde::str")]
    pub change: Decimal,
}

/// `detPag`: one tendered amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentDetail {
    /// `indPag`: 0 cash sale, 1 instalments.
    #[serde(rename = "indPag", default)]
    pub indicator: Option<String>,
    /// `tPag`: two-digit method code, see [`PaymentMethod`](super::PaymentMethod).
    #[serde(rename = "tPag", default)]
    pub method: String,
    /// `xPag`: free-text description, used with method 99.
    #[serde(rename = "xPag", default)]
    pub description: Option<String>,
    #[serde(rename = "vPag", default, with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(rename = "card", default)]
    pub card: Option<Card>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    /// `tpIntegra`: 1 integrated with the POS, 2 not integrated.
    #[serde(rename = "tpIntegra", default)]
    pub integration: String,
    #[serde(rename = "CNPJ", default)]
    pub acquirer_cnpj: Option<String>,
    #[serde(rename = "tBand", default)]
    pub brand: Option<String>,
    #[serde(rename = "cAut", default)]
    pub authorization: Option<String>,
}

/// `infAdic`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdditionalInfo {
    #[serde(rename = "infAdFisco", default)]
    pub fiscal: Option<String>,
    /// `infCpl`: notes of interest to the taxpayer.
    #[serde(rename = "infCpl", default)]
    pub complementary: Option<String>,
}

/// `infNFeSupl`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplement {
    #[serde(rename = "qrCode", default)]
    pub qr_code: String,
    /// `urlChave`: page where the consumer can look the key up.
    #[serde(rename = "urlChave", default)]
    pub consultation_url: String,
}

/// `protNFe`: authorization returned by the tax authority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Protocol {
    #[serde(rename = "@versao", default)]
    pub version: String,
    #[serde(rename = "infProt")]
    pub info: ProtocolInfo,
}

/// `infProt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolInfo {
    #[serde(rename = "tpAmb", default)]
    pub environment: String,
    #[serde(rename = "verAplic", default)]
    pub application_version: String,
    /// `chNFe`: 44-digit access key.
    #[serde(rename = "chNFe", default)]
    pub access_key: String,
    #[serde(rename = "dhRecbto")]
    pub received_at: DateTime<FixedOffset>,
    #[serde(rename = "nProt", default)]
    pub number: String,
    #[serde(rename = "digVal", default)]
    pub digest: String,
    /// `cStat`: 100 means authorized.
    #[serde(rename = "cStat", default)]
    pub status: String,
    #[serde(rename = "xMotivo", default)]
    pub reason: String,
}

impl Envelope {
    /// True iff the model code is `"65"` (NFC-e).
    pub fn is_retail_receipt(&self) -> bool {
        self.nfe.info.header.model == RETAIL_RECEIPT_MODEL
    }

    /// Access key from the protocol stamp, or the digits of `infNFe/@Id`
    /// when the stamp carries none.
    pub fn access_key(&self) -> &str {
        let key = self.protocol.info.access_key.trim();
        if !key.is_empty() {
            return key;
        }
        let id = self.nfe.info.id.trim();
        id.strip_prefix("NFe").unwrap_or(id)
    }

    /// QR code URL, or an empty string if `infNFeSupl` is absent.
    pub fn qr_code_payload(&self) -> &str {
        self.nfe
            .supplement
            .as_ref()
            .map(|s| s.qr_code.trim())
            .unwrap_or("")
    }

    /// `urlChave`, or an empty string if `infNFeSupl` is absent.
    pub fn consultation_url(&self) -> &str {
        self.nfe
            .supplement
            .as_ref()
            .map(|s| s.consultation_url.trim())
            .unwrap_or("")
    }

    /// `vNF`: the document grand total.
    pub fn total_value(&self) -> Decimal {
        self.nfe.info.totals.icms.grand_total
    }

    pub fn number(&self) -> &str {
        &self.nfe.info.header.number
    }

    pub fn series(&self) -> &str {
        &self.nfe.info.header.series
    }

    pub fn issued_at(&self) -> DateTime<FixedOffset> {
        self.nfe.info.header.issued_at
    }

    /// Issued in the homologation (test) environment, without fiscal value.
    pub fn is_homologation(&self) -> bool {
        self.nfe.info.header.environment == "2"
    }

    /// Issued offline in contingency, pending authorization.
    pub fn is_contingency(&self) -> bool {
        self.nfe.info.header.emission_type == "9"
    }

    /// ICMS, IPI, PIS and COFINS amounts declared on the items.
    pub fn tax_breakdown(&self) -> TaxBreakdown {
        let mut breakdown = TaxBreakdown::default();
        for item in &self.nfe.info.items {
            breakdown.add(&item.taxes);
        }
        breakdown
    }
}

/// Whether `key` is a 44-digit access key.
pub fn is_valid_access_key(key: &str) -> bool {
    key.len() == ACCESS_KEY_LEN && key.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_key_shape() {
        assert!(is_valid_access_key(
            "35240112345678000199650010000001231000001234"
        ));
        assert!(!is_valid_access_key("3524011234567800019965001000000123100000123"));
        assert!(!is_valid_access_key(
            "3524011234567800019965001000000123100000123X"
        ));
        assert!(!is_valid_access_key(""));
    }

    #[test]
    fn recipient_tax_id_prefers_first_non_empty() {
        let r = Recipient {
            cnpj: Some("  ".into()),
            cpf: Some("12345678909".into()),
            ..Default::default()
        };
        assert_eq!(r.tax_id(), Some("12345678909"));
        assert_eq!(Recipient::default().tax_id(), None);
    }
}
