//! Per-item tax blocks (`imposto`).
//!
//! ICMS, IPI, PIS and COFINS each carry exactly one calculation variant,
//! selected by the child element name (`ICMS00`, `PISAliq`, ...). They are
//! modelled as closed enums so every consumer has to match all variants.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// `imposto`: taxes attached to one line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Taxes {
    /// `vTotTrib`: approximate total tax burden (Lei 12.741/2012).
    #[serde(
        rename = "vTotTrib",
        default,
        with = "rust_decimal::serde::str_option"
    )]
    pub approximate_total: Option<Decimal>,
    #[serde(rename = "ICMS", default)]
    pub icms: Option<IcmsBlock>,
    #[serde(rename = "IPI", default)]
    pub ipi: Option<IpiBlock>,
    #[serde(rename = "PIS", default)]
    pub pis: Option<PisBlock>,
    #[serde(rename = "PISST", default)]
    pub pis_st: Option<PisSt>,
    #[serde(rename = "COFINS", default)]
    pub cofins: Option<CofinsBlock>,
    #[serde(rename = "COFINSST", default)]
    pub cofins_st: Option<CofinsSt>,
}

/// Declared tax amounts summed over a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub icms: Decimal,
    pub ipi: Decimal,
    pub pis: Decimal,
    pub cofins: Decimal,
}

impl TaxBreakdown {
    /// Add one item's declared amounts.
    pub fn add(&mut self, taxes: &Taxes) {
        if let Some(block) = &taxes.icms {
            self.icms += block.variant.amount();
        }
        if let Some(block) = &taxes.ipi {
            self.ipi += block.variant.amount();
        }
        if let Some(block) = &taxes.pis {
            self.pis += block.variant.amount();
        }
        if let Some(block) = &taxes.cofins {
            self.cofins += block.variant.amount();
        }
    }

    pub fn total(&self) -> Decimal {
        self.icms + self.ipi + self.pis + self.cofins
    }
}

// ---------------------------------------------------------------------------
// ICMS
// ---------------------------------------------------------------------------

/// `ICMS`: wrapper element holding exactly one ICMS variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcmsBlock {
    #[serde(rename = "$value")]
    pub variant: Icms,
}

/// ICMS calculation variants. CST variants apply to the normal regime,
/// CSOSN (`ICMSSN*`) variants to Simples Nacional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Icms {
    /// 00: fully taxed.
    #[serde(rename = "ICMS00")]
    Icms00(Icms00),
    /// 02: single-phase own tax on fuel.
    #[serde(rename = "ICMS02")]
    Icms02(IcmsMono),
    /// 10: taxed, with ST collection.
    #[serde(rename = "ICMS10")]
    Icms10(IcmsWithSt),
    /// 15: single-phase own tax with retention on fuel.
    #[serde(rename = "ICMS15")]
    Icms15(IcmsMono),
    /// 20: reduced base.
    #[serde(rename = "ICMS20")]
    Icms20(IcmsReduced),
    /// 30: exempt or untaxed, with ST collection.
    #[serde(rename = "ICMS30")]
    Icms30(IcmsStOnly),
    /// 40/41/50: exempt, untaxed or suspended.
    #[serde(rename = "ICMS40")]
    Icms40(IcmsExempt),
    /// 51: deferred.
    #[serde(rename = "ICMS51")]
    Icms51(IcmsDeferred),
    /// 53: single-phase tax with deferral on fuel.
    #[serde(rename = "ICMS53")]
    Icms53(IcmsMono),
    /// 60: previously collected by ST.
    #[serde(rename = "ICMS60")]
    Icms60(IcmsRetained),
    /// 61: single-phase tax previously collected on fuel.
    #[serde(rename = "ICMS61")]
    Icms61(IcmsMono),
    /// 70: reduced base, with ST collection.
    #[serde(rename = "ICMS70")]
    Icms70(IcmsWithSt),
    /// 90: other.
    #[serde(rename = "ICMS90")]
    Icms90(IcmsWithSt),
    /// Shared between origin and destination states.
    #[serde(rename = "ICMSPart")]
    IcmsPart(IcmsPart),
    /// ST repassed to the destination state.
    #[serde(rename = "ICMSST")]
    IcmsSt(IcmsStTransfer),
    /// CSOSN 101: Simples Nacional with credit.
    #[serde(rename = "ICMSSN101")]
    Sn101(IcmsSnCredit),
    /// CSOSN 102/103/300/400: Simples Nacional without credit.
    #[serde(rename = "ICMSSN102")]
    Sn102(IcmsSnPlain),
    /// CSOSN 201: with credit and ST collection.
    #[serde(rename = "ICMSSN201")]
    Sn201(IcmsSnWithSt),
    /// CSOSN 202/203: without credit, with ST collection.
    #[serde(rename = "ICMSSN202")]
    Sn202(IcmsSnWithSt),
    /// CSOSN 500: previously collected by ST or anticipation.
    #[serde(rename = "ICMSSN500")]
    Sn500(IcmsSnRetained),
    /// CSOSN 900: other.
    #[serde(rename = "ICMSSN900")]
    Sn900(IcmsSnOther),
}

impl Icms {
    /// CST for the normal regime, CSOSN for Simples Nacional.
    pub fn situation_code(&self) -> &str {
        match self {
            Self::Icms00(v) => &v.cst,
            Self::Icms02(v) | Self::Icms15(v) | Self::Icms53(v) | Self::Icms61(v) => &v.cst,
            Self::Icms10(v) | Self::Icms70(v) | Self::Icms90(v) => &v.cst,
            Self::Icms20(v) => &v.cst,
            Self::Icms30(v) => &v.cst,
            Self::Icms40(v) => &v.cst,
            Self::Icms51(v) => &v.cst,
            Self::Icms60(v) => &v.cst,
            Self::IcmsPart(v) => &v.cst,
            Self::IcmsSt(v) => &v.cst,
            Self::Sn101(v) => &v.csosn,
            Self::Sn102(v) => &v.csosn,
            Self::Sn201(v) | Self::Sn202(v) => &v.csosn,
            Self::Sn500(v) => &v.csosn,
            Self::Sn900(v) => &v.csosn,
        }
    }

    /// `orig`: merchandise origin code.
    pub fn origin(&self) -> &str {
        match self {
            Self::Icms00(v) => &v.origin,
            Self::Icms02(v) | Self::Icms15(v) | Self::Icms53(v) | Self::Icms61(v) => &v.origin,
            Self::Icms10(v) | Self::Icms70(v) | Self::Icms90(v) => &v.origin,
            Self::Icms20(v) => &v.origin,
            Self::Icms30(v) => &v.origin,
            Self::Icms40(v) => &v.origin,
            Self::Icms51(v) => &v.origin,
            Self::Icms60(v) => &v.origin,
            Self::IcmsPart(v) => &v.origin,
            Self::IcmsSt(v) => &v.origin,
            Self::Sn101(v) => &v.origin,
            Self::Sn102(v) => &v.origin,
            Self::Sn201(v) | Self::Sn202(v) => &v.origin,
            Self::Sn500(v) => &v.origin,
            Self::Sn900(v) => &v.origin,
        }
    }

    /// Whether the variant belongs to the Simples Nacional regime.
    pub fn is_simples_nacional(&self) -> bool {
        matches!(
            self,
            Self::Sn101(_)
                | Self::Sn102(_)
                | Self::Sn201(_)
                | Self::Sn202(_)
                | Self::Sn500(_)
                | Self::Sn900(_)
        )
    }

    /// Own ICMS amount declared on the item. ST amounts are not included.
    pub fn amount(&self) -> Decimal {
        let declared = match self {
            Self::Icms00(v) => Some(v.amount),
            Self::Icms02(v) | Self::Icms15(v) | Self::Icms53(v) => v.mono_amount,
            Self::Icms61(_) => None,
            Self::Icms10(v) | Self::Icms70(v) | Self::Icms90(v) => v.amount,
            Self::Icms20(v) => Some(v.amount),
            Self::Icms30(_) | Self::Icms40(_) | Self::Icms60(_) | Self::IcmsSt(_) => None,
            Self::Icms51(v) => v.amount,
            Self::IcmsPart(v) => Some(v.amount),
            Self::Sn101(_) | Self::Sn102(_) | Self::Sn201(_) | Self::Sn202(_) | Self::Sn500(_) => {
                None
            }
            Self::Sn900(v) => v.amount,
        };
        declared.unwrap_or_default()
    }
}

/// ICMS00.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Icms00 {
    #[serde(rename = "orig", default)]
    pub origin: String,
    #[serde(rename = "CST", default)]
    pub cst: String,
    #[serde(rename = "modBC", default)]
    pub base_mode: String,
    #[serde(rename = "vBC", default, with = "rust_decimal::serde::str")]
    pub base: Decimal,
    #[serde(rename = "pICMS", default, with = "rust_decimal::serde::str")]
    pub rate: Decimal,
    #[serde(rename = "vICMS", default, with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(rename = "pFCP", default, with = "rust_decimal::serde::str_option")]
    pub fcp_rate: Option<Decimal>,
    #[serde(rename = "vFCP", default, with = "rust_decimal::serde::str_option")]
    pub fcp_amount: Option<Decimal>,
}

/// ICMS02, ICMS15, ICMS53 and ICMS61: single-phase (monofásico) fuel taxation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcmsMono {
    #[serde(rename = "orig", default)]
    pub origin: String,
    #[serde(rename = "CST", default)]
    pub cst: String,
    #[serde(rename = "qBCMono", default, with = "rust_decimal::serde::str_option")]
    pub mono_quantity: Option<Decimal>,
    #[serde(rename = "adRemICMS", default, with = "rust_decimal::serde::str_option")]
    pub ad_rem_rate: Option<Decimal>,
    #[serde(rename = "vICMSMono", default, with = "rust_decimal::serde::str_option")]
    pub mono_amount: Option<Decimal>,
    #[serde(
        rename = "qBCMonoReten",
        default,
        with = "rust_decimal::serde::str_option"
    )]
    pub withheld_quantity: Option<Decimal>,
    #[serde(
        rename = "vICMSMonoReten",
        default,
        with = "rust_decimal::serde::str_option"
    )]
    pub withheld_amount: Option<Decimal>,
    #[serde(rename = "pDif", default, with = "rust_decimal::serde::str_option")]
    pub deferral_rate: Option<Decimal>,
    #[serde(
        rename = "vICMSMonoDif",
        default,
        with = "rust_decimal::serde::str_option"
    )]
    pub deferred_amount: Option<Decimal>,
    #[serde(
        rename = "qBCMonoRet",
        default,
        with = "rust_decimal::serde::str_option"
    )]
    pub retained_quantity: Option<Decimal>,
    #[serde(
        rename = "vICMSMonoRet",
        default,
        with = "rust_decimal::serde::str_option"
    )]
    pub retained_amount: Option<Decimal>,
}

/// ICMS10, ICMS70 and ICMS90: own ICMS plus substitution (ST).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcmsWithSt {
    #[serde(rename = "orig", default)]
    pub origin: String,
    #[serde(rename = "CST", default)]
    pub cst: String,
    #[serde(rename = "modBC", default)]
    pub base_mode: Option<String>,
    #[serde(rename = "pRedBC", default, with = "rust_decimal::serde::str_option")]
    pub base_reduction: Option<Decimal>,
    #[serde(rename = "vBC", default, with = "rust_decimal::serde::str_option")]
    pub base: Option<Decimal>,
    #[serde(rename = "pICMS", default, with = "rust_decimal::serde::str_option")]
    pub rate: Option<Decimal>,
    #[serde(rename = "vICMS", default, with = "rust_decimal::serde::str_option")]
    pub amount: Option<Decimal>,
    #[serde(rename = "modBCST", default)]
    pub st_base_mode: Option<String>,
    #[serde(rename = "pMVAST", default, with = "rust_decimal::serde::str_option")]
    pub st_margin: Option<Decimal>,
    #[serde(rename = "pRedBCST", default, with = "rust_decimal::serde::str_option")]
    pub st_base_reduction: Option<Decimal>,
    #[serde(rename = "vBCST", default, with = "rust_decimal::serde::str_option")]
    pub st_base: Option<Decimal>,
    #[serde(rename = "pICMSST", default, with = "rust_decimal::serde::str_option")]
    pub st_rate: Option<Decimal>,
    #[serde(rename = "vICMSST", default, with = "rust_decimal::serde::str_option")]
    pub st_amount: Option<Decimal>,
}

/// ICMS20.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcmsReduced {
    #[serde(rename = "orig", default)]
    pub origin: String,
    #[serde(rename = "CST", default)]
    pub cst: String,
    #[serde(rename = "modBC", default)]
    pub base_mode: String,
    #[serde(rename = "pRedBC", default, with = "rust_decimal::serde::str")]
    pub base_reduction: Decimal,
    #[serde(rename = "vBC", default, with = "rust_decimal::serde::str")]
    pub base: Decimal,
    #[serde(rename = "pICMS", default, with = "rust_decimal::serde::str")]
    pub rate: Decimal,
    #[serde(rename = "vICMS", default, with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

/// ICMS30.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcmsStOnly {
    #[serde(rename = "orig", default)]
    pub origin: String,
    #[serde(rename = "CST", default)]
    pub cst: String,
    #[serde(rename = "modBCST", default)]
    pub st_base_mode: String,
    #[serde(rename = "pMVAST", default, with = "rust_decimal::serde::str_option")]
    pub st_margin: Option<Decimal>,
    #[serde(rename = "pRedBCST", default, with = "rust_decimal::serde::str_option")]
    pub st_base_reduction: Option<Decimal>,
    #[serde(rename = "vBCST", default, with = "rust_decimal::serde::str")]
    pub st_base: Decimal,
    #[serde(rename = "pICMSST", default, with = "rust_decimal::serde::str")]
    pub st_rate: Decimal,
    #[serde(rename = "vICMSST", default, with = "rust_decimal::serde::str")]
    pub st_amount: Decimal,
}

/// ICMS40.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcmsExempt {
    #[serde(rename = "orig", default)]
    pub origin: String,
    #[serde(rename = "CST", default)]
    pub cst: String,
    #[serde(rename = "vICMSDeson", default, with = "rust_decimal::serde::str_option")]
    pub relieved_amount: Option<Decimal>,
    #[serde(rename = "motDesICMS", default)]
    pub relief_reason: Option<String>,
}

/// ICMS51.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcmsDeferred {
    #[serde(rename = "orig", default)]
    pub origin: String,
    #[serde(rename = "CST", default)]
    pub cst: String,
    #[serde(rename = "modBC", default)]
    pub base_mode: Option<String>,
    #[serde(rename = "pRedBC", default, with = "rust_decimal::serde::str_option")]
    pub base_reduction: Option<Decimal>,
    #[serde(rename = "vBC", default, with = "rust_decimal::serde::str_option")]
    pub base: Option<Decimal>,
    #[serde(rename = "pICMS", default, with = "rust_decimal::serde::str_option")]
    pub rate: Option<Decimal>,
    #[serde(rename = "vICMSOp", default, with = "rust_decimal::serde::str_option")]
    pub operation_amount: Option<Decimal>,
    #[serde(rename = "pDif", default, with = "rust_decimal::serde::str_option")]
    pub deferral_rate: Option<Decimal>,
    #[serde(rename = "vICMSDif", default, with = "rust_decimal::serde::str_option")]
    pub deferred_amount: Option<Decimal>,
    #[serde(rename = "vICMS", default, with = "rust_decimal::serde::str_option")]
    pub amount: Option<Decimal>,
}

/// ICMS60.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcmsRetained {
    #[serde(rename = "orig", default)]
    pub origin: String,
    #[serde(rename = "CST", default)]
    pub cst: String,
    #[serde(rename = "vBCSTRet", default, with = "rust_decimal::serde::str_option")]
    pub retained_base: Option<Decimal>,
    #[serde(rename = "vICMSSTRet", default, with = "rust_decimal::serde::str_option")]
    pub retained_amount: Option<Decimal>,
}

/// ICMSPart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcmsPart {
    #[serde(rename = "orig", default)]
    pub origin: String,
    #[serde(rename = "CST", default)]
    pub cst: String,
    #[serde(rename = "modBC", default)]
    pub base_mode: String,
    #[serde(rename = "vBC", default, with = "rust_decimal::serde::str")]
    pub base: Decimal,
    #[serde(rename = "pRedBC", default, with = "rust_decimal::serde::str_option")]
    pub base_reduction: Option<Decimal>,
    #[serde(rename = "pICMS", default, with = "rust_decimal::serde::str")]
    pub rate: Decimal,
    #[serde(rename = "vICMS", default, with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(rename = "modBCST", default)]
    pub st_base_mode: String,
    #[serde(rename = "pMVAST", default, with = "rust_decimal::serde::str_option")]
    pub st_margin: Option<Decimal>,
    #[serde(rename = "pRedBCST", default, with = "rust_decimal::serde::str_option")]
    pub st_base_reduction: Option<Decimal>,
    #[serde(rename = "vBCST", default, with = "rust_decimal::serde::str")]
    pub st_base: Decimal,
    #[serde(rename = "pICMSST", default, with = "rust_decimal::serde::str")]
    pub st_rate: Decimal,
    #[serde(rename = "vICMSST", default, with = "rust_decimal::serde::str")]
    pub st_amount: Decimal,
    #[serde(rename = "pBCOp", default, with = "rust_decimal::serde::str")]
    pub own_operation_share: Decimal,
    #[serde(rename = "UFST", default)]
    pub st_state: String,
}

/// ICMSST.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcmsStTransfer {
    #[serde(rename = "orig", default)]
    pub origin: String,
    #[serde(rename = "CST", default)]
    pub cst: String,
    #[serde(rename = "vBCSTRet", default, with = "rust_decimal::serde::str")]
    pub retained_base: Decimal,
    #[serde(rename = "vICMSSTRet", default, with = "rust_decimal::serde::str")]
    pub retained_amount: Decimal,
    #[serde(rename = "vBCSTDest", default, with = "rust_decimal::serde::str")]
    pub destination_base: Decimal,
    #[serde(rename = "vICMSSTDest", default, with = "rust_decimal::serde::str")]
    pub destination_amount: Decimal,
}

/// ICMSSN101.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcmsSnCredit {
    #[serde(rename = "orig", default)]
    pub origin: String,
    #[serde(rename = "CSOSN", default)]
    pub csosn: String,
    #[serde(rename = "pCredSN", default, with = "rust_decimal::serde::str")]
    pub credit_rate: Decimal,
    #[serde(rename = "vCredICMSSN", default, with = "rust_decimal::serde::str")]
    pub credit_amount: Decimal,
}

/// ICMSSN102.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcmsSnPlain {
    #[serde(rename = "orig", default)]
    pub origin: String,
    #[serde(rename = "CSOSN", default)]
    pub csosn: String,
}

/// ICMSSN201 and ICMSSN202. Only 201 carries the credit fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcmsSnWithSt {
    #[serde(rename = "orig", default)]
    pub origin: String,
    #[serde(rename = "CSOSN", default)]
    pub csosn: String,
    #[serde(rename = "modBCST", default)]
    pub st_base_mode: String,
    #[serde(rename = "pMVAST", default, with = "rust_decimal::serde::str_option")]
    pub st_margin: Option<Decimal>,
    #[serde(rename = "pRedBCST", default, with = "rust_decimal::serde::str_option")]
    pub st_base_reduction: Option<Decimal>,
    #[serde(rename = "vBCST", default, with = "rust_decimal::serde::str")]
    pub st_base: Decimal,
    #[serde(rename = "pICMSST", default, with = "rust_decimal::serde::str")]
    pub st_rate: Decimal,
    #[serde(rename = "vICMSST", default, with = "rust_decimal::serde::str")]
    pub st_amount: Decimal,
    #[serde(rename = "pCredSN", default, with = "rust_decimal::serde::str_option")]
    pub credit_rate: Option<Decimal>,
    #[serde(rename = "vCredICMSSN", default, with = "rust_decimal::serde::str_option")]
    pub credit_amount: Option<Decimal>,
}

/// ICMSSN500.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcmsSnRetained {
    #[serde(rename = "orig", default)]
    pub origin: String,
    #[serde(rename = "CSOSN", default)]
    pub csosn: String,
    #[serde(rename = "vBCSTRet", default, with = "rust_decimal::serde::str_option")]
    pub retained_base: Option<Decimal>,
    #[serde(rename = "vICMSSTRet", default, with = "rust_decimal::serde::str_option")]
    pub retained_amount: Option<Decimal>,
}

/// ICMSSN900.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcmsSnOther {
    #[serde(rename = "orig", default)]
    pub origin: String,
    #[serde(rename = "CSOSN", default)]
    pub csosn: String,
    #[serde(rename = "modBC", default)]
    pub base_mode: Option<String>,
    #[serde(rename = "vBC", default, with = "rust_decimal::serde::str_option")]
    pub base: Option<Decimal>,
    #[serde(rename = "pRedBC", default, with = "rust_decimal::serde::str_option")]
    pub base_reduction: Option<Decimal>,
    #[serde(rename = "pICMS", default, with = "rust_decimal::serde::str_option")]
    pub rate: Option<Decimal>,
    #[serde(rename = "vICMS", default, with = "rust_decimal::serde::str_option")]
    pub amount: Option<Decimal>,
    #[serde(rename = "modBCST", default)]
    pub st_base_mode: Option<String>,
    #[serde(rename = "pMVAST", default, with = "rust_decimal::serde::str_option")]
    pub st_margin: Option<Decimal>,
    #[serde(rename = "pRedBCST", default, with = "rust_decimal::serde::str_option")]
    pub st_base_reduction: Option<Decimal>,
    #[serde(rename = "vBCST", default, with = "rust_decimal::serde::str_option")]
    pub st_base: Option<Decimal>,
    #[serde(rename = "pICMSST", default, with = "rust_decimal::serde::str_option")]
    pub st_rate: Option<Decimal>,
    #[serde(rename = "vICMSST", default, with = "rust_decimal::serde::str_option")]
    pub st_amount: Option<Decimal>,
    #[serde(rename = "pCredSN", default, with = "rust_decimal::serde::str_option")]
    pub credit_rate: Option<Decimal>,
    #[serde(rename = "vCredICMSSN", default, with = "rust_decimal::serde::str_option")]
    pub credit_amount: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// IPI
// ---------------------------------------------------------------------------

/// `IPI`: shared header fields plus one variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpiBlock {
    /// `CNPJProd`: producer CNPJ, when different from the emitter.
    #[serde(rename = "CNPJProd", default)]
    pub producer_cnpj: Option<String>,
    /// `cEnq`: legal framework code.
    #[serde(rename = "cEnq", default)]
    pub framework_code: String,
    #[serde(rename = "$value")]
    pub variant: Ipi,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Ipi {
    #[serde(rename = "IPITrib")]
    Taxed(IpiTaxed),
    #[serde(rename = "IPINT")]
    NotTaxed(CstOnly),
}

impl Ipi {
    pub fn situation_code(&self) -> &str {
        match self {
            Self::Taxed(v) => &v.cst,
            Self::NotTaxed(v) => &v.cst,
        }
    }

    pub fn amount(&self) -> Decimal {
        match self {
            Self::Taxed(v) => v.amount,
            Self::NotTaxed(_) => Decimal::ZERO,
        }
    }
}

/// IPITrib: taxed either by rate (`vBC`/`pIPI`) or per unit (`qUnid`/`vUnid`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpiTaxed {
    #[serde(rename = "CST", default)]
    pub cst: String,
    #[serde(rename = "vBC", default, with = "rust_decimal::serde::str_option")]
    pub base: Option<Decimal>,
    #[serde(rename = "pIPI", default, with = "rust_decimal::serde::str_option")]
    pub rate: Option<Decimal>,
    #[serde(rename = "qUnid", default, with = "rust_decimal::serde::str_option")]
    pub unit_quantity: Option<Decimal>,
    #[serde(rename = "vUnid", default, with = "rust_decimal::serde::str_option")]
    pub unit_value: Option<Decimal>,
    #[serde(rename = "vIPI", default, with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

/// Variant that carries only its situation code (IPINT, PISNT, COFINSNT).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CstOnly {
    #[serde(rename = "CST", default)]
    pub cst: String,
}

// ---------------------------------------------------------------------------
// PIS
// ---------------------------------------------------------------------------

/// `PIS`: wrapper element holding exactly one PIS variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PisBlock {
    #[serde(rename = "$value")]
    pub variant: Pis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Pis {
    /// CST 01/02: by rate.
    #[serde(rename = "PISAliq")]
    Rate(PisRate),
    /// CST 03: by quantity.
    #[serde(rename = "PISQtde")]
    Quantity(PisQuantity),
    /// CST 04-09: not taxed.
    #[serde(rename = "PISNT")]
    NotTaxed(CstOnly),
    /// CST 49-99: other operations.
    #[serde(rename = "PISOutr")]
    Other(PisOther),
}

impl Pis {
    pub fn situation_code(&self) -> &str {
        match self {
            Self::Rate(v) => &v.cst,
            Self::Quantity(v) => &v.cst,
            Self::NotTaxed(v) => &v.cst,
            Self::Other(v) => &v.cst,
        }
    }

    pub fn amount(&self) -> Decimal {
        match self {
            Self::Rate(v) => v.amount,
            Self::Quantity(v) => v.amount,
            Self::NotTaxed(_) => Decimal::ZERO,
            Self::Other(v) => v.amount,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PisRate {
    #[serde(rename = "CST", default)]
    pub cst: String,
    #[serde(rename = "vBC", default, with = "rust_decimal::serde::str")]
    pub base: Decimal,
    #[serde(rename = "pPIS", default, with = "rust_decimal::serde::str")]
    pub rate: Decimal,
    #[serde(rename = "vPIS", default, with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PisQuantity {
    #[serde(rename = "CST", default)]
    pub cst: String,
    #[serde(rename = "qBCProd", default, with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
    #[serde(rename = "vAliqProd", default, with = "rust_decimal::serde::str")]
    pub unit_rate: Decimal,
    #[serde(rename = "vPIS", default, with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PisOther {
    #[serde(rename = "CST", default)]
    pub cst: String,
    #[serde(rename = "vBC", default, with = "rust_decimal::serde::str_option")]
    pub base: Option<Decimal>,
    #[serde(rename = "pPIS", default, with = "rust_decimal::serde::str_option")]
    pub rate: Option<Decimal>,
    #[serde(rename = "qBCProd", default, with = "rust_decimal::serde::str_option")]
    pub quantity: Option<Decimal>,
    #[serde(rename = "vAliqProd", default, with = "rust_decimal::serde::str_option")]
    pub unit_rate: Option<Decimal>,
    #[serde(rename = "vPIS", default, with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

/// `PISST`: PIS under substitution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PisSt {
    #[serde(rename = "vBC", default, with = "rust_decimal::serde::str_option")]
    pub base: Option<Decimal>,
    #[serde(rename = "pPIS", default, with = "rust_decimal::serde::str_option")]
    pub rate: Option<Decimal>,
    #[serde(rename = "qBCProd", default, with = "rust_decimal::serde::str_option")]
    pub quantity: Option<Decimal>,
    #[serde(rename = "vAliqProd", default, with = "rust_decimal::serde::str_option")]
    pub unit_rate: Option<Decimal>,
    #[serde(rename = "vPIS", default, with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

// ---------------------------------------------------------------------------
// COFINS
// ---------------------------------------------------------------------------

/// `COFINS`: wrapper element holding exactly one COFINS variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CofinsBlock {
    #[serde(rename = "$value")]
    pub variant: Cofins,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Cofins {
    #[serde(rename = "COFINSAliq")]
    Rate(CofinsRate),
    #[serde(rename = "COFINSQtde")]
    Quantity(CofinsQuantity),
    #[serde(rename = "COFINSNT")]
    NotTaxed(CstOnly),
    #[serde(rename = "COFINSOutr")]
    Other(CofinsOther),
}

impl Cofins {
    pub fn situation_code(&self) -> &str {
        match self {
            Self::Rate(v) => &v.cst,
            Self::Quantity(v) => &v.cst,
            Self::NotTaxed(v) => &v.cst,
            Self::Other(v) => &v.cst,
        }
    }

    pub fn amount(&self) -> Decimal {
        match self {
            Self::Rate(v) => v.amount,
            Self::Quantity(v) => v.amount,
            Self::NotTaxed(_) => Decimal::ZERO,
            Self::Other(v) => v.amount,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CofinsRate {
    #[serde(rename = "CST", default)]
    pub cst: String,
    #[serde(rename = "vBC", default, with = "rust_decimal::serde::str")]
    pub base: Decimal,
    #[serde(rename = "pCOFINS", default, with = "rust_decimal::serde::str")]
    pub rate: Decimal,
    #[serde(rename = "vCOFINS", default, with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CofinsQuantity {
    #[serde(rename = "CST", default)]
    pub cst: String,
    #[serde(rename = "qBCProd", default, with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
    #[serde(rename = "vAliqProd", default, with = "rust_decimal::serde::str")]
    pub unit_rate: Decimal,
    #[serde(rename = "vCOFINS", default, with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CofinsOther {
    #[serde(rename = "CST", default)]
    pub cst: String,
    #[serde(rename = "vBC", default, with = "rust_decimal::serde::str_option")]
    pub base: Option<Decimal>,
    #[serde(rename = "pCOFINS", default, with = "rust_decimal::serde::str_option")]
    pub rate: Option<Decimal>,
    #[serde(rename = "qBCProd", default, with = "rust_decimal::serde::str_option")]
    pub quantity: Option<Decimal>,
    #[serde(rename = "vAliqProd", default, with = "rust_decimal::serde::str_option")]
    pub unit_rate: Option<Decimal>,
    #[serde(rename = "vCOFINS", default, with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

/// `COFINSST`: COFINS under substitution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CofinsSt {
    #[serde(rename = "vBC", default, with = "rust_decimal::serde::str_option")]
    pub base: Option<Decimal>,
    #[serde(rename = "pCOFINS", default, with = "rust_decimal::serde::str_option")]
    pub rate: Option<Decimal>,
    #[serde(rename = "qBCProd", default, with = "rust_decimal::serde::str_option")]
    pub quantity: Option<Decimal>,
    #[serde(rename = "vAliqProd", default, with = "rust_decimal::serde::str_option")]
    pub unit_rate: Option<Decimal>,
    #[serde(rename = "vCOFINS", default, with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn icms00(amount: Decimal) -> Icms {
        Icms::Icms00(Icms00 {
            origin: "0".into(),
            cst: "00".into(),
            base_mode: "3".into(),
            base: dec!(10.00),
            rate: dec!(18.00),
            amount,
            fcp_rate: None,
            fcp_amount: None,
        })
    }

    #[test]
    fn icms_codes_and_amount() {
        let icms = icms00(dec!(1.80));
        assert_eq!(icms.situation_code(), "00");
        assert_eq!(icms.origin(), "0");
        assert_eq!(icms.amount(), dec!(1.80));
        assert!(!icms.is_simples_nacional());
    }

    #[test]
    fn simples_nacional_reports_csosn_and_no_amount() {
        let icms = Icms::Sn102(IcmsSnPlain {
            origin: "0".into(),
            csosn: "102".into(),
        });
        assert_eq!(icms.situation_code(), "102");
        assert!(icms.is_simples_nacional());
        assert_eq!(icms.amount(), Decimal::ZERO);
    }

    #[test]
    fn breakdown_sums_declared_amounts() {
        let taxes = Taxes {
            approximate_total: None,
            icms: Some(IcmsBlock {
                variant: icms00(dec!(1.80)),
            }),
            ipi: None,
            pis: Some(PisBlock {
                variant: Pis::Rate(PisRate {
                    cst: "01".into(),
                    base: dec!(10.00),
                    rate: dec!(1.65),
                    amount: dec!(0.17),
                }),
            }),
            pis_st: None,
            cofins: Some(CofinsBlock {
                variant: Cofins::NotTaxed(CstOnly { cst: "07".into() }),
            }),
            cofins_st: None,
        };
        let mut breakdown = TaxBreakdown::default();
        breakdown.add(&taxes);
        breakdown.add(&taxes);
        assert_eq!(breakdown.icms, dec!(3.60));
        assert_eq!(breakdown.pis, dec!(0.34));
        assert_eq!(breakdown.cofins, Decimal::ZERO);
        assert_eq!(breakdown.total(), dec!(3.94));
    }
}
