//! Payment method codes (`detPag/tPag`).

use serde::{Deserialize, Serialize};

/// Payment method of one `detPag` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// 01
    Cash,
    /// 02
    Cheque,
    /// 03
    CreditCard,
    /// 04
    DebitCard,
    /// 05
    StoreCredit,
    /// 10
    FoodVoucher,
    /// 11
    MealVoucher,
    /// 12
    GiftVoucher,
    /// 13
    FuelVoucher,
    /// 14
    TradeBill,
    /// 15
    BankSlip,
    /// 16
    BankDeposit,
    /// 17
    Pix,
    /// 18
    BankTransfer,
    /// 19
    LoyaltyProgram,
    /// 90
    NoPayment,
    /// 99
    Other,
    /// Any code not listed above.
    NotInformed,
}

impl PaymentMethod {
    /// Parse a `tPag` code. Unknown codes map to [`PaymentMethod::NotInformed`].
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "01" => Self::Cash,
            "02" => Self::Cheque,
            "03" => Self::CreditCard,
            "04" => Self::DebitCard,
            "05" => Self::StoreCredit,
            "10" => Self::FoodVoucher,
            "11" => Self::MealVoucher,
            "12" => Self::GiftVoucher,
            "13" => Self::FuelVoucher,
            "14" => Self::TradeBill,
            "15" => Self::BankSlip,
            "16" => Self::BankDeposit,
            "17" => Self::Pix,
            "18" => Self::BankTransfer,
            "19" => Self::LoyaltyProgram,
            "90" => Self::NoPayment,
            "99" => Self::Other,
            _ => Self::NotInformed,
        }
    }

    /// The `tPag` code, or `None` for [`PaymentMethod::NotInformed`].
    pub fn code(&self) -> Option<&'static str> {
        let code = match self {
            Self::Cash => "01",
            Self::Cheque => "02",
            Self::CreditCard => "03",
            Self::DebitCard => "04",
            Self::StoreCredit => "05",
            Self::FoodVoucher => "10",
            Self::MealVoucher => "11",
            Self::GiftVoucher => "12",
            Self::FuelVoucher => "13",
            Self::TradeBill => "14",
            Self::BankSlip => "15",
            Self::BankDeposit => "16",
            Self::Pix => "17",
            Self::BankTransfer => "18",
            Self::LoyaltyProgram => "19",
            Self::NoPayment => "90",
            Self::Other => "99",
            Self::NotInformed => return None,
        };
        Some(code)
    }

    /// Label printed on the receipt.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Cash => "Dinheiro",
            Self::Cheque => "Cheque",
            Self::CreditCard => "Cartão de Crédito",
            Self::DebitCard => "Cartão de Débito",
            Self::StoreCredit => "Crédito Loja",
            Self::FoodVoucher => "Vale Alimentação",
            Self::MealVoucher => "Vale Refeição",
            Self::GiftVoucher => "Vale Presente",
            Self::FuelVoucher => "Vale Combustível",
            Self::TradeBill => "Duplicata Mercantil",
            Self::BankSlip => "Boleto Bancário",
            Self::BankDeposit => "Depósito Bancário",
            Self::Pix => "Pagamento Instantâneo (PIX)",
            Self::BankTransfer => "Transferência bancária, Carteira Digital",
            Self::LoyaltyProgram => "Programa de fidelidade, Cashback, Crédito Virtual",
            Self::NoPayment => "Sem pagamento",
            Self::Other => "Outros",
            Self::NotInformed => "Não informado",
        }
    }
}

/// Receipt label for a raw `tPag` code.
pub fn payment_method_description(code: &str) -> &'static str {
    PaymentMethod::from_code(code).description()
}
