use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::FormError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Paid,
    Pending,
}

/// Visual weight of a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Default,
    Secondary,
    Destructive,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 3] = [PaymentStatus::Unpaid, PaymentStatus::Paid, PaymentStatus::Pending];

    pub fn label(self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "Unpaid",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Pending => "Pending",
        }
    }

    pub fn badge_variant(self) -> BadgeVariant {
        match self {
            PaymentStatus::Paid => BadgeVariant::Default,
            PaymentStatus::Pending => BadgeVariant::Secondary,
            PaymentStatus::Unpaid => BadgeVariant::Destructive,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentStatus {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentStatus::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or_else(|| FormError::UnknownOption {
                field: "payment status",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    BankTransfer,
    Upi,
    Cash,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::CreditCard,
        PaymentMethod::BankTransfer,
        PaymentMethod::Upi,
        PaymentMethod::Cash,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Cash => "Cash",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.label() == s)
            .ok_or_else(|| FormError::UnknownOption {
                field: "payment method",
                value: s.to_string(),
            })
    }
}

/// Handle to a file picked by the user. Only the name is ever looked at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedFile {
    path: PathBuf,
}

impl AttachedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> Option<String> {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }
}

/// A single-field replacement on an [`InvoiceDraft`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    InvoiceId(String),
    PaymentStatus(PaymentStatus),
    TotalAmount(String),
    PaymentMethod(PaymentMethod),
}

impl FieldChange {
    /// Build a change from a form field name and its raw value
    pub fn parse(name: &str, value: &str) -> Result<Self, FormError> {
        match name {
            "invoice" => Ok(FieldChange::InvoiceId(value.to_string())),
            "paymentStatus" => Ok(FieldChange::PaymentStatus(value.parse()?)),
            "totalAmount" => Ok(FieldChange::TotalAmount(value.to_string())),
            "paymentMethod" => Ok(FieldChange::PaymentMethod(value.parse()?)),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceDraft {
    pub invoice_id: String,
    pub payment_status: PaymentStatus,
    pub total_amount: String,
    pub payment_method: PaymentMethod,
    pub file: Option<AttachedFile>,
    pub file_name: Option<String>,
}

impl InvoiceDraft {
    pub fn apply(&mut self, change: FieldChange) {
        match change {
            FieldChange::InvoiceId(value) => self.invoice_id = value,
            FieldChange::PaymentStatus(status) => self.payment_status = status,
            FieldChange::TotalAmount(value) => self.total_amount = value,
            FieldChange::PaymentMethod(method) => self.payment_method = method,
        }
    }

    /// Store a picked file. Returns false if the handle has no file name.
    pub fn attach(&mut self, file: AttachedFile) -> bool {
        match file.name() {
            Some(name) => {
                self.file_name = Some(name);
                self.file = Some(file);
                true
            }
            None => false,
        }
    }

    pub fn has_required_fields(&self) -> bool {
        !self.invoice_id.is_empty() && !self.total_amount.is_empty()
    }
}
