mod credentials;
mod invoice;
mod ledger;

pub use credentials::Credentials;
pub use invoice::{AttachedFile, BadgeVariant, FieldChange, InvoiceDraft, PaymentMethod, PaymentStatus};
pub use ledger::{InvoiceLedger, InvoiceRecord};
