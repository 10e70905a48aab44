use super::InvoiceDraft;

/// An accepted invoice entry. Never changed after it is appended.
pub type InvoiceRecord = InvoiceDraft;

/// Append-only list of accepted invoices, in submission order
#[derive(Debug, Default)]
pub struct InvoiceLedger {
    records: Vec<InvoiceRecord>,
}

impl InvoiceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: InvoiceRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[InvoiceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
