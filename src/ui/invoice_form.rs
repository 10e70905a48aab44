use crossterm::event::KeyCode;
use tracing::{debug, info, warn};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, Paragraph, TableState},
    Frame,
};

use crate::error::FormError;
use crate::models::{AttachedFile, FieldChange, InvoiceDraft, InvoiceLedger, PaymentMethod, PaymentStatus};
use crate::ui::components::file_input::FileInputState;
use crate::ui::components::select::{next_option, option_line, previous_option};
use crate::ui::components::toast::Toasts;
use crate::ui::invoice_table::render_invoice_table;

// Represents a field in the invoice form
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum InvoiceField {
    InvoiceId,
    PaymentStatus,
    TotalAmount,
    PaymentMethod,
    File,
}

impl InvoiceField {
    /// Name used by [`FieldChange::parse`]
    pub fn name(self) -> &'static str {
        match self {
            InvoiceField::InvoiceId => "invoice",
            InvoiceField::PaymentStatus => "paymentStatus",
            InvoiceField::TotalAmount => "totalAmount",
            InvoiceField::PaymentMethod => "paymentMethod",
            InvoiceField::File => "file",
        }
    }
}

pub enum InvoiceFormAction {
    Exit,
}

pub struct InvoiceFormState {
    draft: InvoiceDraft,
    ledger: InvoiceLedger,
    current_field: InvoiceField,
    editing: bool,
    file_input: FileInputState,
    table_state: TableState,
}

impl InvoiceFormState {
    pub fn new() -> Self {
        Self {
            draft: InvoiceDraft::default(),
            ledger: InvoiceLedger::new(),
            current_field: InvoiceField::InvoiceId,
            editing: false,
            file_input: FileInputState::new(),
            table_state: TableState::default(),
        }
    }

    pub fn draft(&self) -> &InvoiceDraft {
        &self.draft
    }

    pub fn ledger(&self) -> &InvoiceLedger {
        &self.ledger
    }

    pub fn current_field(&self) -> InvoiceField {
        self.current_field
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
        if !self.editing {
            self.file_input.clear();
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            InvoiceField::InvoiceId => InvoiceField::PaymentStatus,
            InvoiceField::PaymentStatus => InvoiceField::TotalAmount,
            InvoiceField::TotalAmount => InvoiceField::PaymentMethod,
            InvoiceField::PaymentMethod => InvoiceField::File,
            InvoiceField::File => InvoiceField::InvoiceId,
        };
    }

    pub fn previous_field(&mut self) {
        self.current_field = match self.current_field {
            InvoiceField::InvoiceId => InvoiceField::File,
            InvoiceField::PaymentStatus => InvoiceField::InvoiceId,
            InvoiceField::TotalAmount => InvoiceField::PaymentStatus,
            InvoiceField::PaymentMethod => InvoiceField::TotalAmount,
            InvoiceField::File => InvoiceField::PaymentMethod,
        };
    }

    pub fn handle_change(&mut self, change: FieldChange) {
        debug!(?change, "invoice field changed");
        self.draft.apply(change);
    }

    /// Replace a field by name with a raw value
    pub fn handle_named_change(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        let change = FieldChange::parse(name, value)?;
        self.handle_change(change);
        Ok(())
    }

    pub fn select_file(&mut self, file: AttachedFile) {
        let path = file.path().display().to_string();
        if self.draft.attach(file) {
            debug!(%path, "file attached");
        } else {
            debug!(%path, "ignored file without a name");
        }
    }

    /// Append the draft to the ledger. Returns true if it was accepted.
    pub fn submit(&mut self, toasts: &mut Toasts) -> bool {
        if !self.draft.has_required_fields() {
            toasts.error(FormError::MissingRequired.to_string());
            return false;
        }

        let record = std::mem::take(&mut self.draft);
        info!(invoice = %record.invoice_id, status = %record.payment_status, "invoice noted");
        self.ledger.append(record);
        self.table_state.select(Some(self.ledger.len() - 1));
        toasts.success("Entry has been Noted!");
        true
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        match self.current_field {
            field @ (InvoiceField::InvoiceId | InvoiceField::TotalAmount) => {
                let current = if field == InvoiceField::InvoiceId {
                    &self.draft.invoice_id
                } else {
                    &self.draft.total_amount
                };
                if let Some(value) = edited_text(current, key) {
                    if let Err(err) = self.handle_named_change(field.name(), &value) {
                        warn!(%err, "field change rejected");
                    }
                }
            }
            InvoiceField::PaymentStatus => {
                let current = self.draft.payment_status;
                let status = match key {
                    KeyCode::Right | KeyCode::Char(' ') => next_option(&PaymentStatus::ALL, current),
                    KeyCode::Left => previous_option(&PaymentStatus::ALL, current),
                    _ => return,
                };
                self.handle_change(FieldChange::PaymentStatus(status));
            }
            InvoiceField::PaymentMethod => {
                let current = self.draft.payment_method;
                let method = match key {
                    KeyCode::Right | KeyCode::Char(' ') => next_option(&PaymentMethod::ALL, current),
                    KeyCode::Left => previous_option(&PaymentMethod::ALL, current),
                    _ => return,
                };
                self.handle_change(FieldChange::PaymentMethod(method));
            }
            InvoiceField::File => self.file_input.handle_key(key),
        }
    }

    fn confirm_file(&mut self, toasts: &mut Toasts) {
        match self.file_input.confirm() {
            Ok(file) => {
                self.select_file(file);
                self.toggle_editing();
            }
            Err(err) => toasts.error(err.to_string()),
        }
    }

    pub fn handle_key(&mut self, key: KeyCode, toasts: &mut Toasts) -> Option<InvoiceFormAction> {
        match key {
            KeyCode::Esc => {
                if self.editing {
                    self.toggle_editing();
                } else {
                    return Some(InvoiceFormAction::Exit);
                }
            }
            KeyCode::Enter => {
                if self.editing && self.current_field == InvoiceField::File {
                    self.confirm_file(toasts);
                } else {
                    self.toggle_editing();
                }
            }
            KeyCode::Char('s' | 'S') if !self.editing => {
                self.submit(toasts);
            }
            KeyCode::Up if !self.editing => self.previous_field(),
            KeyCode::Down | KeyCode::Tab if !self.editing => self.next_field(),
            _ if self.editing => self.edit_current_field(key),
            _ => {}
        }
        None
    }
}

fn edited_text(current: &str, key: KeyCode) -> Option<String> {
    let mut value = current.to_string();
    match key {
        KeyCode::Char(c) => value.push(c),
        KeyCode::Backspace => {
            value.pop()?;
        }
        _ => return None,
    }
    Some(value)
}

pub fn render_invoice_form<B: Backend>(frame: &mut Frame<B>, state: &mut InvoiceFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(4),  // Title
                Constraint::Length(9),  // Form
                Constraint::Length(3),  // Help
                Constraint::Min(0),     // Submitted invoices
            ]
            .as_ref(),
        )
        .split(frame.size());

    let title = Paragraph::new(vec![
        Spans::from(Span::styled("Invoice Form", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))),
        Spans::from(Span::styled(
            "Fill in the invoice details and submit to add to the table below",
            Style::default().fg(Color::Gray),
        )),
    ])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    render_form(frame, state, chunks[1]);

    let help_text = match (state.is_editing(), state.current_field()) {
        (false, _) => "Enter - Edit field | Up/Down - Navigate fields | S - Submit invoice | Esc - Quit",
        (true, InvoiceField::PaymentStatus | InvoiceField::PaymentMethod) => {
            "Left/Right - Change option | Enter - Done | Esc - Done"
        }
        (true, InvoiceField::File) => "Type a file path | Enter - Attach | Esc - Cancel",
        (true, _) => "Enter - Save field | Esc - Done",
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[2]);

    if !state.ledger().is_empty() {
        render_invoice_table(frame, chunks[3], state.ledger.records(), &mut state.table_state);
    }
}

fn label_style(state: &InvoiceFormState, field: InvoiceField) -> Style {
    if state.current_field == field {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn text_line(state: &InvoiceFormState, field: InvoiceField, label: &str, value: &str, placeholder: &str) -> Spans<'static> {
    let editing = state.editing && state.current_field == field;
    let value_span = if editing {
        Span::styled(format!("{}|", value), Style::default().add_modifier(Modifier::BOLD))
    } else if value.is_empty() {
        Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(value.to_string())
    };

    Spans::from(vec![
        Span::styled(format!("{}: ", label), label_style(state, field)),
        value_span,
    ])
}

fn select_line<T>(state: &InvoiceFormState, field: InvoiceField, label: &str, options: &[T], current: T) -> Spans<'static>
where
    T: std::fmt::Display + Copy + PartialEq,
{
    let open = state.editing && state.current_field == field;
    let mut line = option_line(label, options, current, open);
    if let Some(first) = line.0.first_mut() {
        first.style = label_style(state, field);
    }
    line
}

fn render_form<B: Backend>(frame: &mut Frame<B>, state: &InvoiceFormState, area: Rect) {
    let draft = state.draft();

    let file_value = if state.editing && state.current_field == InvoiceField::File {
        Span::styled(format!("{}|", state.file_input.buffer), Style::default().add_modifier(Modifier::BOLD))
    } else {
        match &draft.file_name {
            Some(name) => Span::raw(name.clone()),
            None => Span::styled("No file chosen", Style::default().fg(Color::DarkGray)),
        }
    };

    let mut lines = vec![
        text_line(state, InvoiceField::InvoiceId, "Invoice Number *", &draft.invoice_id, "INV007"),
        select_line(state, InvoiceField::PaymentStatus, "Payment Status", &PaymentStatus::ALL, draft.payment_status),
        text_line(state, InvoiceField::TotalAmount, "Total Amount *", &draft.total_amount, "$300.00"),
        select_line(state, InvoiceField::PaymentMethod, "Payment Method", &PaymentMethod::ALL, draft.payment_method),
        Spans::from(vec![
            Span::styled("Upload File: ", label_style(state, InvoiceField::File)),
            file_value,
        ]),
    ];

    if let Some(name) = &draft.file_name {
        lines.push(Spans::from(""));
        lines.push(Spans::from(Span::styled(
            format!("Uploaded: {}", name),
            Style::default().fg(Color::Gray),
        )));
    }

    let items: Vec<ListItem> = lines.into_iter().map(ListItem::new).collect();
    let form_list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Invoice Details"));

    frame.render_widget(form_list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::toast::ToastKind;
    use crate::ui::test_support::buffer_text;
    use chrono::Duration;
    use tui::{backend::TestBackend, Terminal};

    fn toasts() -> Toasts {
        Toasts::new(Duration::seconds(3))
    }

    fn type_into(state: &mut InvoiceFormState, field: InvoiceField, s: &str, toasts: &mut Toasts) {
        while state.current_field() != field {
            state.handle_key(KeyCode::Down, toasts);
        }
        state.handle_key(KeyCode::Enter, toasts);
        for c in s.chars() {
            state.handle_key(KeyCode::Char(c), toasts);
        }
        state.handle_key(KeyCode::Enter, toasts);
    }

    fn rendered(state: &mut InvoiceFormState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render_invoice_form(f, state)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn missing_required_fields_change_nothing() {
        let mut toasts = toasts();

        let mut state = InvoiceFormState::new();
        state.handle_change(FieldChange::InvoiceId("INV007".into()));
        assert!(!state.submit(&mut toasts));
        assert_eq!(state.draft().invoice_id, "INV007");

        let mut state = InvoiceFormState::new();
        state.handle_change(FieldChange::TotalAmount("$300.00".into()));
        assert!(!state.submit(&mut toasts));
        assert_eq!(state.draft().total_amount, "$300.00");

        assert!(state.ledger().is_empty());
        let toast = toasts.latest().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "Please fill in required fields");
    }

    #[test]
    fn valid_submission_appends_and_resets() {
        let mut toasts = toasts();
        let mut state = InvoiceFormState::new();
        state.handle_change(FieldChange::InvoiceId("INV007".into()));
        state.handle_change(FieldChange::TotalAmount("$300.00".into()));
        let submitted = state.draft().clone();

        assert!(state.submit(&mut toasts));

        assert_eq!(state.ledger().len(), 1);
        assert_eq!(state.ledger().records()[0], submitted);
        assert_eq!(*state.draft(), InvoiceDraft::default());
        assert_eq!(state.draft().payment_status, PaymentStatus::Unpaid);
        assert_eq!(state.draft().payment_method, PaymentMethod::CreditCard);
        let toast = toasts.latest().unwrap();
        assert_eq!(toast.kind, ToastKind::Success);
        assert_eq!(toast.message, "Entry has been Noted!");
    }

    #[test]
    fn submissions_keep_order_and_earlier_records() {
        let mut toasts = toasts();
        let mut state = InvoiceFormState::new();

        for n in 1..=4 {
            state.handle_change(FieldChange::InvoiceId(format!("INV00{n}")));
            state.handle_change(FieldChange::TotalAmount(format!("${n}00.00")));
            if n % 2 == 0 {
                state.handle_change(FieldChange::PaymentStatus(PaymentStatus::Paid));
            }
            assert!(state.submit(&mut toasts));
        }

        let records = state.ledger().records();
        assert_eq!(records.len(), 4);
        for (i, record) in records.iter().enumerate() {
            let n = i + 1;
            assert_eq!(record.invoice_id, format!("INV00{n}"));
            assert_eq!(record.total_amount, format!("${n}00.00"));
            let expected = if n % 2 == 0 { PaymentStatus::Paid } else { PaymentStatus::Unpaid };
            assert_eq!(record.payment_status, expected);
        }
    }

    #[test]
    fn keys_fill_and_submit_the_form() {
        let mut toasts = toasts();
        let mut state = InvoiceFormState::new();

        type_into(&mut state, InvoiceField::InvoiceId, "INV0077", &mut toasts);
        state.handle_key(KeyCode::Enter, &mut toasts);
        state.handle_key(KeyCode::Backspace, &mut toasts);
        state.handle_key(KeyCode::Enter, &mut toasts);
        assert_eq!(state.draft().invoice_id, "INV007");

        state.handle_key(KeyCode::Down, &mut toasts);
        state.handle_key(KeyCode::Enter, &mut toasts);
        state.handle_key(KeyCode::Left, &mut toasts);
        state.handle_key(KeyCode::Enter, &mut toasts);
        assert_eq!(state.draft().payment_status, PaymentStatus::Pending);

        type_into(&mut state, InvoiceField::TotalAmount, "$300.00", &mut toasts);

        state.handle_key(KeyCode::Down, &mut toasts);
        state.handle_key(KeyCode::Enter, &mut toasts);
        state.handle_key(KeyCode::Right, &mut toasts);
        state.handle_key(KeyCode::Right, &mut toasts);
        state.handle_key(KeyCode::Esc, &mut toasts);
        assert_eq!(state.draft().payment_method, PaymentMethod::Upi);
        assert!(!state.is_editing());

        state.handle_key(KeyCode::Char('s'), &mut toasts);
        assert_eq!(state.ledger().len(), 1);
        assert_eq!(state.ledger().records()[0].payment_status, PaymentStatus::Pending);
        assert_eq!(state.ledger().records()[0].payment_method, PaymentMethod::Upi);

        assert!(matches!(state.handle_key(KeyCode::Esc, &mut toasts), Some(InvoiceFormAction::Exit)));
    }

    #[test]
    fn named_changes_use_form_field_names() {
        let mut state = InvoiceFormState::new();
        state.handle_named_change("paymentMethod", "Cash").unwrap();
        state.handle_named_change("invoice", "INV900").unwrap();

        assert_eq!(state.draft().payment_method, PaymentMethod::Cash);
        assert_eq!(state.draft().invoice_id, "INV900");
        assert_eq!(
            state.handle_named_change("file", "x.pdf"),
            Err(FormError::UnknownField("file".into()))
        );
    }

    #[test]
    fn shift_s_also_submits() {
        let mut toasts = toasts();
        let mut state = InvoiceFormState::new();
        state.handle_change(FieldChange::InvoiceId("INV500".into()));
        state.handle_change(FieldChange::TotalAmount("$500.00".into()));

        state.handle_key(KeyCode::Char('S'), &mut toasts);

        assert_eq!(state.ledger().len(), 1);
        assert_eq!(state.ledger().records()[0].invoice_id, "INV500");
    }

    #[test]
    fn s_is_text_while_editing() {
        let mut toasts = toasts();
        let mut state = InvoiceFormState::new();
        type_into(&mut state, InvoiceField::InvoiceId, "s1", &mut toasts);

        assert_eq!(state.draft().invoice_id, "s1");
        assert!(state.ledger().is_empty());
        assert!(toasts.is_empty());
    }

    #[test]
    fn missing_file_keeps_draft_and_reports() {
        let mut toasts = toasts();
        let mut state = InvoiceFormState::new();

        while state.current_field() != InvoiceField::File {
            state.handle_key(KeyCode::Down, &mut toasts);
        }
        state.handle_key(KeyCode::Enter, &mut toasts);
        for c in "/no/such/invoice.pdf".chars() {
            state.handle_key(KeyCode::Char(c), &mut toasts);
        }
        state.handle_key(KeyCode::Enter, &mut toasts);

        assert!(state.draft().file.is_none());
        assert!(state.is_editing());
        assert_eq!(toasts.latest().unwrap().message, "No file selected");
    }

    #[test]
    fn attached_file_travels_with_the_record() {
        let mut toasts = toasts();
        let mut state = InvoiceFormState::new();
        state.select_file(AttachedFile::new("/var/tmp/receipt-42.pdf"));
        state.handle_change(FieldChange::InvoiceId("INV042".into()));
        state.handle_change(FieldChange::TotalAmount("$42.00".into()));

        assert!(rendered(&mut state).contains("Uploaded: receipt-42.pdf"));

        state.submit(&mut toasts);
        assert_eq!(state.ledger().records()[0].file_name.as_deref(), Some("receipt-42.pdf"));
        assert!(state.draft().file.is_none());
        assert!(state.draft().file_name.is_none());
    }

    #[test]
    fn table_appears_after_first_entry() {
        let mut toasts = toasts();
        let mut state = InvoiceFormState::new();

        let before = rendered(&mut state);
        assert!(before.contains("Invoice Form"));
        assert!(!before.contains("Submitted Invoices"));

        state.handle_change(FieldChange::InvoiceId("INV101".into()));
        state.handle_change(FieldChange::TotalAmount("$300.00".into()));
        state.submit(&mut toasts);

        let after = rendered(&mut state);
        assert!(after.contains("Submitted Invoices"));
        let rows: Vec<&str> = after.lines().filter(|l| l.contains("INV101")).collect();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].contains("Unpaid"));
        assert!(rows[0].contains("$300.00"));
        assert!(rows[0].contains("Credit Card"));
    }
}
