use thiserror::Error;

/// Recoverable failures raised while editing or submitting a form.
///
/// The `Display` text is what the user sees in the notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Invalid credentials!")]
    InvalidCredentials,

    #[error("Please fill in required fields")]
    MissingRequired,

    #[error("No file selected")]
    NoFileSelected,

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unknown {field} option: {value}")]
    UnknownOption { field: &'static str, value: String },
}
