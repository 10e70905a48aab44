pub mod file_input;
pub mod layout;
pub mod select;
pub mod toast;
