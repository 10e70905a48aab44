use std::path::Path;

use crossterm::event::KeyCode;

use crate::error::FormError;
use crate::models::AttachedFile;

/// Single-file picker driven by a typed path.
///
/// Only checks that the path names a regular file; the file is never opened.
#[derive(Debug, Default)]
pub struct FileInputState {
    pub buffer: String,
}

impl FileInputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char(c) => self.buffer.push(c),
            KeyCode::Backspace => {
                self.buffer.pop();
            }
            _ => {}
        }
    }

    /// Turn the typed path into a file handle
    pub fn confirm(&mut self) -> Result<AttachedFile, FormError> {
        let typed = self.buffer.trim();
        if typed.is_empty() || !Path::new(typed).is_file() {
            return Err(FormError::NoFileSelected);
        }

        let file = AttachedFile::new(typed);
        self.buffer.clear();
        Ok(file)
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
