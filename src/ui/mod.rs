pub mod components;
pub mod invoice_form;
pub mod invoice_table;
pub mod login;

/// Where the router can send the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

#[cfg(test)]
pub(crate) mod test_support {
    use tui::buffer::Buffer;

    /// Flatten a rendered buffer into lines of text
    pub fn buffer_text(buffer: &Buffer) -> String {
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol.as_str()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
