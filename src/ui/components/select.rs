use std::fmt::Display;

use tui::{
    style::{Color, Modifier, Style},
    text::{Span, Spans},
};

/// Option after `current`, wrapping around
pub fn next_option<T: Copy + PartialEq>(options: &[T], current: T) -> T {
    match options.iter().position(|o| *o == current) {
        Some(i) => options[(i + 1) % options.len()],
        None => current,
    }
}

/// Option before `current`, wrapping around
pub fn previous_option<T: Copy + PartialEq>(options: &[T], current: T) -> T {
    match options.iter().position(|o| *o == current) {
        Some(0) => options[options.len() - 1],
        Some(i) => options[i - 1],
        None => current,
    }
}

/// Closed selection shown inline. While open every option is listed with the
/// current one highlighted.
pub fn option_spans<T: Display + Copy + PartialEq>(options: &[T], current: T, open: bool) -> Vec<Span<'static>> {
    if !open {
        return vec![Span::raw(current.to_string())];
    }

    let mut spans = Vec::with_capacity(options.len() * 2);
    for (i, option) in options.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        }
        if *option == current {
            spans.push(Span::styled(
                format!("[{}]", option),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::raw(option.to_string()));
        }
    }
    spans
}

pub fn option_line<T: Display + Copy + PartialEq>(label: &str, options: &[T], current: T, open: bool) -> Spans<'static> {
    let mut spans = vec![Span::raw(format!("{}: ", label))];
    spans.extend(option_spans(options, current, open));
    Spans::from(spans)
}
