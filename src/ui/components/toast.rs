use std::collections::VecDeque;

use chrono::{DateTime, Duration, Local};
use tui::{
    backend::Backend,
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::components::layout::top_center;

/// Older toasts are dropped once this many are queued
const MAX_TOASTS: usize = 3;
const TOAST_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub shown_at: DateTime<Local>,
}

/// Transient notifications, newest last
pub struct Toasts {
    queue: VecDeque<Toast>,
    ttl: Duration,
}

impl Toasts {
    pub fn new(ttl: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            ttl,
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push_at(ToastKind::Success, message, Local::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push_at(ToastKind::Error, message, Local::now());
    }

    pub fn push_at(&mut self, kind: ToastKind, message: impl Into<String>, now: DateTime<Local>) {
        if self.queue.len() == MAX_TOASTS {
            self.queue.pop_front();
        }
        self.queue.push_back(Toast {
            kind,
            message: message.into(),
            shown_at: now,
        });
    }

    /// Drop expired toasts. Returns true if anything was removed.
    pub fn prune(&mut self, now: DateTime<Local>) -> bool {
        let before = self.queue.len();
        let ttl = self.ttl;
        self.queue.retain(|toast| now - toast.shown_at < ttl);
        self.queue.len() != before
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<&Toast> {
        self.queue.back()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Toast> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Stack the live toasts at the top of the screen, newest first
pub fn render_toasts<B: Backend>(frame: &mut Frame<B>, toasts: &Toasts) {
    if toasts.is_empty() {
        return;
    }
    let size = frame.size();

    for (i, toast) in toasts.iter().rev().enumerate() {
        let area = top_center(40, 1 + i as u16 * TOAST_HEIGHT, TOAST_HEIGHT, size);
        if area.height < TOAST_HEIGHT {
            break;
        }

        let (icon, color) = match toast.kind {
            ToastKind::Success => ("✔ ", Color::Green),
            ToastKind::Error => ("✖ ", Color::Red),
        };

        let paragraph = Paragraph::new(Spans::from(vec![
            Span::styled(icon, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::raw(toast.message.as_str()),
        ]))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(color)))
        .style(Style::default().fg(Color::White).bg(Color::Black));

        frame.render_widget(Clear, area);
        frame.render_widget(paragraph, area);
    }
}
