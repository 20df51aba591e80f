pub mod chat;
pub mod sidebar;
pub mod studio;

use iced::widget::{button, container, row, text};
use iced::{alignment, Element, Length};
use unicode_width::UnicodeWidthChar;

use crate::Message;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

/// Cut `s` to at most `max_cols` terminal columns, ending with `…` when cut.
pub fn truncate_display(s: &str, max_cols: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_cols {
        return s.to_string();
    }

    let budget = max_cols.saturating_sub(1);
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

pub fn error_banner<'a>(message: String) -> Element<'a, Message> {
    container(
        row![
            text(message).size(14).width(Length::Fill),
            button(text("[Dismiss]").size(13))
                .on_press(Message::DismissError)
                .style(button::text),
        ]
        .spacing(10)
        .align_y(alignment::Vertical::Center),
    )
    .padding(10)
    .width(Length::Fill)
    .style(container::bordered_box)
    .into()
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
