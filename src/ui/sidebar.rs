use iced::widget::{button, column, container, row, text, Column, Space};
use iced::{alignment, Element, Length};

use crate::shell::{Mode, Shell};
use crate::Message;

const SIDEBAR_WIDTH: f32 = 280.0;

pub fn sidebar<'a>(shell: &Shell) -> Element<'a, Message> {
    let brand = column![
        text("Gemini Studio").size(22),
        text("ENTERPRISE STARTER").size(11),
    ]
    .spacing(4);

    let nav = Column::with_children(Mode::ALL.into_iter().map(|mode| nav_item(mode, shell.mode() == mode)))
        .spacing(8);

    let footer = column![
        button(text("[+ New Chat]").size(14))
            .on_press(Message::NewChat)
            .width(Length::Fill)
            .padding(10),
        button(text("[Hide Sidebar]").size(12))
            .on_press(Message::ToggleSidebar)
            .style(button::text),
    ]
    .spacing(6);

    container(
        column![
            brand,
            nav,
            Space::with_height(Length::Fill),
            footer,
        ]
        .spacing(24)
        .padding(20),
    )
    .width(Length::Fixed(SIDEBAR_WIDTH))
    .height(Length::Fill)
    .style(container::bordered_box)
    .into()
}

fn nav_item<'a>(mode: Mode, active: bool) -> Element<'a, Message> {
    let marker = if active { ">" } else { " " };
    let content = row![
        column![text(mode.label()).size(15), text(mode.description()).size(11)]
            .spacing(2)
            .width(Length::Fill),
        text(marker).size(15),
    ]
    .align_y(alignment::Vertical::Center);

    button(content)
        .on_press(Message::SelectMode(mode))
        .width(Length::Fill)
        .padding(12)
        .style(move |theme, status| {
            if active {
                button::primary(theme, status)
            } else {
                button::text(theme, status)
            }
        })
        .into()
}

/// Top bar used when the sidebar is hidden or the window is narrow.
pub fn header<'a>(shell: &Shell) -> Element<'a, Message> {
    let mut bar = row![text("Gemini Studio").size(18).width(Length::Fill)]
        .spacing(8)
        .align_y(alignment::Vertical::Center);

    for mode in Mode::ALL {
        let active = shell.mode() == mode;
        bar = bar.push(
            button(text(mode.short_label()).size(13))
                .on_press(Message::SelectMode(mode))
                .style(move |theme, status| {
                    if active {
                        button::primary(theme, status)
                    } else {
                        button::text(theme, status)
                    }
                }),
        );
    }

    bar = bar.push(button(text("[New]").size(13)).on_press(Message::NewChat).style(button::text));

    if !shell.is_compact() {
        bar = bar.push(
            button(text("[Menu]").size(13))
                .on_press(Message::ToggleSidebar)
                .style(button::text),
        );
    }

    container(bar)
        .padding(12)
        .width(Length::Fill)
        .style(container::bordered_box)
        .into()
}
