use iced::widget::{button, column, container, row, scrollable, text, text_input, Column, Row};
use iced::{alignment, Element, Length, Padding};

use crate::conversation::{ChatMessage, ChatMode, Conversation, Role};
use crate::markdown;
use crate::ui;
use crate::Message;

const SOURCE_TITLE_COLS: usize = 24;

pub struct ChatIds<'a> {
    pub input: &'a text_input::Id,
    pub scroll: &'a scrollable::Id,
}

pub fn view<'a>(conv: &'a Conversation, loading_frame: usize, ids: ChatIds<'_>) -> Element<'a, Message> {
    let mut feed = Column::new().spacing(20).padding(15).width(Length::Fill);

    if conv.messages().is_empty() && !conv.is_submitting() {
        feed = feed.push(empty_state(conv.mode()));
    }

    for msg in conv.messages() {
        feed = feed.push(bubble(msg));
    }

    if conv.is_submitting() {
        feed = feed.push(
            row![
                text(ui::spinner(loading_frame)).size(20),
                text("Gemini is thinking...").size(14),
            ]
            .spacing(10)
            .align_y(alignment::Vertical::Center),
        );
    }

    let feed = scrollable(feed).id(ids.scroll.clone()).height(Length::Fill);

    let placeholder = match conv.mode() {
        ChatMode::Grounded => "What's the latest in AI research?",
        ChatMode::Chat => "Message Gemini...",
    };

    let input = text_input(placeholder, conv.input())
        .id(ids.input.clone())
        .on_input(Message::ChatInputChanged)
        .on_submit(Message::ChatSubmit)
        .padding(15)
        .size(16);

    let send = button(text("[Send]").size(15))
        .padding(15)
        .on_press_maybe(conv.can_submit().then_some(Message::ChatSubmit));

    let mut layout = column![feed].spacing(10).padding(10);

    if let Some(err) = conv.error() {
        layout = layout.push(ui::error_banner(err.to_string()));
    }

    layout = layout
        .push(row![input, send].spacing(8).align_y(alignment::Vertical::Center))
        .push(
            container(
                text("Powered by Gemini 3 Flash & Google Search Grounding. AI may generate inaccurate info.")
                    .size(11),
            )
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center),
        );

    container(layout).width(Length::Fill).height(Length::Fill).into()
}

fn empty_state<'a>(mode: ChatMode) -> Element<'a, Message> {
    let (title, blurb) = match mode {
        ChatMode::Grounded => (
            "Search the Real World",
            "Ask about current events, news, or technical documentation. I will cite my sources.",
        ),
        ChatMode::Chat => (
            "Intelligent Assistant",
            "Experience the power of Gemini 3 for coding, reasoning, and creative writing.",
        ),
    };

    container(
        column![text(title).size(24), text(blurb).size(14)]
            .spacing(8)
            .align_x(alignment::Horizontal::Center),
    )
    .width(Length::Fill)
    .padding(Padding::ZERO.top(80.0))
    .align_x(alignment::Horizontal::Center)
    .into()
}

fn bubble(msg: &ChatMessage) -> Element<'_, Message> {
    let stamp = msg.timestamp.format("%H:%M").to_string();

    match msg.role {
        Role::User => {
            let body = container(text(msg.content.as_str()).size(15))
                .padding(12)
                .max_width(720)
                .style(container::rounded_box);
            container(column![body, text(stamp).size(10)].spacing(4).align_x(alignment::Horizontal::Right))
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Right)
                .into()
        }
        Role::Assistant => {
            let mut content = column![
                container(markdown::render(&msg.content))
                    .padding(12)
                    .max_width(720)
                    .style(container::bordered_box),
            ]
            .spacing(6);

            if !msg.grounding_sources.is_empty() {
                let chips = Row::with_children(msg.grounding_sources.iter().map(|source| {
                    button(text(ui::truncate_display(&source.title, SOURCE_TITLE_COLS)).size(12))
                        .on_press(Message::OpenSource(source.uri.clone()))
                        .style(button::secondary)
                        .into()
                }))
                .spacing(6)
                .wrap();
                content = content.push(text("SOURCES FOUND").size(10)).push(chips);
            }

            content = content.push(
                row![
                    text(stamp).size(10),
                    button(text("[Copy]").size(11))
                        .on_press(Message::CopyMessage(msg.id))
                        .style(button::text),
                ]
                .spacing(8)
                .align_y(alignment::Vertical::Center),
            );

            container(content).width(Length::Fill).into()
        }
    }
}
