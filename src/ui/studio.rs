use iced::widget::{button, column, container, image, row, scrollable, stack, text, text_input, Column, Row, Space};
use iced::{alignment, ContentFit, Element, Length};

use crate::studio::{ExportStatus, GeneratedImage, ImageStudio};
use crate::ui;
use crate::Message;

const THUMB_SIZE: f32 = 120.0;

pub fn view<'a>(studio: &'a ImageStudio, model: &'a str, loading_frame: usize) -> Element<'a, Message> {
    let left = column![creator_panel(studio, loading_frame), history_grid(studio)]
        .spacing(20)
        .width(Length::FillPortion(4));

    let right = column![preview(studio, loading_frame), details(studio, model)]
        .spacing(10)
        .width(Length::FillPortion(8));

    let mut layout = column![].spacing(10).padding(20);
    if let Some(err) = studio.error() {
        layout = layout.push(ui::error_banner(err.to_string()));
    }
    layout = layout.push(row![left, right].spacing(20).height(Length::Fill));

    container(layout).width(Length::Fill).height(Length::Fill).into()
}

fn creator_panel(studio: &ImageStudio, loading_frame: usize) -> Element<'_, Message> {
    let label = if studio.is_generating() {
        format!("{} Forging Image...", ui::spinner(loading_frame))
    } else {
        "Generate Art".to_string()
    };

    let prompt = text_input("Describe what you want to see...", studio.prompt())
        .on_input(Message::PromptChanged)
        .on_submit(Message::GenerateImage)
        .padding(15)
        .size(15);

    let generate = button(
        container(text(label).size(15))
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center),
    )
    .width(Length::Fill)
    .padding(15)
    .on_press_maybe(studio.can_submit().then_some(Message::GenerateImage));

    container(column![text("Creator Studio").size(18), prompt, generate].spacing(14))
        .padding(20)
        .style(container::bordered_box)
        .into()
}

fn history_grid(studio: &ImageStudio) -> Element<'_, Message> {
    let header = text("RECENT CREATIONS").size(11);
    let entries: Vec<&GeneratedImage> = studio.history().collect();

    if entries.is_empty() {
        let empty = container(text("Empty History").size(12))
            .width(Length::Fill)
            .height(Length::Fixed(96.0))
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .style(container::bordered_box);
        return column![header, empty].spacing(10).into();
    }

    let current = studio.current().map(|img| img.id);
    let rows = entries.chunks(2).map(|pair| {
        Row::with_children(pair.iter().map(|img| thumbnail(img, current == Some(img.id))))
            .spacing(10)
            .into()
    });

    column![header, scrollable(Column::with_children(rows).spacing(10)).height(Length::Fill)]
        .spacing(10)
        .into()
}

fn thumbnail<'a>(img: &GeneratedImage, selected: bool) -> Element<'a, Message> {
    button(
        image(img.thumbnail().clone())
            .width(Length::Fixed(THUMB_SIZE))
            .height(Length::Fixed(THUMB_SIZE))
            .content_fit(ContentFit::Cover),
    )
    .padding(3)
    .on_press(Message::SelectImage(img.id))
    .style(move |theme, status| {
        if selected {
            button::primary(theme, status)
        } else {
            button::text(theme, status)
        }
    })
    .into()
}

fn preview(studio: &ImageStudio, loading_frame: usize) -> Element<'_, Message> {
    let base: Element<'_, Message> = match studio.current() {
        Some(img) => image(img.preview().clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Contain)
            .into(),
        None => container(text("Your creation will appear here").size(15))
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .into(),
    };

    let mut layers = stack![container(base).padding(20).width(Length::Fill).height(Length::Fill)];

    if studio.is_generating() {
        layers = layers.push(
            container(
                column![
                    text(ui::spinner(loading_frame)).size(32),
                    text("Consulting the latent space...").size(15),
                ]
                .spacing(10)
                .align_x(alignment::Horizontal::Center),
            )
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .style(container::rounded_box),
        );
    }

    container(layers)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(container::bordered_box)
        .into()
}

fn details<'a>(studio: &'a ImageStudio, model: &'a str) -> Element<'a, Message> {
    let Some(img) = studio.current() else {
        return Space::with_height(Length::Shrink).into();
    };

    let prompt = column![
        text("ACTIVE PROMPT").size(10),
        text(format!("\"{}\"", img.prompt)).size(14),
    ]
    .spacing(4)
    .width(Length::Fill);

    let (width, height) = img.dimensions;
    let meta = column![
        text("MODEL").size(10),
        text(model).size(12),
        text(format!("{width} × {height} · {}", img.timestamp.format("%H:%M"))).size(11),
    ]
        .spacing(4)
        .align_x(alignment::Horizontal::Right);

    let download = button(text("[Download]").size(13)).on_press(Message::DownloadImage);

    let mut body = column![row![prompt, meta, download].spacing(16).align_y(alignment::Vertical::Center)].spacing(6);

    match studio.export_status() {
        Some(ExportStatus::Saved(path)) => {
            body = body.push(text(format!("Saved to {}", path.display())).size(11));
        }
        Some(ExportStatus::Failed(err)) => {
            body = body.push(text(format!("Save failed: {err}")).size(11));
        }
        None => {}
    }

    container(body)
        .padding(20)
        .width(Length::Fill)
        .style(container::bordered_box)
        .into()
}
