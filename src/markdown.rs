//! Light Markdown rendering for assistant replies.
//!
//! Replies are flattened into a list of blocks (headings, paragraphs,
//! list items, code blocks) that map directly onto text widgets.

use iced::widget::{column, container, text};
use iced::{Element, Font, Padding};
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(u8, String),
    Paragraph(String),
    /// Nesting depth starting at 1, and the bullet to draw.
    ListItem(usize, String, String),
    Code(String),
    Rule,
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

pub fn parse(markdown: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut buffer = String::new();
    // One counter per open list; `None` for bullet lists.
    let mut lists: Vec<Option<u64>> = Vec::new();
    let mut bullet = String::new();
    let mut in_code = false;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::List(start)) => {
                flush_item(&mut blocks, &mut buffer, lists.len(), &bullet);
                lists.push(start);
            }
            Event::End(Tag::List(_)) => {
                flush_item(&mut blocks, &mut buffer, lists.len(), &bullet);
                lists.pop();
            }
            Event::Start(Tag::Item) => {
                flush_item(&mut blocks, &mut buffer, lists.len(), &bullet);
                bullet = match lists.last_mut() {
                    Some(Some(n)) => {
                        let label = format!("{n}.");
                        *n += 1;
                        label
                    }
                    _ => "•".to_string(),
                };
            }
            Event::End(Tag::Item) => {
                flush_item(&mut blocks, &mut buffer, lists.len(), &bullet);
            }
            Event::Start(Tag::CodeBlock(_)) => {
                if lists.is_empty() {
                    let pending = std::mem::take(&mut buffer);
                    if !pending.trim().is_empty() {
                        blocks.push(Block::Paragraph(pending.trim().to_string()));
                    }
                } else {
                    flush_item(&mut blocks, &mut buffer, lists.len(), &bullet);
                }
                in_code = true;
            }
            Event::End(Tag::CodeBlock(_)) => {
                in_code = false;
                blocks.push(Block::Code(buffer.trim_end_matches('\n').to_string()));
                buffer.clear();
            }
            Event::End(Tag::Heading(level, _, _)) => {
                blocks.push(Block::Heading(heading_level(level), std::mem::take(&mut buffer)));
            }
            Event::End(Tag::Paragraph) if lists.is_empty() => {
                if !buffer.trim().is_empty() {
                    blocks.push(Block::Paragraph(std::mem::take(&mut buffer)));
                }
                buffer.clear();
            }
            Event::End(Tag::Paragraph) => buffer.push(' '),
            Event::Text(t) | Event::Code(t) => buffer.push_str(&t),
            Event::SoftBreak if in_code => buffer.push('\n'),
            Event::SoftBreak => buffer.push(' '),
            Event::HardBreak => buffer.push('\n'),
            Event::Rule => blocks.push(Block::Rule),
            _ => {}
        }
    }

    if !buffer.trim().is_empty() {
        blocks.push(Block::Paragraph(buffer));
    }
    blocks
}

fn flush_item(blocks: &mut Vec<Block>, buffer: &mut String, depth: usize, bullet: &str) {
    let item = buffer.trim();
    if depth > 0 && !item.is_empty() {
        blocks.push(Block::ListItem(depth, bullet.to_string(), item.to_string()));
    }
    buffer.clear();
}

pub fn render<'a, M: 'a>(markdown: &str) -> Element<'a, M> {
    let blocks = parse(markdown).into_iter().map(|block| -> Element<'a, M> {
        match block {
            Block::Heading(level, content) => {
                let size: u16 = match level {
                    1 => 22,
                    2 => 19,
                    _ => 17,
                };
                text(content).size(size).into()
            }
            Block::Paragraph(content) => text(content).size(15).into(),
            Block::ListItem(depth, bullet, content) => container(text(format!("{bullet} {content}")).size(15))
                .padding(Padding::ZERO.left(16.0 * depth as f32))
                .into(),
            Block::Code(content) => container(text(content).size(14).font(Font::MONOSPACE))
                .padding(10)
                .style(container::rounded_box)
                .into(),
            Block::Rule => iced::widget::horizontal_rule(1).into(),
        }
    });

    column(blocks).spacing(8).into()
}

#[cfg(test)]
#[path = "markdown_test.rs"]
mod tests;
