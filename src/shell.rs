//! Navigation state: the active mode, its view, and the sidebar.
//!
//! Only the active view exists. Switching to another mode builds that
//! mode's view from scratch, and "new chat" replaces the conversation
//! with a fresh session.

use crate::conversation::{ChatMode, Conversation};
use crate::studio::ImageStudio;

/// Below this window width the sidebar collapses into a header bar.
pub const COMPACT_WIDTH: f32 = 1024.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Chat,
    Grounding,
    Images,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Chat, Mode::Grounding, Mode::Images];

    pub fn label(self) -> &'static str {
        match self {
            Mode::Chat => "Intelligent Chat",
            Mode::Grounding => "Web Search",
            Mode::Images => "Image Forge",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Mode::Chat => "Powered by Gemini 3 Flash",
            Mode::Grounding => "Real-time Search Grounding",
            Mode::Images => "Gemini 2.5 Visuals",
        }
    }

    /// Label for the compact header buttons.
    pub fn short_label(self) -> &'static str {
        match self {
            Mode::Chat => "[Chat]",
            Mode::Grounding => "[Search]",
            Mode::Images => "[Images]",
        }
    }
}

#[derive(Debug)]
pub enum ActiveView {
    Conversation(Conversation),
    Studio(ImageStudio),
}

#[derive(Debug)]
pub struct Shell {
    mode: Mode,
    view: ActiveView,
    sidebar_open: bool,
    compact: bool,
    history_limit: usize,
}

impl Shell {
    pub fn new(history_limit: usize) -> Self {
        Shell {
            mode: Mode::Chat,
            view: Self::build_view(Mode::Chat, history_limit),
            sidebar_open: true,
            compact: false,
            history_limit,
        }
    }

    fn build_view(mode: Mode, history_limit: usize) -> ActiveView {
        match mode {
            Mode::Chat => ActiveView::Conversation(Conversation::new(ChatMode::Chat)),
            Mode::Grounding => ActiveView::Conversation(Conversation::new(ChatMode::Grounded)),
            Mode::Images => ActiveView::Studio(ImageStudio::new(history_limit)),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn view(&self) -> &ActiveView {
        &self.view
    }

    pub fn conversation(&self) -> Option<&Conversation> {
        match &self.view {
            ActiveView::Conversation(conv) => Some(conv),
            ActiveView::Studio(_) => None,
        }
    }

    pub fn conversation_mut(&mut self) -> Option<&mut Conversation> {
        match &mut self.view {
            ActiveView::Conversation(conv) => Some(conv),
            ActiveView::Studio(_) => None,
        }
    }

    pub fn studio(&self) -> Option<&ImageStudio> {
        match &self.view {
            ActiveView::Studio(studio) => Some(studio),
            ActiveView::Conversation(_) => None,
        }
    }

    pub fn studio_mut(&mut self) -> Option<&mut ImageStudio> {
        match &mut self.view {
            ActiveView::Studio(studio) => Some(studio),
            ActiveView::Conversation(_) => None,
        }
    }

    /// Whether the full sidebar is shown (as opposed to the compact header).
    pub fn sidebar_visible(&self) -> bool {
        self.sidebar_open && !self.compact
    }

    pub fn is_compact(&self) -> bool {
        self.compact
    }

    /// Switch modes. Returns `true` when the active view was rebuilt.
    pub fn select(&mut self, mode: Mode) -> bool {
        if mode == self.mode {
            return false;
        }
        tracing::debug!(from = ?self.mode, to = ?mode, "switching mode");
        self.mode = mode;
        self.view = Self::build_view(mode, self.history_limit);
        true
    }

    /// Discard the current conversation and start a fresh chat session.
    pub fn new_chat(&mut self) {
        tracing::info!("starting new chat session");
        self.mode = Mode::Chat;
        self.view = Self::build_view(Mode::Chat, self.history_limit);
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn resized(&mut self, width: f32) {
        self.compact = width < COMPACT_WIDTH;
    }
}

#[cfg(test)]
#[path = "shell_test.rs"]
mod tests;
