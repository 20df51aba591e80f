mod config;
mod conversation;
mod gemini;
mod imaging;
mod markdown;
mod shell;
mod studio;
mod ui;

#[cfg(test)]
mod test_support;

use iced::{
    widget::{column, container, row, scrollable, text_input},
    Element, Length, Task, Theme, Subscription, Size,
    time, clipboard,
    keyboard::{self, Key},
    event::{self, Event as IcedEvent},
    window,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use conversation::ChatCompletion;
use gemini::{GeminiClient, StudioBackend};
use shell::{ActiveView, Mode, Shell};
use studio::ImageCompletion;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gemini_studio=info")),
        )
        .init();

    let config = config::Config::load();
    let window_size = Size::new(config.window.width as f32, config.window.height as f32);
    let min_size = Size::new(config.window.min_width as f32, config.window.min_height as f32);

    iced::application("Gemini Studio", App::update, App::view)
        .theme(App::theme)
        .subscription(App::subscription)
        .window(window::Settings {
            size: window_size,
            min_size: Some(min_size),
            position: window::Position::Centered,
            ..Default::default()
        })
        .run_with(move || App::new(config))
}

#[derive(Debug, Clone)]
pub enum Message {
    SelectMode(Mode),
    ToggleSidebar,
    NewChat,
    WindowResized(Size),
    ChatInputChanged(String),
    ChatSubmit,
    ChatCompleted(ChatCompletion),
    CopyMessage(u64),
    OpenSource(String),
    PromptChanged(String),
    GenerateImage,
    ImageCompleted(ImageCompletion),
    SelectImage(u64),
    DownloadImage,
    ExportFinished(Result<PathBuf, String>),
    DismissError,
    Tick,
}

struct App {
    config: config::Config,
    shell: Shell,
    backend: Arc<dyn StudioBackend>,
    loading_frame: usize,
    input_id: text_input::Id,
    scroll_id: scrollable::Id,
}

impl App {
    fn new(config: config::Config) -> (Self, Task<Message>) {
        let client = GeminiClient::from_config(&config.gemini);
        tracing::info!(
            chat_model = client.chat_model(),
            image_model = client.image_model(),
            "gemini client ready"
        );

        let app = App {
            shell: Shell::new(config.studio.history_limit),
            backend: Arc::new(client),
            config,
            loading_frame: 0,
            input_id: text_input::Id::unique(),
            scroll_id: scrollable::Id::unique(),
        };

        let focus_task = text_input::focus(app.input_id.clone());
        (app, focus_task)
    }

    fn scroll_to_end(&self) -> Task<Message> {
        scrollable::snap_to(self.scroll_id.clone(), scrollable::RelativeOffset::END)
    }

    fn is_busy(&self) -> bool {
        match self.shell.view() {
            ActiveView::Conversation(conv) => conv.is_submitting(),
            ActiveView::Studio(studio) => studio.is_generating(),
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SelectMode(mode) => {
                if self.shell.select(mode) && mode != Mode::Images {
                    return text_input::focus(self.input_id.clone());
                }
                Task::none()
            }
            Message::ToggleSidebar => {
                self.shell.toggle_sidebar();
                Task::none()
            }
            Message::NewChat => {
                self.shell.new_chat();
                text_input::focus(self.input_id.clone())
            }
            Message::WindowResized(size) => {
                self.shell.resized(size.width);
                Task::none()
            }
            Message::ChatInputChanged(value) => {
                if let Some(conv) = self.shell.conversation_mut() {
                    conv.set_input(value);
                }
                Task::none()
            }
            Message::ChatSubmit => {
                let Some(request) = self.shell.conversation_mut().and_then(|conv| conv.submit()) else {
                    return Task::none();
                };

                tracing::debug!(session_id = %request.session_id, mode = ?request.mode, "submitting chat message");
                let backend = self.backend.clone();
                Task::batch([
                    Task::perform(conversation::dispatch(backend, request), Message::ChatCompleted),
                    self.scroll_to_end(),
                ])
            }
            Message::ChatCompleted(completion) => {
                let applied = self
                    .shell
                    .conversation_mut()
                    .is_some_and(|conv| conv.complete(completion));
                if applied {
                    self.scroll_to_end()
                } else {
                    Task::none()
                }
            }
            Message::CopyMessage(id) => {
                match self.shell.conversation().and_then(|conv| conv.message(id)) {
                    Some(msg) => clipboard::write(msg.content.clone()),
                    None => Task::none(),
                }
            }
            Message::OpenSource(uri) => {
                if let Err(e) = webbrowser::open(&uri) {
                    tracing::warn!(%uri, error = %e, "could not open source link");
                }
                Task::none()
            }
            Message::PromptChanged(value) => {
                if let Some(studio) = self.shell.studio_mut() {
                    studio.set_prompt(value);
                }
                Task::none()
            }
            Message::GenerateImage => {
                let Some(request) = self.shell.studio_mut().and_then(|studio| studio.submit()) else {
                    return Task::none();
                };

                tracing::debug!(studio_id = %request.studio_id, "submitting image prompt");
                let backend = self.backend.clone();
                Task::perform(studio::dispatch(backend, request), Message::ImageCompleted)
            }
            Message::ImageCompleted(completion) => {
                if let Some(studio) = self.shell.studio_mut() {
                    studio.complete(completion);
                }
                Task::none()
            }
            Message::SelectImage(id) => {
                if let Some(studio) = self.shell.studio_mut() {
                    studio.select(id);
                }
                Task::none()
            }
            Message::DownloadImage => {
                let Some((id, url)) = self.shell.studio().and_then(|studio| studio.export_job()) else {
                    return Task::none();
                };

                let dir = self.config.studio.download_dir.clone();
                Task::perform(
                    async move {
                        tokio::task::spawn_blocking(move || {
                            studio::export(&url, &dir, id).map_err(|e| format!("{e:#}"))
                        })
                        .await
                        .unwrap_or_else(|e| Err(e.to_string()))
                    },
                    Message::ExportFinished,
                )
            }
            Message::ExportFinished(result) => {
                if let Some(studio) = self.shell.studio_mut() {
                    studio.finish_export(result);
                }
                Task::none()
            }
            Message::DismissError => {
                if let Some(conv) = self.shell.conversation_mut() {
                    conv.dismiss_error();
                } else if let Some(studio) = self.shell.studio_mut() {
                    studio.dismiss_error();
                }
                Task::none()
            }
            Message::Tick => {
                if self.is_busy() {
                    self.loading_frame = (self.loading_frame + 1) % 80;
                }
                Task::none()
            }
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let timer = if self.is_busy() {
            time::every(Duration::from_millis(80)).map(|_| Message::Tick)
        } else {
            Subscription::none()
        };

        let events = event::listen_with(|event, _status, _id| {
            if let IcedEvent::Keyboard(keyboard::Event::KeyPressed {
                key: Key::Named(keyboard::key::Named::Escape),
                ..
            }) = event
            {
                Some(Message::DismissError)
            } else {
                None
            }
        });

        let resizes = window::resize_events().map(|(_id, size)| Message::WindowResized(size));

        Subscription::batch([timer, events, resizes])
    }

    fn view(&self) -> Element<'_, Message> {
        let content: Element<Message> = match self.shell.view() {
            ActiveView::Conversation(conv) => ui::chat::view(
                conv,
                self.loading_frame,
                ui::chat::ChatIds { input: &self.input_id, scroll: &self.scroll_id },
            ),
            ActiveView::Studio(studio) => {
                ui::studio::view(studio, &self.config.gemini.image_model, self.loading_frame)
            }
        };

        let layout: Element<Message> = if self.shell.sidebar_visible() {
            row![ui::sidebar::sidebar(&self.shell), content].into()
        } else {
            column![ui::sidebar::header(&self.shell), content].into()
        };

        container(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn theme(&self) -> Theme {
        Theme::TokyoNight
    }
}
