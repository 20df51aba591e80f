//! Shared fixtures for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use base64::Engine;

use crate::gemini::{ChatReply, GroundedReply, StudioBackend, StudioError};

/// In-memory backend that replays queued results and records every call.
#[derive(Default)]
pub struct MockBackend {
    chat: Mutex<VecDeque<Result<ChatReply, StudioError>>>,
    grounded: Mutex<VecDeque<Result<GroundedReply, StudioError>>>,
    images: Mutex<VecDeque<Result<String, StudioError>>>,
    calls: Mutex<Vec<String>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chat(self, result: Result<ChatReply, StudioError>) -> Self {
        self.chat.lock().unwrap().push_back(result);
        self
    }

    pub fn with_grounded(self, result: Result<GroundedReply, StudioError>) -> Self {
        self.grounded.lock().unwrap().push_back(result);
        self
    }

    pub fn with_image(self, result: Result<String, StudioError>) -> Self {
        self.images.lock().unwrap().push_back(result);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl StudioBackend for MockBackend {
    async fn send_chat(&self, message: &str) -> Result<ChatReply, StudioError> {
        self.calls.lock().unwrap().push(format!("chat:{message}"));
        self.chat
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ChatReply { text: "done".into() }))
    }

    async fn send_grounded_query(&self, query: &str) -> Result<GroundedReply, StudioError> {
        self.calls.lock().unwrap().push(format!("grounded:{query}"));
        self.grounded
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(GroundedReply { text: "done".into(), sources: Vec::new() }))
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, StudioError> {
        self.calls.lock().unwrap().push(format!("image:{prompt}"));
        self.images.lock().unwrap().pop_front().unwrap_or_else(|| Ok(png_data_uri()))
    }
}

/// A real 2x2 PNG, base64 encoded as a data URI.
pub fn png_data_uri() -> String {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([200, 80, 20, 255]));
    let mut buffer = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut buffer), image::ImageFormat::Png)
        .unwrap();
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(buffer)
    )
}
