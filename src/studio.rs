//! Image studio state: one current image plus a bounded history.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Local};
use iced::widget::image::Handle;
use image::GenericImageView;
use uuid::Uuid;

use crate::gemini::{StudioBackend, StudioError};
use crate::imaging;

pub const MAX_HISTORY: usize = 10;

#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub id: u64,
    /// `data:image/png;base64,...`
    pub url: String,
    pub prompt: String,
    pub timestamp: DateTime<Local>,
    pub dimensions: (u32, u32),
    preview: Handle,
    thumbnail: Handle,
}

impl GeneratedImage {
    /// Decode `url` and build the preview and thumbnail handles. CPU bound;
    /// the studio assigns `id` when the image is accepted.
    pub fn decode(url: String, prompt: String) -> Result<Self, StudioError> {
        let decode_err = |e: anyhow::Error| StudioError::ImageDecode(format!("{e:#}"));
        let bytes = imaging::decode_data_uri(&url).map_err(decode_err)?;
        let img = imaging::load(&bytes).map_err(decode_err)?;
        let dimensions = img.dimensions();
        let thumb = imaging::thumbnail(&img, imaging::THUMBNAIL_EDGE).map_err(decode_err)?;

        Ok(GeneratedImage {
            id: 0,
            url,
            prompt,
            timestamp: Local::now(),
            dimensions,
            preview: Handle::from_bytes(bytes),
            thumbnail: Handle::from_bytes(thumb),
        })
    }

    pub fn preview(&self) -> &Handle {
        &self.preview
    }

    pub fn thumbnail(&self) -> &Handle {
        &self.thumbnail
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub studio_id: Uuid,
    pub prompt: String,
}

#[derive(Debug, Clone)]
pub struct ImageCompletion {
    pub studio_id: Uuid,
    pub result: Result<GeneratedImage, StudioError>,
}

/// Outcome of the last "download" action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    Saved(PathBuf),
    Failed(String),
}

#[derive(Debug)]
pub struct ImageStudio {
    id: Uuid,
    prompt: String,
    generating: bool,
    current: Option<GeneratedImage>,
    history: VecDeque<GeneratedImage>,
    limit: usize,
    error: Option<StudioError>,
    export: Option<ExportStatus>,
    next_id: u64,
}

impl Default for ImageStudio {
    fn default() -> Self {
        Self::new(MAX_HISTORY)
    }
}

impl ImageStudio {
    pub fn new(limit: usize) -> Self {
        ImageStudio {
            id: Uuid::new_v4(),
            prompt: String::new(),
            generating: false,
            current: None,
            history: VecDeque::with_capacity(limit),
            limit: limit.clamp(1, MAX_HISTORY),
            error: None,
            export: None,
            next_id: 0,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn current(&self) -> Option<&GeneratedImage> {
        self.current.as_ref()
    }

    /// Newest first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &GeneratedImage> {
        self.history.iter()
    }

    pub fn error(&self) -> Option<&StudioError> {
        self.error.as_ref()
    }

    pub fn export_status(&self) -> Option<&ExportStatus> {
        self.export.as_ref()
    }

    pub fn can_submit(&self) -> bool {
        !self.generating && !self.prompt.trim().is_empty()
    }

    pub fn set_prompt(&mut self, value: String) {
        self.prompt = value;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Accept the prompt, or `None` when it is blank or a generation is running.
    /// The prompt stays in the input box.
    pub fn submit(&mut self) -> Option<ImageRequest> {
        if !self.can_submit() {
            return None;
        }
        self.generating = true;
        self.error = None;
        Some(ImageRequest { studio_id: self.id, prompt: self.prompt.clone() })
    }

    /// Apply a completion. Returns `false` when it belongs to another studio.
    pub fn complete(&mut self, completion: ImageCompletion) -> bool {
        if completion.studio_id != self.id {
            tracing::debug!(stale = %completion.studio_id, "dropping image for retired studio");
            return false;
        }

        self.generating = false;
        match completion.result {
            Ok(mut image) => {
                image.id = self.next_id;
                self.next_id += 1;
                tracing::info!(id = image.id, "image generated");
                self.current = Some(image.clone());
                self.export = None;
                self.history.push_front(image);
                self.history.truncate(self.limit);
            }
            Err(err) => {
                tracing::warn!(error = %err, "image generation failed");
                self.error = Some(err);
            }
        }
        true
    }

    /// Make a history entry current. No network call.
    pub fn select(&mut self, id: u64) -> bool {
        match self.history.iter().find(|img| img.id == id) {
            Some(image) => {
                self.current = Some(image.clone());
                self.export = None;
                true
            }
            None => false,
        }
    }

    /// The `(id, url)` of the current image, for exporting.
    pub fn export_job(&self) -> Option<(u64, String)> {
        self.current.as_ref().map(|img| (img.id, img.url.clone()))
    }

    pub fn finish_export(&mut self, result: Result<PathBuf, String>) {
        self.export = Some(match result {
            Ok(path) => ExportStatus::Saved(path),
            Err(err) => {
                tracing::warn!(error = %err, "image export failed");
                ExportStatus::Failed(err)
            }
        });
    }
}

/// Run an accepted request against the backend and decode the image on the
/// blocking pool, so `complete` only moves the finished image into place.
pub async fn dispatch(backend: Arc<dyn StudioBackend>, request: ImageRequest) -> ImageCompletion {
    let ImageRequest { studio_id, prompt } = request;
    let result = match backend.generate_image(&prompt).await {
        Ok(url) => tokio::task::spawn_blocking(move || GeneratedImage::decode(url, prompt))
            .await
            .unwrap_or_else(|e| Err(StudioError::ImageDecode(e.to_string()))),
        Err(err) => Err(err),
    };
    ImageCompletion { studio_id, result }
}

/// Decode `url` and write it into `dir` as a PNG.
pub fn export(url: &str, dir: &Path, id: u64) -> anyhow::Result<PathBuf> {
    let bytes = imaging::decode_data_uri(url)?;
    imaging::save_png(&bytes, dir, id)
}

#[cfg(test)]
#[path = "studio_test.rs"]
mod tests;
