use anyhow::{Context, Result};
use base64::Engine;
use image::{DynamicImage, GenericImageView};
use std::path::{Path, PathBuf};

const DATA_URI_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Longest edge of history thumbnails.
pub const THUMBNAIL_EDGE: u32 = 256;

/// Decode the payload of a `data:<mime>;base64,<payload>` URI.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
    let rest = uri
        .strip_prefix(DATA_URI_PREFIX)
        .context("not a data URI")?;
    let (_, payload) = rest
        .split_once(BASE64_MARKER)
        .context("data URI is not base64 encoded")?;
    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .context("invalid base64 payload")
}

pub fn load(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).context("Failed to decode image")
}

/// Downscale to fit `max_edge`, keeping the aspect ratio, and encode as PNG.
pub fn thumbnail(img: &DynamicImage, max_edge: u32) -> Result<Vec<u8>> {
    let (width, height) = img.dimensions();
    let resized;
    let img = if width > max_edge || height > max_edge {
        let width_ratio = max_edge as f32 / width as f32;
        let height_ratio = max_edge as f32 / height as f32;
        let scale = width_ratio.min(height_ratio);

        let new_width = ((width as f32 * scale) as u32).max(1);
        let new_height = ((height as f32 * scale) as u32).max(1);

        tracing::trace!(width, height, new_width, new_height, "resizing thumbnail");
        resized = img.resize(new_width, new_height, image::imageops::FilterType::Lanczos3);
        &resized
    } else {
        img
    };

    let mut buffer = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut buffer), image::ImageFormat::Png)
        .context("Failed to encode image")?;
    Ok(buffer)
}

pub fn download_file_name(id: u64) -> String {
    format!("gemini-art-{id}.png")
}

/// Write the image into `dir` as `gemini-art-<id>.png`, re-encoded as PNG.
pub fn save_png(bytes: &[u8], dir: &Path, id: u64) -> Result<PathBuf> {
    let img = load(bytes)?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let path = dir.join(download_file_name(id));
    img.save_with_format(&path, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), "saved generated image");
    Ok(path)
}

#[cfg(test)]
#[path = "imaging_test.rs"]
mod tests;
