//! Background images: uploads stored as data URLs, external images fetched
//! over HTTP, and decoding into RGBA pixels for display.

mod data_url;
mod fetcher;

pub use data_url::{decode_data_url, encode_data_url, mime_for_path};
pub use fetcher::{validate_image_url, BackgroundFetcher};

use anyhow::{Context, Result};
use image::imageops::FilterType;

use crate::models::countdown::Background;

/// Decoded pixels ready to upload as a texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Decode `bytes`, shrinking the image so neither side exceeds `max_side`.
/// Aspect ratio is kept.
pub fn decode_image(bytes: &[u8], max_side: u32) -> Result<DecodedImage> {
    let mut image =
        image::load_from_memory(bytes).context("Unsupported or corrupt background image")?;
    let max_side = max_side.max(1);
    if image.width() > max_side || image.height() > max_side {
        log::debug!(
            "Downscaling {}x{} background to fit {max_side}px",
            image.width(),
            image.height()
        );
        image = image.resize(max_side, max_side, FilterType::Triangle);
    }
    let image = image.to_rgba8();
    let (width, height) = image.dimensions();
    Ok(DecodedImage {
        width,
        height,
        rgba: image.into_raw(),
    })
}

/// Resolve a background source into pixels on a blocking worker, no larger
/// than `max_side` on either axis. `Ok(None)` means there is no background to show.
pub async fn load_background(
    background: Background,
    max_side: u32,
) -> Result<Option<DecodedImage>> {
    let decoded = tokio::task::spawn_blocking(move || -> Result<Option<DecodedImage>> {
        match background {
            Background::None => Ok(None),
            Background::Embedded(data_url) => {
                let bytes = decode_data_url(&data_url)?;
                decode_image(&bytes, max_side).map(Some)
            }
            Background::External(url) => {
                let bytes = BackgroundFetcher::new()?.fetch_image(&url)?;
                decode_image(&bytes, max_side).map(Some)
            }
        }
    })
    .await
    .context("Background loader task failed")??;

    Ok(decoded)
}
