use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context as _, Result};
use tokio::sync::oneshot::{self, error::TryRecvError};

use super::CountdownApp;
use crate::services::background::{
    encode_data_url, load_background, mime_for_path, DecodedImage,
};

const POLL_INTERVAL: Duration = Duration::from_millis(200);
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Texture for the current background plus any loads still in flight.
#[derive(Default)]
pub(super) struct BackgroundState {
    pub texture: Option<egui::TextureHandle>,
    loaded_revision: Option<u64>,
    pending_load: Option<(u64, oneshot::Receiver<Result<Option<DecodedImage>>>)>,
    pending_upload: Option<oneshot::Receiver<Result<String>>>,
}

impl BackgroundState {
    pub fn upload_in_progress(&self) -> bool {
        self.pending_upload.is_some()
    }
}

impl CountdownApp {
    /// Ask for an image file and encode it off the UI thread.
    pub(super) fn start_background_upload(&mut self) {
        if self.background.pending_upload.is_some() {
            return;
        }

        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
        else {
            return;
        };

        let (tx, rx) = oneshot::channel();
        self.runtime.spawn(async move {
            let _ = tx.send(read_as_data_url(path).await);
        });
        self.background.pending_upload = Some(rx);
    }

    pub(super) fn poll_background_upload(&mut self, ctx: &egui::Context) {
        let Some(rx) = self.background.pending_upload.as_mut() else {
            return;
        };

        match rx.try_recv() {
            Ok(Ok(data_url)) => {
                self.background.pending_upload = None;
                self.countdown_service.set_embedded_background(data_url);
                self.form.background_url.clear();
                self.toast_manager.success("Background image uploaded");
            }
            Ok(Err(err)) => {
                self.background.pending_upload = None;
                log::warn!("Background upload failed: {err:#}");
                self.toast_manager.error(format!("Could not read image: {err}"));
            }
            Err(TryRecvError::Empty) => {
                ctx.request_repaint_after(POLL_INTERVAL);
            }
            Err(TryRecvError::Closed) => {
                self.background.pending_upload = None;
                log::error!("Background upload worker disconnected unexpectedly");
            }
        }
    }

    /// Keep the painted texture in step with the configured background.
    pub(super) fn sync_background(&mut self, ctx: &egui::Context) {
        self.poll_background_load(ctx);

        let revision = self.countdown_service.background_revision();
        let up_to_date = self.background.loaded_revision == Some(revision)
            || matches!(self.background.pending_load, Some((pending, _)) if pending == revision);
        // Wait until the URL is no longer being typed
        if up_to_date || self.form.background_url_has_focus {
            return;
        }

        let source = self.countdown_service.config().background().clone();
        if source.is_none() {
            self.background.texture = None;
            self.background.pending_load = None;
            self.background.loaded_revision = Some(revision);
            return;
        }

        log::debug!("Loading background revision {revision}");
        // Larger textures make the renderer panic
        let max_side = u32::try_from(ctx.input(|i| i.max_texture_side)).unwrap_or(u32::MAX);
        let (tx, rx) = oneshot::channel();
        self.runtime.spawn(async move {
            let _ = tx.send(load_background(source, max_side).await);
        });
        // Replacing the receiver drops any older load
        self.background.pending_load = Some((revision, rx));
        ctx.request_repaint_after(POLL_INTERVAL);
    }

    fn poll_background_load(&mut self, ctx: &egui::Context) {
        let Some((revision, rx)) = self.background.pending_load.as_mut() else {
            return;
        };
        let revision = *revision;

        match rx.try_recv() {
            Ok(result) => {
                self.background.pending_load = None;
                self.background.loaded_revision = Some(revision);
                match result {
                    Ok(Some(image)) => {
                        let color_image = egui::ColorImage::from_rgba_unmultiplied(
                            [image.width as usize, image.height as usize],
                            &image.rgba,
                        );
                        self.background.texture = Some(ctx.load_texture(
                            "countdown_background",
                            color_image,
                            egui::TextureOptions::LINEAR,
                        ));
                    }
                    Ok(None) => self.background.texture = None,
                    Err(err) => {
                        log::warn!("Failed to load background: {err:#}");
                        self.background.texture = None;
                        self.toast_manager
                            .warning("Background image could not be loaded");
                    }
                }
            }
            Err(TryRecvError::Empty) => {
                ctx.request_repaint_after(POLL_INTERVAL);
            }
            Err(TryRecvError::Closed) => {
                self.background.pending_load = None;
                self.background.loaded_revision = Some(revision);
                log::error!("Background loader disconnected unexpectedly");
            }
        }
    }
}

async fn read_as_data_url(path: PathBuf) -> Result<String> {
    let bytes = tokio::fs::read(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(encode_data_url(&bytes, mime_for_path(&path)))
}
