use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::sink::{FrameSink, SinkConfig, check_order, flatten_premul_over_bg};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{SceneError, SceneResult};
use crate::render::backend::FrameRGBA;

/// Sink that writes each frame as `<dir>/<prefix>_<frame>.png`.
///
/// Frames are flattened over `bg_rgba` so the images are opaque.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    prefix: String,
    bg_rgba: [u8; 4],
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    scratch: Vec<u8>,
    written: u64,
}

impl PngSequenceSink {
    /// Write frames into `dir`, named after `prefix`.
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>, bg_rgba: [u8; 4]) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            bg_rgba,
            cfg: None,
            last_idx: None,
            scratch: Vec::new(),
            written: 0,
        }
    }

    /// Path the frame `idx` is written to.
    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("{}_{:05}.png", self.prefix, idx.0))
    }

    /// Number of files written so far.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> SceneResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create output directory '{}'", self.dir.display()))?;
        self.scratch = vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4];
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SceneResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| SceneError::encode("png sink not started"))?;
        check_order(self.last_idx, idx)?;
        self.last_idx = Some(idx);
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(SceneError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        flatten_premul_over_bg(&mut self.scratch, &frame.data, self.bg_rgba)?;
        let path = self.frame_path(idx);
        write_png(&path, &self.scratch, frame.width, frame.height)?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> SceneResult<()> {
        tracing::info!(dir = %self.dir.display(), frames = self.written, "png sequence written");
        self.cfg = None;
        Ok(())
    }
}

/// Write opaque or straight-alpha RGBA8 pixels as a PNG file.
pub fn write_png(path: &Path, rgba: &[u8], width: u32, height: u32) -> SceneResult<()> {
    image::save_buffer_with_format(
        path,
        rgba,
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Flatten a rendered frame over `bg_rgba` and write it as a PNG.
pub fn write_frame_png(path: &Path, frame: &FrameRGBA, bg_rgba: [u8; 4]) -> SceneResult<()> {
    crate::encode::ffmpeg::ensure_parent_dir(path)?;
    let mut rgba = vec![0u8; frame.data.len()];
    flatten_premul_over_bg(&mut rgba, &frame.data, bg_rgba)?;
    write_png(path, &rgba, frame.width, frame.height)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
