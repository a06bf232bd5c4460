use std::sync::Arc;

use crate::{
    compile::plan::RenderPlan, foundation::error::SceneResult, render::font::PreparedFont,
};

/// Pixels of one rendered frame.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Pixels across.
    pub width: u32,
    /// Pixels down.
    pub height: u32,
    /// Row-major RGBA8, four bytes per pixel, no padding.
    pub data: Vec<u8>,
    /// `true` when color channels are multiplied by alpha (always the case for
    /// [`CpuBackend`](crate::CpuBackend)).
    pub premultiplied: bool,
}

/// Rasterizes compiled [`RenderPlan`]s.
///
/// [`crate::render_frame`] and [`crate::render_range`] drive a backend after evaluating and
/// compiling each frame.
pub trait RenderBackend {
    /// Draw `plan` and return its pixels.
    fn render_plan(&mut self, plan: &RenderPlan) -> SceneResult<FrameRGBA>;

    /// Settings for building identical per-thread backends, when supported.
    fn worker_render_settings(&self) -> Option<RenderSettings> {
        None
    }
}

/// Options shared by every backend.
#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// Straight-alpha RGBA8 painted under every frame; `None` leaves it transparent.
    pub clear_rgba: Option<[u8; 4]>,
    /// Font used for every text op. Plans with text fail to render without one.
    pub font: Option<Arc<PreparedFont>>,
}
