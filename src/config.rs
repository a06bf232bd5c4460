//! Render configuration: quality presets, an optional JSON file and environment overrides.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    compile::projection::Projection,
    composition::model::Composition,
    foundation::core::{Canvas, Fps},
    foundation::error::{SceneError, SceneResult},
    render::backend::RenderSettings,
    render::font::resolve_font,
    render::pipeline::RenderThreading,
    scene::color::Color,
    scene::mobject::SceneFrame,
    scenes::SceneFactory,
};

/// Overrides the worker thread count.
pub const ENV_THREADS: &str = "DIMSCENE_THREADS";
/// Overrides the render chunk size.
pub const ENV_CHUNK_SIZE: &str = "DIMSCENE_CHUNK_SIZE";
/// Overrides the media output directory.
pub const ENV_MEDIA_DIR: &str = "DIMSCENE_MEDIA_DIR";

/// Output resolution and frame rate presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    /// 854x480 at 15 fps.
    Low,
    /// 1280x720 at 30 fps.
    Medium,
    /// 1920x1080 at 60 fps.
    #[default]
    High,
    /// 2560x1440 at 60 fps.
    Production,
    /// 3840x2160 at 60 fps.
    #[serde(rename = "fourk", alias = "4k")]
    FourK,
}

impl Quality {
    /// `(width, height, fps)` of the preset.
    pub fn dimensions(self) -> (u32, u32, u32) {
        match self {
            Self::Low => (854, 480, 15),
            Self::Medium => (1280, 720, 30),
            Self::High => (1920, 1080, 60),
            Self::Production => (2560, 1440, 60),
            Self::FourK => (3840, 2160, 60),
        }
    }
}

/// Font selection for text.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Font file; takes precedence over `family`.
    pub path: Option<PathBuf>,
    /// System family name; falls back to the system sans-serif face.
    pub family: Option<String>,
}

/// Everything needed to render a scene to disk.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Resolution and frame rate preset.
    pub quality: Quality,
    /// Width override in pixels.
    pub width: Option<u32>,
    /// Height override in pixels.
    pub height: Option<u32>,
    /// Frame rate override.
    pub fps: Option<u32>,
    /// Background color.
    pub background: Color,
    /// Text font.
    pub font: FontConfig,
    /// Projection for solids.
    pub projection: Projection,
    /// Threading and frame elision.
    pub threading: RenderThreading,
    /// Root of the default output tree.
    pub media_dir: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            width: None,
            height: None,
            fps: None,
            background: Color::BLACK,
            font: FontConfig::default(),
            projection: Projection::default(),
            threading: RenderThreading::default(),
            media_dir: PathBuf::from("media"),
        }
    }
}

impl RenderConfig {
    /// Read a JSON config file.
    pub fn from_path(path: &Path) -> SceneResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text)
            .map_err(|e| SceneError::serde(format!("config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply `DIMSCENE_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> SceneResult<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply `DIMSCENE_*` overrides using `get` to look variables up.
    pub fn apply_env_from(&mut self, get: impl Fn(&str) -> Option<String>) -> SceneResult<()> {
        if let Some(v) = get(ENV_THREADS) {
            self.set_threads(parse_env_usize(ENV_THREADS, &v)?);
        }
        if let Some(v) = get(ENV_CHUNK_SIZE) {
            self.threading.chunk_size = parse_env_usize(ENV_CHUNK_SIZE, &v)?;
        }
        if let Some(v) = get(ENV_MEDIA_DIR)
            && !v.trim().is_empty()
        {
            self.media_dir = PathBuf::from(v);
        }
        Ok(())
    }

    /// Use `n` render threads; more than one turns parallel rendering on.
    pub fn set_threads(&mut self, n: usize) {
        self.threading.threads = Some(n);
        self.threading.parallel = n > 1;
    }

    /// Check value ranges.
    pub fn validate(&self) -> SceneResult<()> {
        self.canvas()?;
        self.fps()?;
        if self.threading.threads == Some(0) {
            return Err(SceneError::validation("threading.threads must be >= 1"));
        }
        self.projection.validate()
    }

    /// Output canvas after overrides.
    pub fn canvas(&self) -> SceneResult<Canvas> {
        let (w, h, _) = self.quality.dimensions();
        Canvas::new(self.width.unwrap_or(w), self.height.unwrap_or(h))
    }

    /// Output frame rate after overrides.
    pub fn fps(&self) -> SceneResult<Fps> {
        let (_, _, fps) = self.quality.dimensions();
        Fps::new(self.fps.unwrap_or(fps), 1)
    }

    /// Straight RGBA8 background.
    pub fn background_rgba(&self) -> [u8; 4] {
        self.background.to_rgba8()
    }

    /// Record `scene` for this canvas's aspect ratio and bind it to the configured raster.
    #[tracing::instrument(skip(self, scene))]
    pub fn compose(&self, scene: SceneFactory) -> SceneResult<Composition> {
        let canvas = self.canvas()?;
        let fps = self.fps()?;
        let timeline = scene(SceneFrame::for_aspect(canvas.aspect()))?;
        let comp = Composition::new(timeline, canvas, fps, self.projection)?;
        tracing::info!(
            scene = comp.name(),
            width = canvas.width,
            height = canvas.height,
            fps = fps.num,
            frames = comp.duration.0,
            "composed"
        );
        Ok(comp)
    }

    /// Backend settings: the background as clear color plus the resolved text font.
    pub fn render_settings(&self) -> SceneResult<RenderSettings> {
        let font = resolve_font(self.font.path.as_deref(), self.font.family.as_deref())?;
        Ok(RenderSettings {
            clear_rgba: Some(self.background_rgba()),
            font: Some(std::sync::Arc::new(font)),
        })
    }

    /// Default output location: `<media_dir>/videos/<scene>/<height>p<fps>/<scene>.mp4`.
    pub fn default_output(&self, scene: &str) -> SceneResult<PathBuf> {
        let canvas = self.canvas()?;
        let fps = self.fps()?;
        Ok(self
            .media_dir
            .join("videos")
            .join(scene)
            .join(format!("{}p{}", canvas.height, fps.num))
            .join(format!("{scene}.mp4")))
    }

    /// Default PNG sequence directory: [`Self::default_output`] without its extension.
    pub fn default_frames_dir(&self, scene: &str) -> SceneResult<PathBuf> {
        Ok(self.default_output(scene)?.with_extension(""))
    }
}

fn parse_env_usize(key: &str, value: &str) -> SceneResult<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| SceneError::validation(format!("{key} must be a non-negative integer")))
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
