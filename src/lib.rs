//! dimscene renders programmatic math-animation scenes to video.
//!
//! A scene is recorded once into an immutable [`Timeline`] of `play` and `wait` events.
//! Rendering then treats every frame as a pure function of the timeline and a time:
//!
//! - Bind the timeline to a canvas and frame rate as a [`Composition`]
//! - Evaluate, compile and rasterize frames with a [`RenderBackend`]
//! - Stream a frame range into a [`FrameSink`] (ffmpeg MP4, PNG sequence or memory)
//!
//! The built-in "Understanding Dimensions" scene lives in [`scenes::dimensional`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod compile;
pub(crate) mod composition;
pub(crate) mod config;
/// Frame sinks: ffmpeg, PNG sequence and in-memory.
pub mod encode;
pub(crate) mod eval;
pub(crate) mod render;
pub(crate) mod scene;
/// Built-in scenes.
pub mod scenes;

pub use crate::foundation::core::{
    Affine, BezPath, Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Vec3, WorldDirections,
};
pub use crate::foundation::error::{SceneError, SceneResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::lag::{Reveal, sub_alpha};
pub use crate::scene::animation::{
    Animation, AnimationKind, DEFAULT_RUN_TIME, ScheduledAction, ScheduledAnimation,
};
pub use crate::scene::color::Color;
pub use crate::scene::mobject::{
    DEFAULT_MOBJECT_TO_EDGE_BUFFER, DEFAULT_MOBJECT_TO_MOBJECT_BUFFER, Mobject, MobjectId,
    SceneFrame, Shape, ShapeKind, Style,
};
pub use crate::scene::timeline::{PlayEvent, Scene, Timeline, TimelineEvent, WaitEvent};

pub use crate::compile::fingerprint::{FrameFingerprint, fingerprint_eval};
pub use crate::compile::plan::{DrawOp, RenderPlan, compile_frame};
pub use crate::compile::projection::Projection;
pub use crate::composition::model::Composition;
pub use crate::config::{
    ENV_CHUNK_SIZE, ENV_MEDIA_DIR, ENV_THREADS, FontConfig, Quality, RenderConfig,
};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::png::{PngSequenceSink, write_frame_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::eval::evaluator::{EvaluatedFrame, EvaluatedNode, Evaluator};
pub use crate::render::backend::{FrameRGBA, RenderBackend, RenderSettings};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::font::{FontSource, PreparedFont, resolve_font};
pub use crate::render::pipeline::{RenderStats, RenderThreading, render_frame, render_range};
pub use crate::render::text::TextLayoutEngine;
