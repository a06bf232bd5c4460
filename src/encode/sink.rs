use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{SceneError, SceneResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::backend::FrameRGBA;

/// Stream parameters announced to a sink before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Playback rate.
    pub fps: Fps,
}

/// Consumer of rendered frames.
///
/// A render calls `begin` once, then `push_frame` with strictly increasing indices, then
/// `end` once. Sinks reject out-of-order frames.
pub trait FrameSink: Send {
    /// Prepare for a stream of `cfg`-sized frames.
    fn begin(&mut self, cfg: SinkConfig) -> SceneResult<()>;
    /// Accept frame `idx` (premultiplied RGBA8).
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SceneResult<()>;
    /// Finish the stream and flush any output.
    fn end(&mut self) -> SceneResult<()>;
}

/// Keeps every pushed frame in memory.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stream parameters from the last `begin`.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Frames pushed since the last `begin`, in order.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// Return `true` once `end` has been called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> SceneResult<()> {
        *self = Self {
            cfg: Some(cfg),
            ..Self::default()
        };
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SceneResult<()> {
        if self.cfg.is_none() || self.ended {
            return Err(SceneError::encode("in-memory sink is not open"));
        }
        check_order(self.frames.last().map(|(i, _)| *i), idx)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> SceneResult<()> {
        self.ended = true;
        Ok(())
    }
}

pub(crate) fn check_order(last: Option<FrameIndex>, idx: FrameIndex) -> SceneResult<()> {
    match last {
        Some(last) if idx <= last => Err(SceneError::encode(format!(
            "frame {} pushed after frame {}",
            idx.0, last.0
        ))),
        _ => Ok(()),
    }
}

/// Composite premultiplied `src` over the opaque color `bg` into `dst` (opaque RGBA8).
pub(crate) fn flatten_premul_over_bg(dst: &mut [u8], src: &[u8], bg: [u8; 4]) -> SceneResult<()> {
    if dst.len() != src.len() || dst.len() % 4 != 0 {
        return Err(SceneError::encode(format!(
            "cannot flatten {} source bytes into {} destination bytes",
            src.len(),
            dst.len()
        )));
    }

    for (out, px) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let keep = 255 - u16::from(px[3]);
        for c in 0..3 {
            let over = u16::from(px[c]) + mul_div255_u16(u16::from(bg[c]), keep);
            out[c] = over.min(255) as u8;
        }
        out[3] = 255;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
