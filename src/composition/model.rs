use crate::{
    compile::projection::Projection,
    foundation::core::{Affine, Canvas, Fps, FrameIndex, FrameRange, Point},
    foundation::error::{SceneError, SceneResult},
    scene::timeline::Timeline,
};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A timeline bound to an output raster.
///
/// The composition owns everything needed to turn a [`Timeline`] into frames: canvas size,
/// frame rate and the projection used for solids. World units map to pixels so that the
/// scene frame height fills the canvas height.
pub struct Composition {
    /// Timeline frame rate.
    pub fps: Fps,
    /// Output canvas dimensions.
    pub canvas: Canvas,
    /// Total composition duration in frames.
    pub duration: FrameIndex,
    /// Projection applied to 3D geometry.
    pub projection: Projection,
    /// The recorded scene.
    pub timeline: Timeline,
}

impl Composition {
    /// Bind `timeline` to a canvas and frame rate.
    ///
    /// The duration is the timeline length rounded to the nearest frame (at least one).
    pub fn new(
        timeline: Timeline,
        canvas: Canvas,
        fps: Fps,
        projection: Projection,
    ) -> SceneResult<Self> {
        let frames = fps.secs_to_frames_round(timeline.duration_secs).max(1);
        let comp = Self {
            fps,
            canvas,
            duration: FrameIndex(frames),
            projection,
            timeline,
        };
        comp.validate()?;
        Ok(comp)
    }

    /// Scene name.
    pub fn name(&self) -> &str {
        &self.timeline.name
    }

    /// Validate raster and timeline invariants.
    pub fn validate(&self) -> SceneResult<()> {
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(SceneError::validation("fps must have num>0 and den>0"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(SceneError::validation("canvas width/height must be > 0"));
        }
        if self.duration.0 == 0 {
            return Err(SceneError::validation("duration must be > 0 frames"));
        }
        if !(self.timeline.frame.height.is_finite() && self.timeline.frame.height > 0.0) {
            return Err(SceneError::validation("scene frame height must be > 0"));
        }
        if !(self.timeline.duration_secs.is_finite() && self.timeline.duration_secs >= 0.0) {
            return Err(SceneError::validation("timeline duration must be finite"));
        }
        self.projection.validate()
    }

    /// Every frame of the composition.
    pub fn full_range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: self.duration,
        }
    }

    /// Timeline time of `frame` in seconds.
    pub fn frame_time(&self, frame: FrameIndex) -> f64 {
        self.fps.frames_to_secs(frame.0)
    }

    /// Last frame whose time is at or before `secs`, clamped to the composition.
    pub fn frame_at(&self, secs: f64) -> FrameIndex {
        let f = self.fps.secs_to_frames_floor(secs.max(0.0));
        FrameIndex(f.min(self.duration.0.saturating_sub(1)))
    }

    /// Pixels per world unit.
    pub fn pixels_per_unit(&self) -> f64 {
        f64::from(self.canvas.height) / self.timeline.frame.height
    }

    /// World (frame plane, `+y` up, origin centered) to pixel (`+y` down) transform.
    pub fn world_to_px(&self) -> Affine {
        let ppu = self.pixels_per_unit();
        Affine::new([
            ppu,
            0.0,
            0.0,
            -ppu,
            f64::from(self.canvas.width) / 2.0,
            f64::from(self.canvas.height) / 2.0,
        ])
    }

    /// Map a frame-plane point to pixels.
    pub fn to_px(&self, p: Point) -> Point {
        self.world_to_px() * p
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
