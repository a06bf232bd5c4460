use crate::foundation::error::{SceneError, SceneResult};

pub use kurbo::{Affine, BezPath, Point, Rect};

/// Zero-based index of an output frame.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames `start..end` (end exclusive).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame.
    pub start: FrameIndex,
    /// One past the last frame.
    pub end: FrameIndex,
}

impl FrameRange {
    /// Fails when `end` precedes `start`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> SceneResult<Self> {
        if end < start {
            return Err(SceneError::validation(format!(
                "frame range {}..{} is inverted",
                start.0, end.0
            )));
        }
        Ok(Self { start, end })
    }

    /// Frame count.
    pub fn len_frames(self) -> u64 {
        self.end.0 - self.start.0
    }

    /// Return `true` for an empty range.
    pub fn is_empty(self) -> bool {
        self.end == self.start
    }

    /// Return `true` when `f` lies in the range.
    pub fn contains(self, f: FrameIndex) -> bool {
        (self.start..self.end).contains(&f)
    }
}

/// Frame rate as the fraction `num / den` frames per second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Frames.
    pub num: u32,
    /// Per this many seconds.
    pub den: u32,
}

impl Fps {
    /// Both parts must be non-zero.
    pub fn new(num: u32, den: u32) -> SceneResult<Self> {
        if num == 0 || den == 0 {
            return Err(SceneError::validation(format!("invalid fps {num}/{den}")));
        }
        Ok(Self { num, den })
    }

    /// Frames per second.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Timeline time at which frame number `frames` is sampled.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        frames as f64 * f64::from(self.den) / f64::from(self.num)
    }

    /// Frames fully elapsed after `secs` (negative times give 0).
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }

    /// Nearest whole frame count for `secs`.
    pub fn secs_to_frames_round(self, secs: f64) -> u64 {
        (secs * self.as_f64()).round().max(0.0) as u64
    }
}

/// Raster size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Pixels across.
    pub width: u32,
    /// Pixels down.
    pub height: u32,
}

impl Canvas {
    /// Both sides must be non-zero.
    pub fn new(width: u32, height: u32) -> SceneResult<Self> {
        if width == 0 || height == 0 {
            return Err(SceneError::validation(format!(
                "canvas {width}x{height} has no pixels"
            )));
        }
        Ok(Self { width, height })
    }

    /// Width over height.
    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Point or direction in scene world space.
///
/// World units: the frame is 8 units tall, origin at the frame center, `+y` up and `+z`
/// towards the viewer.
pub type Vec3 = glam::DVec3;

/// Named world directions for [`Vec3`].
///
/// Bring the trait into scope to write `Vec3::UP`, `Vec3::LEFT * 4.0` and so on.
pub trait WorldDirections {
    /// The world origin.
    const ORIGIN: Self;
    /// Towards the top of the frame.
    const UP: Self;
    /// Towards the bottom of the frame.
    const DOWN: Self;
    /// Towards the left edge of the frame.
    const LEFT: Self;
    /// Towards the right edge of the frame.
    const RIGHT: Self;
    /// Out of the screen, towards the viewer.
    const OUT: Self;
}

impl WorldDirections for Vec3 {
    const ORIGIN: Self = Vec3::ZERO;
    const UP: Self = Vec3::Y;
    const DOWN: Self = Vec3::NEG_Y;
    const LEFT: Self = Vec3::NEG_X;
    const RIGHT: Self = Vec3::X;
    const OUT: Self = Vec3::Z;
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
