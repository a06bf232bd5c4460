use crate::{
    foundation::core::{Vec3, WorldDirections},
    foundation::error::{SceneError, SceneResult},
    scene::color::Color,
};

/// Radius of a [`Shape::Dot`] created by [`Mobject::dot`].
pub const DEFAULT_DOT_RADIUS: f64 = 0.08;
/// Stroke width (hundredths of a world unit) of outlined shapes.
pub const DEFAULT_STROKE_WIDTH: f64 = 4.0;
/// Gap left by [`Mobject::next_to`].
pub const DEFAULT_MOBJECT_TO_MOBJECT_BUFFER: f64 = 0.25;
/// Gap left by [`Mobject::to_edge`].
pub const DEFAULT_MOBJECT_TO_EDGE_BUFFER: f64 = 0.5;
/// Text line height in world units per font-size point.
pub const TEXT_UNITS_PER_FONT_SIZE: f64 = 1.0 / 96.0;
/// Estimated advance of one character, as a fraction of the line height.
const TEXT_ADVANCE_PER_CHAR: f64 = 0.5;

/// Identifier of a mobject registered in a [`Scene`](crate::Scene).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct MobjectId(pub u32);

/// Visible extent of the scene in world units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneFrame {
    /// Frame width in world units.
    pub width: f64,
    /// Frame height in world units.
    pub height: f64,
}

impl Default for SceneFrame {
    fn default() -> Self {
        Self::for_aspect(16.0 / 9.0)
    }
}

impl SceneFrame {
    /// Frame height in world units; the width follows the output aspect ratio.
    pub const HEIGHT: f64 = 8.0;

    /// A frame 8 units tall with the given width/height ratio.
    pub fn for_aspect(aspect: f64) -> Self {
        Self {
            width: Self::HEIGHT * aspect,
            height: Self::HEIGHT,
        }
    }

    fn half_extent(self) -> Vec3 {
        Vec3::new(self.width / 2.0, self.height / 2.0, 0.0)
    }
}

/// Geometry of a mobject, relative to its center.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Shape {
    /// A zero-dimensional point, drawn as a small disc.
    Dot {
        /// Disc radius in world units.
        radius: f64,
    },
    /// A straight segment from `center - half` to `center + half`.
    Line {
        /// Half of the segment vector.
        half: Vec3,
    },
    /// An axis-aligned square in the `xy` plane.
    Square {
        /// Side length in world units.
        side: f64,
    },
    /// An axis-aligned cube made of six square faces.
    Cube {
        /// Side length in world units.
        side: f64,
    },
    /// A single line of text.
    Text {
        /// UTF-8 content.
        content: String,
        /// Font size in points.
        font_size: f64,
    },
}

/// Coarse shape category, used to describe a mobject without its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ShapeKind {
    /// See [`Shape::Dot`].
    Point,
    /// See [`Shape::Line`].
    LineSegment,
    /// See [`Shape::Square`].
    Square,
    /// See [`Shape::Cube`].
    Cube,
    /// See [`Shape::Text`].
    Text,
}

/// Interior paint of a closed shape.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Fill {
    /// Fill color.
    pub color: Color,
    /// Fill opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Paint style of a mobject.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Style {
    /// Ink color: outlines, point marks and glyphs.
    pub color: Color,
    /// Outline width in hundredths of a world unit; `0` disables outlines.
    pub stroke_width: f64,
    /// Optional interior fill.
    pub fill: Option<Fill>,
}

impl Style {
    fn outlined(color: Color) -> Self {
        Self {
            color,
            stroke_width: DEFAULT_STROKE_WIDTH,
            fill: None,
        }
    }

    /// Effective fill opacity (`0` when unfilled).
    pub fn fill_opacity(&self) -> f64 {
        self.fill.map(|f| f.opacity).unwrap_or(0.0)
    }
}

/// A mathematical object placed in a scene: a shape plus its position and style.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Mobject {
    /// Human-readable name, used in logs and plan dumps.
    pub name: String,
    /// Geometry relative to `center`.
    pub shape: Shape,
    /// Center position in world units.
    pub center: Vec3,
    /// Paint style.
    pub style: Style,
}

impl Mobject {
    fn new(name: &str, shape: Shape, style: Style) -> Self {
        Self {
            name: name.to_owned(),
            shape,
            center: Vec3::ORIGIN,
            style,
        }
    }

    /// A white point at the origin.
    pub fn dot() -> Self {
        Self::new(
            "dot",
            Shape::Dot {
                radius: DEFAULT_DOT_RADIUS,
            },
            Style::outlined(Color::WHITE),
        )
    }

    /// A white segment between two world points.
    pub fn line(start: Vec3, end: Vec3) -> Self {
        let mut mob = Self::new(
            "line",
            Shape::Line {
                half: (end - start) * 0.5,
            },
            Style::outlined(Color::WHITE),
        );
        mob.center = start.lerp(end, 0.5);
        mob
    }

    /// A white outlined square centered at the origin.
    pub fn square(side: f64) -> Self {
        Self::new("square", Shape::Square { side }, Style::outlined(Color::WHITE))
    }

    /// A blue solid cube centered at the origin, without outlines.
    pub fn cube(side: f64) -> Self {
        Self::new(
            "cube",
            Shape::Cube { side },
            Style {
                color: Color::WHITE,
                stroke_width: 0.0,
                fill: Some(Fill {
                    color: Color::BLUE,
                    opacity: 0.75,
                }),
            },
        )
    }

    /// White text centered at the origin.
    pub fn text(content: impl Into<String>, font_size: f64) -> Self {
        let mut mob = Self::new(
            "text",
            Shape::Text {
                content: content.into(),
                font_size,
            },
            Style::outlined(Color::WHITE),
        );
        mob.style.stroke_width = 0.0;
        mob
    }

    /// Rename the mobject.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Translate by `delta`.
    pub fn shift(mut self, delta: Vec3) -> Self {
        self.center = self.center + delta;
        self
    }

    /// Set the interior fill.
    pub fn set_fill(mut self, color: Color, opacity: f64) -> Self {
        self.style.fill = Some(Fill {
            color,
            opacity: opacity.clamp(0.0, 1.0),
        });
        self
    }

    /// Coarse shape category.
    pub fn kind(&self) -> ShapeKind {
        match self.shape {
            Shape::Dot { .. } => ShapeKind::Point,
            Shape::Line { .. } => ShapeKind::LineSegment,
            Shape::Square { .. } => ShapeKind::Square,
            Shape::Cube { .. } => ShapeKind::Cube,
            Shape::Text { .. } => ShapeKind::Text,
        }
    }

    /// Text content, for text mobjects.
    pub fn text_content(&self) -> Option<&str> {
        match &self.shape {
            Shape::Text { content, .. } => Some(content),
            _ => None,
        }
    }

    /// Half of the axis-aligned bounding box size.
    pub fn half_extent(&self) -> Vec3 {
        match &self.shape {
            Shape::Dot { radius } => Vec3::new(*radius, *radius, 0.0),
            Shape::Line { half } => half.abs(),
            Shape::Square { side } => Vec3::new(side / 2.0, side / 2.0, 0.0),
            Shape::Cube { side } => Vec3::new(side / 2.0, side / 2.0, side / 2.0),
            Shape::Text { content, font_size } => {
                let line_height = font_size * TEXT_UNITS_PER_FONT_SIZE;
                let chars = content.chars().count() as f64;
                Vec3::new(
                    chars * line_height * TEXT_ADVANCE_PER_CHAR / 2.0,
                    line_height / 2.0,
                    0.0,
                )
            }
        }
    }

    /// Number of independently revealed parts (glyphs, faces).
    pub fn part_count(&self) -> usize {
        match &self.shape {
            Shape::Cube { .. } => 6,
            Shape::Text { content, .. } => content.chars().filter(|c| !c.is_whitespace()).count(),
            _ => 1,
        }
        .max(1)
    }

    /// Place this mobject beside `other` in `direction`, `buff` units apart, centers aligned
    /// on the other axes.
    pub fn next_to(mut self, other: &Mobject, direction: Vec3, buff: f64) -> Self {
        self.center = next_to_center(other, &self, direction, buff);
        self
    }

    /// Place this mobject against the frame edge in `edge`, `buff` units inside.
    pub fn to_edge(mut self, edge: Vec3, buff: f64, frame: SceneFrame) -> Self {
        self.center = edge_center(&self, self.center, edge, buff, frame);
        self
    }

    /// Check that geometry and style values are usable.
    pub fn validate(&self) -> SceneResult<()> {
        let bad = |what: &str| {
            Err(SceneError::validation(format!(
                "mobject '{}': {what}",
                self.name
            )))
        };
        if !self.center.is_finite() {
            return bad("center must be finite");
        }
        match &self.shape {
            Shape::Dot { radius } if !(radius.is_finite() && *radius > 0.0) => {
                return bad("dot radius must be finite and > 0");
            }
            Shape::Line { half } if !half.is_finite() || half.length() == 0.0 => {
                return bad("line endpoints must be finite and distinct");
            }
            Shape::Square { side } | Shape::Cube { side }
                if !(side.is_finite() && *side > 0.0) =>
            {
                return bad("side length must be finite and > 0");
            }
            Shape::Text { content, font_size } => {
                if content.trim().is_empty() {
                    return bad("text must be non-empty");
                }
                if !(font_size.is_finite() && *font_size > 0.0) {
                    return bad("font size must be finite and > 0");
                }
            }
            _ => {}
        }
        if !(self.style.stroke_width.is_finite() && self.style.stroke_width >= 0.0) {
            return bad("stroke width must be finite and >= 0");
        }
        Ok(())
    }
}

pub(crate) fn next_to_center(anchor: &Mobject, mob: &Mobject, direction: Vec3, buff: f64) -> Vec3 {
    anchor.center
        + direction * (anchor.half_extent() + mob.half_extent())
        + direction * buff
}

pub(crate) fn edge_center(
    mob: &Mobject,
    center: Vec3,
    edge: Vec3,
    buff: f64,
    frame: SceneFrame,
) -> Vec3 {
    let limit = frame.half_extent();
    let half = mob.half_extent();
    let axis = |c: f64, dir: f64, limit: f64, half: f64| {
        if dir == 0.0 {
            c
        } else {
            dir.signum() * (limit - buff - half)
        }
    };
    Vec3::new(
        axis(center.x, edge.x, limit.x, half.x),
        axis(center.y, edge.y, limit.y, half.y),
        center.z,
    )
}

/// Corners of the six faces of a cube, in the order `IN, OUT, LEFT, RIGHT, UP, DOWN`.
///
/// Each face lists its corners in cyclic order.
pub fn cube_faces(center: Vec3, side: f64) -> [[Vec3; 4]; 6] {
    let h = side / 2.0;
    let face = |normal: Vec3, u: Vec3, v: Vec3| {
        let c = center + normal * h;
        [c + (u + v) * h, c + (v - u) * h, c - (u + v) * h, c + (u - v) * h]
    };
    [
        face(-Vec3::OUT, Vec3::RIGHT, Vec3::UP),
        face(Vec3::OUT, Vec3::RIGHT, Vec3::UP),
        face(Vec3::LEFT, Vec3::UP, Vec3::OUT),
        face(Vec3::RIGHT, Vec3::UP, Vec3::OUT),
        face(Vec3::UP, Vec3::RIGHT, Vec3::OUT),
        face(Vec3::DOWN, Vec3::RIGHT, Vec3::OUT),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/scene/mobject.rs"]
mod tests;
