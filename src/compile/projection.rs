use glam::{DMat3, DVec2};

use crate::foundation::core::{Point, Vec3};

/// Maps world points onto the 2D frame plane.
///
/// `Oblique` shears depth into the picture plane so solids read as three-dimensional
/// without a camera rig.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Projection {
    /// Drop the `z` component.
    Orthographic,
    /// Offset each point by `depth * z` along the direction `angle_deg` (counterclockwise from
    /// `+x`).
    Oblique {
        /// Receding axis angle in degrees.
        angle_deg: f64,
        /// Foreshortening applied to depth.
        depth: f64,
    },
}

impl Default for Projection {
    fn default() -> Self {
        Self::Oblique {
            angle_deg: 30.0,
            depth: 0.5,
        }
    }
}

impl Projection {
    /// Linear map from world space into view space.
    ///
    /// View `x`/`y` are frame-plane coordinates (world units, `+y` up); view `z` grows
    /// towards the viewer.
    pub fn view_matrix(self) -> DMat3 {
        match self {
            Self::Orthographic => DMat3::IDENTITY,
            Self::Oblique { angle_deg, depth } => {
                let (s, c) = angle_deg.to_radians().sin_cos();
                let recede = DVec2::new(c, s) * depth;
                // Points towards the viewer shift down-left; the implied eye sits along
                // +z, +x * c, +y * s.
                DMat3::from_cols(
                    Vec3::new(1.0, 0.0, recede.x),
                    Vec3::new(0.0, 1.0, recede.y),
                    Vec3::new(-recede.x, -recede.y, 1.0),
                )
            }
        }
    }

    /// Project a world point to frame-plane coordinates (world units, `+y` up).
    pub fn project(self, p: Vec3) -> Point {
        let v = self.view_matrix() * p;
        Point::new(v.x, v.y)
    }

    /// Depth along the view direction; larger values are closer to the viewer.
    pub fn view_depth(self, p: Vec3) -> f64 {
        self.view_matrix().row(2).dot(p)
    }

    pub(crate) fn validate(self) -> crate::foundation::error::SceneResult<()> {
        if let Self::Oblique { angle_deg, depth } = self
            && !(angle_deg.is_finite() && depth.is_finite() && depth >= 0.0)
        {
            return Err(crate::foundation::error::SceneError::validation(
                "oblique projection needs a finite angle and depth >= 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/projection.rs"]
mod tests;
