use crate::{
    animation::lag::Reveal,
    compile::geometry::{disc, partial_path, polyline, stroke_outline},
    composition::model::Composition,
    eval::evaluator::{EvaluatedFrame, EvaluatedNode},
    foundation::core::{BezPath, Canvas, Point, Vec3},
    foundation::error::{SceneError, SceneResult},
    scene::mobject::{Mobject, Shape, TEXT_UNITS_PER_FONT_SIZE, cube_faces},
};

/// Stroke widths are given in hundredths of a world unit.
const STROKE_WIDTH_TO_WORLD: f64 = 0.01;

#[derive(Clone, Debug)]
/// Backend-agnostic render plan for a single frame.
///
/// Ops are in painter's order and already in pixel space (`+y` down, origin top-left).
pub struct RenderPlan {
    /// Output canvas.
    pub canvas: Canvas,
    /// Draw operations, back to front.
    pub ops: Vec<DrawOp>,
}

#[derive(Clone, Debug)]
/// Draw operation emitted by the compiler.
pub enum DrawOp {
    /// Fill a path with a solid color.
    FillPath {
        /// Pixel-space path (non-zero fill).
        path: BezPath,
        /// Straight-alpha RGBA8 color.
        color: [u8; 4],
        /// Extra opacity in `[0, 1]`.
        opacity: f32,
    },
    /// Draw one line of text, centered on `center`.
    Text {
        /// UTF-8 content.
        text: String,
        /// Em size in pixels.
        font_size_px: f32,
        /// Pixel-space center of the laid out line.
        center: Point,
        /// Straight-alpha RGBA8 color.
        color: [u8; 4],
        /// Per-glyph reveal progress.
        reveal: Reveal,
    },
}

/// Compile an evaluated frame into pixel-space draw operations.
#[tracing::instrument(skip(comp, eval), fields(time = eval.time_secs, nodes = eval.nodes.len()))]
pub fn compile_frame(comp: &Composition, eval: &EvaluatedFrame) -> SceneResult<RenderPlan> {
    let mut ops = Vec::with_capacity(eval.nodes.len() * 2);
    for node in &eval.nodes {
        let mob = comp.timeline.mobject(node.id).ok_or_else(|| {
            SceneError::render(format!("evaluated unknown mobject id {}", node.id.0))
        })?;
        compile_node(comp, node, mob, &mut ops);
    }
    Ok(RenderPlan {
        canvas: comp.canvas,
        ops,
    })
}

fn compile_node(comp: &Composition, node: &EvaluatedNode, mob: &Mobject, ops: &mut Vec<DrawOp>) {
    let ppu = comp.pixels_per_unit();
    let px = |p: Vec3| comp.to_px(comp.projection.project(p));
    let draw_alpha = |part: usize, count: usize| node.reveal.part_alpha(part, count);

    match &mob.shape {
        Shape::Dot { radius } => {
            let path = partial_path(&disc(px(node.center), radius * ppu), draw_alpha(0, 1));
            push_fill(ops, path, mob.style.color.to_rgba8(), 1.0);
        }
        Shape::Line { half } => {
            let outline = polyline(&[px(node.center - *half), px(node.center + *half)], false);
            let path = partial_path(&outline, draw_alpha(0, 1));
            push_stroke(ops, &path, mob, ppu);
        }
        Shape::Square { side } => {
            let h = side / 2.0;
            let corners = [
                Vec3::new(h, h, 0.0),
                Vec3::new(-h, h, 0.0),
                Vec3::new(-h, -h, 0.0),
                Vec3::new(h, -h, 0.0),
            ]
            .map(|c| px(node.center + c));
            let path = partial_path(&polyline(&corners, true), draw_alpha(0, 1));
            push_shape(ops, path, mob, ppu);
        }
        Shape::Cube { side } => {
            let faces = cube_faces(node.center, *side);
            let mut order: Vec<usize> = (0..faces.len()).collect();
            let depth = |i: usize| {
                let sum: Vec3 = faces[i].iter().sum();
                comp.projection.view_depth(sum * 0.25)
            };
            order.sort_by(|a, b| depth(*a).total_cmp(&depth(*b)));
            for i in order {
                let corners = faces[i].map(px);
                let path = partial_path(&polyline(&corners, true), draw_alpha(i, faces.len()));
                push_shape(ops, path, mob, ppu);
            }
        }
        Shape::Text { content, font_size } => {
            ops.push(DrawOp::Text {
                text: content.clone(),
                font_size_px: (font_size * TEXT_UNITS_PER_FONT_SIZE * ppu) as f32,
                center: px(node.center),
                color: mob.style.color.to_rgba8(),
                reveal: node.reveal,
            });
        }
    }
}

fn push_shape(ops: &mut Vec<DrawOp>, path: BezPath, mob: &Mobject, ppu: f64) {
    if let Some(fill) = mob.style.fill
        && fill.opacity > 0.0
    {
        push_fill(ops, path.clone(), fill.color.to_rgba8(), fill.opacity as f32);
    }
    push_stroke(ops, &path, mob, ppu);
}

fn push_stroke(ops: &mut Vec<DrawOp>, path: &BezPath, mob: &Mobject, ppu: f64) {
    let width = mob.style.stroke_width * STROKE_WIDTH_TO_WORLD * ppu;
    if width <= 0.0 || path.elements().is_empty() {
        return;
    }
    push_fill(
        ops,
        stroke_outline(path, width),
        mob.style.color.to_rgba8(),
        1.0,
    );
}

fn push_fill(ops: &mut Vec<DrawOp>, path: BezPath, color: [u8; 4], opacity: f32) {
    if path.elements().is_empty() || opacity <= 0.0 {
        return;
    }
    ops.push(DrawOp::FillPath {
        path,
        color,
        opacity: opacity.min(1.0),
    });
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;
