use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    animation::lag::Reveal,
    compile::plan::{DrawOp, RenderPlan},
    foundation::core::{Affine, BezPath, Point},
    foundation::error::{SceneError, SceneResult},
    render::backend::{FrameRGBA, RenderBackend, RenderSettings},
    render::text::{TextBrush, TextLayoutEngine, positioned_glyphs},
};

/// CPU raster backend powered by `vello_cpu`.
///
/// Text layouts are cached per (text, size) for the lifetime of the backend; parallel
/// renders give each worker its own backend.
pub struct CpuBackend {
    settings: RenderSettings,
    text: Option<TextState>,
}

struct TextState {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
    layouts: HashMap<(String, u32), Arc<parley::Layout<TextBrush>>>,
}

impl CpuBackend {
    /// Create a backend; fails when the configured font cannot be registered.
    pub fn new(settings: RenderSettings) -> SceneResult<Self> {
        let text = match settings.font.as_deref() {
            Some(font) => Some(TextState {
                engine: TextLayoutEngine::new(font)?,
                font: vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(font.bytes.as_ref().clone()),
                    font.index,
                ),
                layouts: HashMap::new(),
            }),
            None => None,
        };
        Ok(Self { settings, text })
    }
}

impl RenderBackend for CpuBackend {
    fn render_plan(&mut self, plan: &RenderPlan) -> SceneResult<FrameRGBA> {
        let width: u16 = plan
            .canvas
            .width
            .try_into()
            .map_err(|_| SceneError::render("canvas width exceeds u16"))?;
        let height: u16 = plan
            .canvas
            .height
            .try_into()
            .map_err(|_| SceneError::render("canvas height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        if let Some([r, g, b, a]) = self.settings.clear_rgba {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(width),
                f64::from(height),
            ));
        }
        for op in &plan.ops {
            self.draw_op(&mut ctx, op)?;
        }

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn worker_render_settings(&self) -> Option<RenderSettings> {
        Some(self.settings.clone())
    }
}

impl CpuBackend {
    fn draw_op(&mut self, ctx: &mut vello_cpu::RenderContext, op: &DrawOp) -> SceneResult<()> {
        match op {
            DrawOp::FillPath {
                path,
                color,
                opacity,
            } => {
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_paint(paint(*color));
                if *opacity < 1.0 {
                    ctx.push_opacity_layer(*opacity);
                }
                ctx.fill_path(&bezpath_to_cpu(path));
                if *opacity < 1.0 {
                    ctx.pop_layer();
                }
                Ok(())
            }
            DrawOp::Text {
                text,
                font_size_px,
                center,
                color,
                reveal,
            } => self.draw_text(ctx, text, *font_size_px, *center, *color, reveal),
        }
    }

    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        font_size_px: f32,
        center: Point,
        color: [u8; 4],
        reveal: &Reveal,
    ) -> SceneResult<()> {
        let state = self.text.as_mut().ok_or_else(|| {
            SceneError::render("text requires a font; configure font.path or font.family")
        })?;
        let key = (text.to_owned(), font_size_px.to_bits());
        let layout = match state.layouts.get(&key) {
            Some(layout) => layout.clone(),
            None => {
                let layout = Arc::new(state.engine.layout_line(text, font_size_px)?);
                state.layouts.insert(key, layout.clone());
                layout
            }
        };

        let origin = Point::new(
            center.x - f64::from(layout.width()) / 2.0,
            center.y - f64::from(layout.height()) / 2.0,
        );
        ctx.set_transform(affine_to_cpu(Affine::translate(origin.to_vec2())));
        ctx.set_paint(paint(color));

        let glyphs = positioned_glyphs(&layout, state.engine.face_index())?;
        let count = glyphs.len();
        if reveal.is_complete() {
            ctx.glyph_run(&state.font)
                .font_size(font_size_px)
                .fill_glyphs(glyphs.into_iter());
            return Ok(());
        }

        let mut done = Vec::with_capacity(count);
        for (i, glyph) in glyphs.into_iter().enumerate() {
            let alpha = reveal.part_alpha(i, count) as f32;
            if alpha >= 1.0 {
                done.push(glyph);
            } else if alpha > 0.0 {
                ctx.push_opacity_layer(alpha);
                ctx.glyph_run(&state.font)
                    .font_size(font_size_px)
                    .fill_glyphs(std::iter::once(glyph));
                ctx.pop_layer();
            }
        }
        if !done.is_empty() {
            ctx.glyph_run(&state.font)
                .font_size(font_size_px)
                .fill_glyphs(done.into_iter());
        }
        Ok(())
    }
}

fn paint(color: [u8; 4]) -> vello_cpu::peniko::Color {
    let [r, g, b, a] = color;
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
