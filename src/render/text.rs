use crate::{
    foundation::error::{SceneError, SceneResult},
    render::font::PreparedFont,
};

/// Brush carried through parley layouts; the renderer paints with the op color instead.
pub(crate) type TextBrush = [u8; 4];

/// Shapes single-line labels with parley against one registered font face.
///
/// Font files may be collections; the engine pins family, weight, style and width of the
/// face at [`PreparedFont::index`] so parley shapes with the same face the backend draws.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    family_name: String,
    face: FaceAttrs,
    face_index: u32,
}

#[derive(Clone, Copy)]
struct FaceAttrs {
    weight: parley::style::FontWeight,
    style: parley::style::FontStyle,
    width: parley::style::FontWidth,
}

impl TextLayoutEngine {
    /// Register `font` and prepare fresh parley contexts.
    pub fn new(font: &PreparedFont) -> SceneResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.bytes.as_ref().clone()),
            None,
        );
        let (family_id, face) = families
            .iter()
            .find_map(|(id, faces)| {
                faces.iter().find(|info| info.index() == font.index).map(|info| {
                    let attrs = FaceAttrs {
                        weight: info.weight(),
                        style: info.style(),
                        width: info.width(),
                    };
                    (*id, attrs)
                })
            })
            .ok_or_else(|| {
                SceneError::render(format!(
                    "font bytes have no face at index {} ({} families registered)",
                    font.index,
                    families.len()
                ))
            })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SceneError::render("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            face,
            face_index: font.index,
        })
    }

    /// Face index every layout is shaped with.
    pub(crate) fn face_index(&self) -> u32 {
        self.face_index
    }

    /// Shape `text` on a single unbroken line.
    pub fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
    ) -> SceneResult<parley::Layout<TextBrush>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SceneError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontWeight(self.face.weight));
        builder.push_default(parley::style::StyleProperty::FontStyle(self.face.style));
        builder.push_default(parley::style::StyleProperty::FontWidth(self.face.width));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush([255, 255, 255, 255]));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Glyphs of a layout in visual order, positioned in layout space.
///
/// Fails when a run was shaped with a face other than `face_index`, since the backend
/// draws every glyph id with that face.
pub(crate) fn positioned_glyphs(
    layout: &parley::Layout<TextBrush>,
    face_index: u32,
) -> SceneResult<Vec<vello_cpu::Glyph>> {
    let mut out = Vec::new();
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let shaped = run.run().font().index;
            if shaped != face_index {
                return Err(SceneError::render(format!(
                    "text was shaped with face {shaped}, expected face {face_index}"
                )));
            }
            out.extend(run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            }));
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
