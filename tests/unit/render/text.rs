use super::*;
use crate::render::font::resolve_font;

fn system_font() -> Option<PreparedFont> {
    match resolve_font(None, None) {
        Ok(font) => Some(font),
        Err(e) => {
            eprintln!("skipping: no system font ({e})");
            None
        }
    }
}

#[test]
fn shapes_with_the_resolved_face() {
    let Some(font) = system_font() else { return };
    let mut engine = TextLayoutEngine::new(&font).unwrap();
    assert_eq!(engine.face_index(), font.index);

    let layout = engine.layout_line("1D: Line", 24.0).unwrap();
    for line in layout.lines() {
        for item in line.items() {
            if let parley::layout::PositionedLayoutItem::GlyphRun(run) = item {
                assert_eq!(run.run().font().index, font.index);
            }
        }
    }
    let glyphs = positioned_glyphs(&layout, font.index).unwrap();
    assert!(!glyphs.is_empty());
}

#[test]
fn glyphs_from_another_face_are_rejected() {
    let Some(font) = system_font() else { return };
    let mut engine = TextLayoutEngine::new(&font).unwrap();
    let layout = engine.layout_line("0D", 24.0).unwrap();
    let err = positioned_glyphs(&layout, font.index + 1).unwrap_err();
    assert!(matches!(err, SceneError::Render(_)));
}

#[test]
fn missing_face_index_is_an_error() {
    let Some(font) = system_font() else { return };
    let bogus = PreparedFont {
        index: font.index + 64,
        ..font
    };
    let err = TextLayoutEngine::new(&bogus).err().unwrap();
    assert!(matches!(err, SceneError::Render(_)));
}

#[test]
fn rejects_non_positive_size() {
    let Some(font) = system_font() else { return };
    let mut engine = TextLayoutEngine::new(&font).unwrap();
    assert!(engine.layout_line("x", 0.0).is_err());
    assert!(engine.layout_line("x", f32::NAN).is_err());
}
