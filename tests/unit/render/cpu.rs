use super::*;
use crate::compile::geometry::polyline;
use crate::foundation::core::Canvas;

fn settings(clear: Option<[u8; 4]>) -> RenderSettings {
    RenderSettings {
        clear_rgba: clear,
        font: None,
    }
}

fn square_plan(opacity: f32) -> RenderPlan {
    RenderPlan {
        canvas: Canvas::new(16, 16).unwrap(),
        ops: vec![DrawOp::FillPath {
            path: polyline(
                &[
                    Point::new(4.0, 4.0),
                    Point::new(12.0, 4.0),
                    Point::new(12.0, 12.0),
                    Point::new(4.0, 12.0),
                ],
                true,
            ),
            color: [255, 0, 0, 255],
            opacity,
        }],
    }
}

fn px(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

#[test]
fn fills_path_over_clear_color() {
    let mut backend = CpuBackend::new(settings(Some([0, 0, 255, 255]))).unwrap();
    let frame = backend.render_plan(&square_plan(1.0)).unwrap();
    assert_eq!((frame.width, frame.height), (16, 16));
    assert!(frame.premultiplied);
    assert_eq!(px(&frame, 8, 8), [255, 0, 0, 255]);
    assert_eq!(px(&frame, 1, 1), [0, 0, 255, 255]);
}

#[test]
fn opacity_blends_with_background() {
    let mut backend = CpuBackend::new(settings(Some([0, 0, 0, 255]))).unwrap();
    let frame = backend.render_plan(&square_plan(0.5)).unwrap();
    let [r, g, b, a] = px(&frame, 8, 8);
    assert!((120..=135).contains(&r), "r={r}");
    assert_eq!((g, b, a), (0, 0, 255));
}

#[test]
fn without_clear_the_frame_is_transparent() {
    let mut backend = CpuBackend::new(settings(None)).unwrap();
    let frame = backend
        .render_plan(&RenderPlan {
            canvas: Canvas::new(8, 8).unwrap(),
            ops: Vec::new(),
        })
        .unwrap();
    assert!(frame.data.iter().all(|b| *b == 0));
}

#[test]
fn text_without_font_is_an_error() {
    let mut backend = CpuBackend::new(settings(None)).unwrap();
    let plan = RenderPlan {
        canvas: Canvas::new(8, 8).unwrap(),
        ops: vec![DrawOp::Text {
            text: "0D: Point".to_owned(),
            font_size_px: 12.0,
            center: Point::new(4.0, 4.0),
            color: [255, 255, 255, 255],
            reveal: Reveal::complete(),
        }],
    };
    let err = backend.render_plan(&plan).unwrap_err();
    assert!(matches!(err, SceneError::Render(_)));
}

#[test]
fn worker_settings_are_shared() {
    let backend = CpuBackend::new(settings(Some([1, 2, 3, 255]))).unwrap();
    let s = backend.worker_render_settings().unwrap();
    assert_eq!(s.clear_rgba, Some([1, 2, 3, 255]));
}
