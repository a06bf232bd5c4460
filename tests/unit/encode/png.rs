use super::*;
use crate::foundation::core::Fps;

fn temp_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("dimscene_png_{tag}_{}", std::process::id()))
}

#[test]
fn writes_one_file_per_frame() {
    let dir = temp_dir("seq");
    let mut sink = PngSequenceSink::new(&dir, "Scene", [0, 0, 0, 255]);
    sink.begin(SinkConfig {
        width: 4,
        height: 2,
        fps: Fps::new(15, 1).unwrap(),
    })
    .unwrap();
    let frame = FrameRGBA {
        width: 4,
        height: 2,
        data: [255, 255, 255, 255].repeat(8),
        premultiplied: true,
    };
    sink.push_frame(FrameIndex(0), &frame).unwrap();
    sink.push_frame(FrameIndex(1), &frame).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.written(), 2);
    let first = sink.frame_path(FrameIndex(0));
    assert!(first.ends_with("Scene_00000.png"));
    let img = image::open(&first).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (4, 2));
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn size_mismatch_is_rejected() {
    let dir = temp_dir("mismatch");
    let mut sink = PngSequenceSink::new(&dir, "Scene", [0, 0, 0, 255]);
    sink.begin(SinkConfig {
        width: 4,
        height: 4,
        fps: Fps::new(15, 1).unwrap(),
    })
    .unwrap();
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    let _ = std::fs::remove_dir_all(&dir);
}
