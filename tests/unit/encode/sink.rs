use super::*;

fn frame(w: u32, h: u32, px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: px.repeat((w * h) as usize),
        premultiplied: true,
    }
}

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 2,
        fps: Fps::new(30, 1).unwrap(),
    }
}

#[test]
fn in_memory_sink_captures_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame(2, 2, [0; 4])).unwrap();
    sink.push_frame(FrameIndex(3), &frame(2, 2, [0; 4])).unwrap();
    sink.end().unwrap();

    assert!(sink.is_ended());
    assert_eq!(sink.config(), Some(cfg()));
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 3]);
}

#[test]
fn out_of_order_frames_are_rejected() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(5), &frame(2, 2, [0; 4])).unwrap();
    let err = sink
        .push_frame(FrameIndex(5), &frame(2, 2, [0; 4]))
        .unwrap_err();
    assert!(matches!(err, SceneError::Encode(_)));
}

#[test]
fn flatten_composites_over_background() {
    let src = [0, 0, 0, 0, 128, 0, 0, 128, 10, 20, 30, 255];
    let mut dst = [0u8; 12];
    flatten_premul_over_bg(&mut dst, &src, [0, 0, 200, 255]).unwrap();
    assert_eq!(&dst[0..4], &[0, 0, 200, 255]);
    assert_eq!(&dst[4..8], &[128, 0, 100, 255]);
    assert_eq!(&dst[8..12], &[10, 20, 30, 255]);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = [0u8; 8];
    assert!(flatten_premul_over_bg(&mut dst, &[0u8; 4], [0, 0, 0, 255]).is_err());
}

#[test]
fn in_memory_sink_needs_an_open_stream() {
    let mut sink = InMemorySink::new();
    assert!(sink.push_frame(FrameIndex(0), &frame(2, 2, [0; 4])).is_err());

    sink.begin(cfg()).unwrap();
    sink.end().unwrap();
    assert!(sink.push_frame(FrameIndex(0), &frame(2, 2, [0; 4])).is_err());

    // A fresh begin resets the captured stream.
    sink.begin(cfg()).unwrap();
    assert!(sink.frames().is_empty());
    assert!(!sink.is_ended());
}
