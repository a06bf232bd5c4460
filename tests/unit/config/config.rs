use super::*;

fn temp_config(tag: &str, json: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("dimscene_cfg_{tag}_{}.json", std::process::id()));
    std::fs::write(&path, json).unwrap();
    path
}

#[test]
fn default_is_high_quality_on_black() {
    let cfg = RenderConfig::default();
    assert_eq!(cfg.quality, Quality::High);
    assert_eq!(cfg.canvas().unwrap(), Canvas::new(1920, 1080).unwrap());
    assert_eq!(cfg.fps().unwrap().num, 60);
    assert_eq!(cfg.background_rgba(), [0, 0, 0, 255]);
    cfg.validate().unwrap();
}

#[test]
fn quality_presets() {
    assert_eq!(Quality::Low.dimensions(), (854, 480, 15));
    assert_eq!(Quality::Medium.dimensions(), (1280, 720, 30));
    assert_eq!(Quality::Production.dimensions(), (2560, 1440, 60));
    assert_eq!(Quality::FourK.dimensions(), (3840, 2160, 60));
}

#[test]
fn overrides_win_over_preset() {
    let cfg = RenderConfig {
        quality: Quality::Low,
        width: Some(320),
        fps: Some(24),
        ..RenderConfig::default()
    };
    assert_eq!(cfg.canvas().unwrap(), Canvas::new(320, 480).unwrap());
    assert_eq!(cfg.fps().unwrap().num, 24);
}

#[test]
fn default_output_follows_media_layout() {
    let cfg = RenderConfig {
        quality: Quality::Medium,
        ..RenderConfig::default()
    };
    assert_eq!(
        cfg.default_output("DimensionalProgression").unwrap(),
        PathBuf::from("media/videos/DimensionalProgression/720p30/DimensionalProgression.mp4")
    );
    assert_eq!(
        cfg.default_frames_dir("DimensionalProgression").unwrap(),
        PathBuf::from("media/videos/DimensionalProgression/720p30/DimensionalProgression")
    );
}

#[test]
fn thread_count_decides_parallelism() {
    let mut cfg = RenderConfig::default();
    assert!(!cfg.threading.parallel);
    cfg.set_threads(4);
    assert_eq!(cfg.threading.threads, Some(4));
    assert!(cfg.threading.parallel);
    cfg.set_threads(1);
    assert_eq!(cfg.threading.threads, Some(1));
    assert!(!cfg.threading.parallel);
}

#[test]
fn env_overrides_threading_and_media_dir() {
    let mut cfg = RenderConfig::default();
    cfg.apply_env_from(|key| match key {
        ENV_THREADS => Some("4".to_owned()),
        ENV_CHUNK_SIZE => Some(" 16 ".to_owned()),
        ENV_MEDIA_DIR => Some("/tmp/out".to_owned()),
        _ => None,
    })
    .unwrap();
    assert_eq!(cfg.threading.threads, Some(4));
    assert!(cfg.threading.parallel);
    assert_eq!(cfg.threading.chunk_size, 16);
    assert_eq!(cfg.media_dir, PathBuf::from("/tmp/out"));
}

#[test]
fn env_rejects_garbage() {
    let mut cfg = RenderConfig::default();
    let err = cfg
        .apply_env_from(|key| (key == ENV_THREADS).then(|| "many".to_owned()))
        .unwrap_err();
    assert!(matches!(err, SceneError::Validation(_)));
}

#[test]
fn from_path_reads_partial_json() {
    let path = temp_config(
        "partial",
        r##"{
            "quality": "low",
            "background": "#202020",
            "projection": { "kind": "orthographic" },
            "threading": { "parallel": true }
        }"##,
    );
    let cfg = RenderConfig::from_path(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(cfg.quality, Quality::Low);
    assert_eq!(cfg.background_rgba(), [0x20, 0x20, 0x20, 255]);
    assert_eq!(cfg.projection, Projection::Orthographic);
    assert!(cfg.threading.parallel);
    assert_eq!(cfg.threading.chunk_size, 64);
    assert_eq!(cfg.media_dir, PathBuf::from("media"));
}

#[test]
fn from_path_rejects_bad_values() {
    let path = temp_config("zero", r#"{ "width": 0 }"#);
    let err = RenderConfig::from_path(&path).unwrap_err();
    let _ = std::fs::remove_file(&path);
    assert!(matches!(err, SceneError::Validation(_)));

    let path = temp_config("syntax", "{ quality: ");
    let err = RenderConfig::from_path(&path).unwrap_err();
    let _ = std::fs::remove_file(&path);
    assert!(matches!(err, SceneError::Serde(_)));
}

#[test]
fn compose_binds_scene_to_raster() {
    let cfg = RenderConfig {
        quality: Quality::Low,
        ..RenderConfig::default()
    };
    let comp = cfg
        .compose(crate::scenes::dimensional::build)
        .unwrap();
    assert_eq!(comp.canvas, Canvas::new(854, 480).unwrap());
    assert_eq!(comp.duration.0, 14 * 15);
    assert!((comp.timeline.frame.width - 8.0 * 854.0 / 480.0).abs() < 1e-9);
}
