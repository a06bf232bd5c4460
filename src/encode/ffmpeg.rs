use std::io::{Read as _, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use anyhow::Context as _;

use crate::encode::sink::{FrameSink, SinkConfig, check_order, flatten_premul_over_bg};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{SceneError, SceneResult};
use crate::render::backend::FrameRGBA;

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 file.
    pub out_path: PathBuf,
    /// Replace `out_path` if it exists.
    pub overwrite: bool,
    /// Straight-alpha RGBA8 color that translucent pixels are flattened onto.
    pub bg_rgba: [u8; 4],
    /// x264 constant rate factor; `None` keeps the encoder default.
    pub crf: Option<u8>,
}

impl FfmpegSinkOpts {
    /// MP4 output to `out_path` over black, overwriting.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            bg_rgba: [0, 0, 0, 255],
            crf: None,
        }
    }
}

struct Encoder {
    child: Child,
    stdin: Option<ChildStdin>,
    stderr: JoinHandle<std::io::Result<Vec<u8>>>,
}

/// Streams frames as raw RGBA into a system `ffmpeg` that encodes h264/yuv420p MP4.
///
/// yuv420p needs even frame dimensions; [`FrameSink::begin`] rejects odd sizes.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    encoder: Option<Encoder>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    opaque: Vec<u8>,
}

impl FfmpegSink {
    /// A sink that spawns `ffmpeg` on [`FrameSink::begin`].
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            cfg: None,
            last_idx: None,
            opaque: Vec::new(),
        }
    }

    fn spawn(&self, cfg: SinkConfig) -> SceneResult<Encoder> {
        let mut child = Command::new("ffmpeg")
            .args(ffmpeg_args(&self.opts, cfg))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SceneError::encode(format!("spawn ffmpeg: {e}")))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| SceneError::encode("ffmpeg stdin unavailable"))?;
        let mut pipe = child
            .stderr
            .take()
            .ok_or_else(|| SceneError::encode("ffmpeg stderr unavailable"))?;
        // ffmpeg blocks once its stderr pipe fills up, so drain it concurrently.
        let stderr = std::thread::spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf)?;
            Ok(buf)
        });

        Ok(Encoder {
            child,
            stdin: Some(stdin),
            stderr,
        })
    }
}

/// Command line for encoding `cfg`-sized raw RGBA frames from stdin into `opts.out_path`.
pub(crate) fn ffmpeg_args(opts: &FfmpegSinkOpts, cfg: SinkConfig) -> Vec<String> {
    let mut args: Vec<String> = vec![
        if opts.overwrite { "-y" } else { "-n" }.into(),
        "-loglevel".into(),
        "error".into(),
        "-f".into(),
        "rawvideo".into(),
        "-pix_fmt".into(),
        "rgba".into(),
        "-s".into(),
        format!("{}x{}", cfg.width, cfg.height),
        // Input rate; must precede `-i`.
        "-r".into(),
        format!("{}/{}", cfg.fps.num, cfg.fps.den),
        "-i".into(),
        "pipe:0".into(),
        "-an".into(),
        "-c:v".into(),
        "libx264".into(),
    ];
    if let Some(crf) = opts.crf {
        args.push("-crf".into());
        args.push(crf.to_string());
    }
    args.extend(
        ["-pix_fmt", "yuv420p", "-movflags", "+faststart"]
            .into_iter()
            .map(String::from),
    );
    args.push(opts.out_path.to_string_lossy().into_owned());
    args
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> SceneResult<()> {
        if cfg.width == 0 || cfg.height == 0 || cfg.fps.num == 0 || cfg.fps.den == 0 {
            return Err(SceneError::validation(
                "ffmpeg sink needs a non-empty frame size and fps",
            ));
        }
        if cfg.width % 2 != 0 || cfg.height % 2 != 0 {
            return Err(SceneError::validation(format!(
                "yuv420p output needs even dimensions, got {}x{}",
                cfg.width, cfg.height
            )));
        }
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(SceneError::validation(format!(
                "'{}' exists and overwrite is off",
                self.opts.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(SceneError::encode("ffmpeg was not found on PATH"));
        }
        ensure_parent_dir(&self.opts.out_path)?;

        self.encoder = Some(self.spawn(cfg)?);
        self.opaque = vec![0; cfg.width as usize * cfg.height as usize * 4];
        self.cfg = Some(cfg);
        self.last_idx = None;
        tracing::info!(
            out = %self.opts.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps.as_f64(),
            "encoding"
        );
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SceneResult<()> {
        let Some(cfg) = self.cfg else {
            return Err(SceneError::encode("push_frame before begin"));
        };
        check_order(self.last_idx, idx)?;
        if (frame.width, frame.height) != (cfg.width, cfg.height) {
            return Err(SceneError::validation(format!(
                "frame {} is {}x{}, sink expects {}x{}",
                idx.0, frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        flatten_premul_over_bg(&mut self.opaque, &frame.data, self.opts.bg_rgba)?;

        let stdin = self
            .encoder
            .as_mut()
            .and_then(|e| e.stdin.as_mut())
            .ok_or_else(|| SceneError::encode("ffmpeg sink is closed"))?;
        stdin
            .write_all(&self.opaque)
            .map_err(|e| SceneError::encode(format!("write frame {} to ffmpeg: {e}", idx.0)))?;
        self.last_idx = Some(idx);
        Ok(())
    }

    fn end(&mut self) -> SceneResult<()> {
        let Some(mut encoder) = self.encoder.take() else {
            return Err(SceneError::encode("end before begin"));
        };
        // Closing stdin signals end of stream.
        drop(encoder.stdin.take());
        let status = encoder
            .child
            .wait()
            .map_err(|e| SceneError::encode(format!("wait for ffmpeg: {e}")))?;
        let log = encoder
            .stderr
            .join()
            .map_err(|_| SceneError::encode("ffmpeg stderr reader panicked"))?
            .map_err(|e| SceneError::encode(format!("read ffmpeg stderr: {e}")))?;
        self.cfg = None;

        if !status.success() {
            return Err(SceneError::encode(format!(
                "ffmpeg failed ({status}): {}",
                String::from_utf8_lossy(&log).trim()
            )));
        }
        tracing::info!(
            out = %self.opts.out_path.display(),
            last_frame = ?self.last_idx,
            "encoded"
        );
        Ok(())
    }
}

/// Create the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> SceneResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg -version` runs successfully.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
