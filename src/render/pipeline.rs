use std::collections::HashMap;

use rayon::prelude::*;

use crate::{
    compile::fingerprint::{FrameFingerprint, fingerprint_eval},
    compile::plan::compile_frame,
    composition::model::Composition,
    encode::sink::{FrameSink, SinkConfig},
    eval::evaluator::{EvaluatedFrame, Evaluator},
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{SceneError, SceneResult},
    render::backend::{FrameRGBA, RenderBackend, RenderSettings},
    render::cpu::CpuBackend,
};

/// Evaluate + compile + render a single frame.
///
/// Returns a [`FrameRGBA`] containing **premultiplied** RGBA8 pixels.
pub fn render_frame(
    comp: &Composition,
    frame: FrameIndex,
    backend: &mut dyn RenderBackend,
) -> SceneResult<FrameRGBA> {
    let eval = Evaluator::eval_frame(comp, frame)?;
    let plan = compile_frame(comp, &eval)?;
    backend.render_plan(&plan)
}

/// How [`render_range`] spreads work over threads.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderThreading {
    /// Render chunks on a rayon pool, one backend per worker.
    pub parallel: bool,
    /// Frames evaluated and rendered per chunk.
    pub chunk_size: usize,
    /// Worker count; `None` uses rayon's default.
    pub threads: Option<usize>,
    /// Render each distinct frame once per chunk and reuse it for identical frames.
    pub static_frame_elision: bool,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
            static_frame_elision: false,
        }
    }
}

/// Frame counters reported by [`render_range`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RenderStats {
    /// Frames delivered to the sink.
    pub frames_total: u64,
    /// Frames actually rasterized.
    pub frames_rendered: u64,
    /// Frames reused from an identical earlier frame.
    pub frames_elided: u64,
}

/// Render `range` and push every frame to `sink` in increasing frame order.
///
/// Sequential renders use `backend`; parallel renders build one [`CpuBackend`] per worker
/// from `backend`'s worker settings.
#[tracing::instrument(skip(comp, backend, sink), fields(scene = comp.name()))]
pub fn render_range(
    comp: &Composition,
    range: FrameRange,
    backend: &mut dyn RenderBackend,
    sink: &mut dyn FrameSink,
    threading: &RenderThreading,
) -> SceneResult<RenderStats> {
    if range.is_empty() || range.end.0 > comp.duration.0 {
        return Err(SceneError::validation(format!(
            "render range {}..{} must be non-empty and within 0..{}",
            range.start.0, range.end.0, comp.duration.0
        )));
    }

    let workers = if threading.parallel {
        let settings = backend.worker_render_settings().ok_or_else(|| {
            SceneError::render("backend cannot be cloned into parallel workers")
        })?;
        Some((thread_pool(threading.threads)?, settings))
    } else {
        None
    };

    sink.begin(SinkConfig {
        width: comp.canvas.width,
        height: comp.canvas.height,
        fps: comp.fps,
    })?;

    let chunk_len = threading.chunk_size.max(1) as u64;
    let mut stats = RenderStats::default();
    let mut held: Option<(FrameFingerprint, FrameRGBA)> = None;
    let mut next = range.start.0;
    while next < range.end.0 {
        let end = (next + chunk_len).min(range.end.0);
        let chunk = FrameRange::new(FrameIndex(next), FrameIndex(end))?;
        let evals = (chunk.start.0..chunk.end.0)
            .map(|f| Evaluator::eval_frame(comp, FrameIndex(f)))
            .collect::<SceneResult<Vec<_>>>()?;

        let frames = match &workers {
            Some((pool, settings)) => {
                render_parallel(comp, &evals, settings, threading, pool, &mut stats)?
            }
            None => render_sequential(comp, &evals, backend, threading, &mut held, &mut stats)?,
        };
        for (f, frame) in (chunk.start.0..).zip(&frames) {
            sink.push_frame(FrameIndex(f), frame)?;
        }

        tracing::debug!(start = chunk.start.0, end = chunk.end.0, "chunk rendered");
        next = chunk.end.0;
    }

    sink.end()?;
    tracing::info!(
        total = stats.frames_total,
        rendered = stats.frames_rendered,
        elided = stats.frames_elided,
        "render finished"
    );
    Ok(stats)
}

/// Render on the caller's backend. With elision, a frame identical to its predecessor
/// (across chunk boundaries too) reuses the predecessor's pixels.
fn render_sequential(
    comp: &Composition,
    evals: &[EvaluatedFrame],
    backend: &mut dyn RenderBackend,
    threading: &RenderThreading,
    held: &mut Option<(FrameFingerprint, FrameRGBA)>,
    stats: &mut RenderStats,
) -> SceneResult<Vec<FrameRGBA>> {
    let mut out = Vec::with_capacity(evals.len());
    for eval in evals {
        stats.frames_total += 1;
        let print = threading.static_frame_elision.then(|| fingerprint_eval(eval));
        if let (Some(print), Some((prev, pixels))) = (print, held.as_ref())
            && print == *prev
        {
            out.push(pixels.clone());
            stats.frames_elided += 1;
            continue;
        }

        let frame = backend.render_plan(&compile_frame(comp, eval)?)?;
        stats.frames_rendered += 1;
        if let Some(print) = print {
            *held = Some((print, frame.clone()));
        }
        out.push(frame);
    }
    Ok(out)
}

/// For each frame, the index of the frame whose pixels it shows. With elision every
/// frame points at the first frame in the chunk with the same fingerprint.
fn reuse_map(evals: &[EvaluatedFrame], elide: bool) -> Vec<usize> {
    if !elide {
        return (0..evals.len()).collect();
    }
    let mut first = HashMap::<FrameFingerprint, usize>::new();
    evals
        .iter()
        .enumerate()
        .map(|(i, eval)| *first.entry(fingerprint_eval(eval)).or_insert(i))
        .collect()
}

fn render_parallel(
    comp: &Composition,
    evals: &[EvaluatedFrame],
    settings: &RenderSettings,
    threading: &RenderThreading,
    pool: &rayon::ThreadPool,
    stats: &mut RenderStats,
) -> SceneResult<Vec<FrameRGBA>> {
    let sources = reuse_map(evals, threading.static_frame_elision);
    let distinct: Vec<usize> = (0..evals.len()).filter(|&i| sources[i] == i).collect();

    let rendered = pool.install(|| {
        distinct
            .par_iter()
            .map_init(
                || CpuBackend::new(settings.clone()),
                |worker, &i| -> SceneResult<(usize, FrameRGBA)> {
                    let worker = worker
                        .as_mut()
                        .map_err(|e| SceneError::render(format!("worker backend: {e}")))?;
                    Ok((i, worker.render_plan(&compile_frame(comp, &evals[i])?)?))
                },
            )
            .collect::<SceneResult<HashMap<usize, FrameRGBA>>>()
    })?;

    stats.frames_total += evals.len() as u64;
    stats.frames_rendered += distinct.len() as u64;
    stats.frames_elided += (evals.len() - distinct.len()) as u64;

    sources
        .iter()
        .map(|src| {
            rendered
                .get(src)
                .cloned()
                .ok_or_else(|| SceneError::render(format!("frame {src} was not rendered")))
        })
        .collect()
}

fn thread_pool(threads: Option<usize>) -> SceneResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    match threads {
        Some(0) => return Err(SceneError::validation("threads must be >= 1")),
        Some(n) => builder = builder.num_threads(n),
        None => {}
    }
    builder
        .build()
        .map_err(|e| SceneError::render(format!("build render thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
