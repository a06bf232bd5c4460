use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dimscene", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in scenes.
    List,
    /// Print a scene's timeline.
    Plan(PlanArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a whole scene to MP4 (requires `ffmpeg` on PATH) or a PNG sequence.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct PlanArgs {
    /// Scene name (see `list`).
    scene: String,

    /// Print the timeline as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct RasterArgs {
    /// JSON render config; command line flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Resolution and frame rate preset.
    #[arg(short, long, value_enum)]
    quality: Option<QualityChoice>,

    /// Font file used for text.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Print the resolved text font (family + SHA-256 of the font bytes).
    #[arg(long)]
    dump_fonts: bool,
}

#[derive(Args, Debug)]
struct FrameArgs {
    /// Scene name (see `list`).
    scene: String,

    /// Frame index (0-based).
    #[arg(long, conflicts_with = "time", required_unless_present = "time")]
    frame: Option<u64>,

    /// Timeline time in seconds.
    #[arg(long)]
    time: Option<f64>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    raster: RasterArgs,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Scene name (see `list`).
    scene: String,

    /// Output path: an MP4 file, or a directory for `--format png`.
    /// Defaults to `<media_dir>/videos/<scene>/<height>p<fps>/<scene>.mp4`.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Mp4)]
    format: OutputFormat,

    #[command(flatten)]
    raster: RasterArgs,

    /// Render chunks in parallel.
    #[arg(long)]
    parallel: bool,

    /// Worker threads; more than one renders in parallel.
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per chunk.
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Reuse identical frames instead of re-rendering them.
    #[arg(long)]
    static_frame_elision: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum QualityChoice {
    Low,
    Medium,
    High,
    Production,
    #[value(name = "fourk", alias = "4k")]
    FourK,
}

impl From<QualityChoice> for dimscene::Quality {
    fn from(q: QualityChoice) -> Self {
        match q {
            QualityChoice::Low => Self::Low,
            QualityChoice::Medium => Self::Medium,
            QualityChoice::High => Self::High,
            QualityChoice::Production => Self::Production,
            QualityChoice::FourK => Self::FourK,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Mp4,
    Png,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::List => cmd_list(),
        Command::Plan(args) => cmd_plan(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_list() -> anyhow::Result<()> {
    for (name, _) in dimscene::scenes::SCENES {
        println!("{name}");
    }
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let factory = dimscene::scenes::scene_by_name(&args.scene)?;
    let timeline = factory(dimscene::SceneFrame::default())?;

    if args.json {
        let json = serde_json::to_string_pretty(&timeline).context("serialize timeline")?;
        println!("{json}");
        return Ok(());
    }

    println!("{} ({:.2}s)", timeline.name, timeline.duration_secs);
    for event in &timeline.events {
        let (label, detail) = match event {
            dimscene::TimelineEvent::Play(play) => {
                let names: Vec<String> = play
                    .animations
                    .iter()
                    .map(|a| {
                        let target = timeline
                            .mobject(a.target)
                            .map_or("?", |m| m.name.as_str());
                        format!("{}({target})", kind_label(a.kind))
                    })
                    .collect();
                ("play", format!("  {}", names.join(", ")))
            }
            dimscene::TimelineEvent::Wait(_) => ("wait", String::new()),
        };
        println!(
            "  {:>6.2}s  {label}  {:>5.2}s{detail}",
            event.start_secs(),
            event.duration_secs()
        );
    }
    Ok(())
}

fn kind_label(kind: dimscene::AnimationKind) -> &'static str {
    match kind {
        dimscene::AnimationKind::Create => "Create",
        dimscene::AnimationKind::Write => "Write",
        dimscene::AnimationKind::ToEdge { .. } => "ToEdge",
    }
}

fn load_config(raster: &RasterArgs) -> anyhow::Result<dimscene::RenderConfig> {
    let mut cfg = match &raster.config {
        Some(path) => dimscene::RenderConfig::from_path(path)?,
        None => dimscene::RenderConfig::default(),
    };
    cfg.apply_env()?;
    if let Some(q) = raster.quality {
        cfg.quality = q.into();
        cfg.width = None;
        cfg.height = None;
        cfg.fps = None;
    }
    if let Some(font) = &raster.font {
        cfg.font.path = Some(font.clone());
    }
    Ok(cfg)
}

fn prepare(
    scene: &str,
    raster: &RasterArgs,
    cfg: &dimscene::RenderConfig,
) -> anyhow::Result<(dimscene::Composition, dimscene::RenderSettings)> {
    let factory = dimscene::scenes::scene_by_name(scene)?;
    let comp = cfg.compose(factory)?;
    let settings = cfg.render_settings()?;
    if raster.dump_fonts
        && let Some(font) = &settings.font
    {
        dump_font_diagnostics(font);
    }
    Ok((comp, settings))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.raster)?;
    cfg.validate()?;
    let (comp, settings) = prepare(&args.scene, &args.raster, &cfg)?;

    let frame = match (args.frame, args.time) {
        (Some(f), _) => dimscene::FrameIndex(f),
        (None, Some(t)) => comp.frame_at(t),
        (None, None) => anyhow::bail!("either --frame or --time is required"),
    };

    let mut backend = dimscene::CpuBackend::new(settings)?;
    let rendered = dimscene::render_frame(&comp, frame, &mut backend)?;

    dimscene::write_frame_png(&args.out, &rendered, cfg.background_rgba())?;

    eprintln!("wrote {} (frame {})", args.out.display(), frame.0);
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.raster)?;
    if let Some(n) = args.threads {
        cfg.set_threads(n);
    }
    if args.parallel {
        cfg.threading.parallel = true;
    }
    if let Some(n) = args.chunk_size {
        cfg.threading.chunk_size = n;
    }
    if args.static_frame_elision {
        cfg.threading.static_frame_elision = true;
    }
    cfg.validate()?;

    let (comp, settings) = prepare(&args.scene, &args.raster, &cfg)?;
    let bg = cfg.background_rgba();
    let mut backend = dimscene::CpuBackend::new(settings)?;

    let out = match args.out {
        Some(out) => out,
        None => match args.format {
            OutputFormat::Mp4 => cfg.default_output(comp.name())?,
            OutputFormat::Png => cfg.default_frames_dir(comp.name())?,
        },
    };

    let mut sink: Box<dyn dimscene::FrameSink> = match args.format {
        OutputFormat::Mp4 => {
            let mut opts = dimscene::FfmpegSinkOpts::new(&out);
            opts.bg_rgba = bg;
            Box::new(dimscene::FfmpegSink::new(opts))
        }
        OutputFormat::Png => Box::new(dimscene::PngSequenceSink::new(&out, comp.name(), bg)),
    };

    let stats = dimscene::render_range(
        &comp,
        comp.full_range(),
        &mut backend,
        sink.as_mut(),
        &cfg.threading,
    )?;

    eprintln!(
        "wrote {} ({} frames, {} rendered, {} elided)",
        out.display(),
        stats.frames_total,
        stats.frames_rendered,
        stats.frames_elided
    );
    Ok(())
}

fn dump_font_diagnostics(font: &dimscene::PreparedFont) {
    eprintln!("text font diagnostics:");
    match &font.source {
        dimscene::FontSource::File(path) => eprintln!("  source:  {}", path.display()),
        dimscene::FontSource::System => eprintln!("  source:  system"),
    }
    eprintln!("  family:  {}", font.family);
    eprintln!("  index:   {}", font.index);
    eprintln!("  sha256:  {}", font.sha256_hex());
}
