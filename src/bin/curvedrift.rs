use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use curvedrift::{
    DeviceClass, EffectConfig, FfmpegSink, FfmpegSinkOpts, Fps, FrameIndex, HeadlessOpts,
    LabelFont, PngSequenceSink, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "curvedrift", version, about = "Render the drifting-curve effect headlessly")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a numbered PNG sequence.
    Frames(FramesArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Dump the per-frame point positions as JSON.
    Trace(TraceArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Use the mobile preset instead of desktop.
    #[arg(long, default_value_t = false)]
    mobile: bool,

    /// Effect config JSON; overrides the preset.
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed; a fresh thread RNG is used when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// TTF/OTF font for coordinate labels; labels are omitted without one.
    #[arg(long)]
    label_font: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Number of frames.
    #[arg(long)]
    count: u64,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Number of frames.
    #[arg(long)]
    count: u64,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Fail instead of replacing an existing output file.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,
}

#[derive(Args, Debug)]
struct TraceArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Number of frames.
    #[arg(long)]
    count: u64,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

impl CommonArgs {
    fn config(&self) -> anyhow::Result<EffectConfig> {
        let cfg = match &self.config {
            Some(path) => EffectConfig::from_json_path(path)?,
            None => EffectConfig::for_device(DeviceClass::from_is_mobile(self.mobile)),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(f64::from(self.width), f64::from(self.height))
    }

    fn headless(&self, frames: u64) -> anyhow::Result<HeadlessOpts> {
        let mut opts = HeadlessOpts::new(self.viewport(), frames);
        if let Some(path) = &self.label_font {
            opts.label_font = Some(LabelFont::from_path(path)?);
        }
        Ok(opts)
    }

    /// Run `f` with a seeded RNG when a seed was given, a thread RNG otherwise.
    fn with_rng<T>(
        &self,
        f: impl FnOnce(&mut dyn curvedrift::RandomSource) -> anyhow::Result<T>,
    ) -> anyhow::Result<T> {
        match self.seed {
            Some(seed) => f(&mut curvedrift::seeded(seed)),
            None => f(&mut rand::rng()),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Render(args) => cmd_render(args),
        Command::Trace(args) => cmd_trace(args),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = args.common.config()?;
    let opts = args.common.headless(1)?;
    let frame = args.common.with_rng(|rng| {
        Ok(curvedrift::render_frame_at(
            &cfg,
            &opts,
            rng,
            FrameIndex(args.frame),
        )?)
    })?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    curvedrift::write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let cfg = args.common.config()?;
    let opts = args.common.headless(args.count)?;
    let mut sink = PngSequenceSink::new(&args.out_dir);
    let stats = args
        .common
        .with_rng(|rng| Ok(curvedrift::render_to_sink(&cfg, &opts, rng, &mut sink)?))?;

    eprintln!(
        "wrote {} frames to {}",
        stats.frames_drawn,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = args.common.config()?;
    let mut opts = args.common.headless(args.count)?;
    opts.fps = Fps::new(args.fps, 1)?;

    let mut sink = FfmpegSink::new(FfmpegSinkOpts {
        overwrite: !args.no_overwrite,
        ..FfmpegSinkOpts::new(&args.out)
    });
    let stats = args
        .common
        .with_rng(|rng| Ok(curvedrift::render_to_sink(&cfg, &opts, rng, &mut sink)?))?;

    eprintln!(
        "wrote {} ({} frames, {} reshuffles)",
        args.out.display(),
        stats.frames_drawn,
        stats.reshuffles
    );
    Ok(())
}

fn cmd_trace(args: TraceArgs) -> anyhow::Result<()> {
    let cfg = args.common.config()?;
    let viewport = args.common.viewport();
    let trace = args
        .common
        .with_rng(|rng| Ok(curvedrift::record_trace(&cfg, viewport, rng, args.count)?))?;
    let json = trace.to_json_pretty()?;

    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, json)
                .with_context(|| format!("write trace '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
