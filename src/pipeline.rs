//! Headless driver: runs the animation against a CPU surface and hands frames to a sink.

use crate::{
    config::preset::EffectConfig,
    encode::sink::{FrameSink, SinkConfig},
    foundation::{
        core::{Fps, FrameIndex, Viewport},
        error::{CurveError, CurveResult},
    },
    random::source::RandomSource,
    render::{cpu::CpuSurface, frame::FrameRGBA, surface::NullSurface, text::LabelFont},
    runtime::{
        animation::{CurveAnimation, FrameOutcome},
        host::{FrameHost, StaticHost},
        scheduler::ManualScheduler,
    },
    sim::state::StepEvent,
};

/// Options for a headless run.
#[derive(Clone, Debug)]
pub struct HeadlessOpts {
    /// Viewport the points live in; the surface is this size rounded up.
    pub viewport: Viewport,
    /// Number of frames to render.
    pub frames: u64,
    /// Frame rate reported to the sink.
    pub fps: Fps,
    /// Font for coordinate labels; labels are skipped without one.
    pub label_font: Option<LabelFont>,
}

impl HeadlessOpts {
    /// `frames` frames at 60 fps without labels.
    pub fn new(viewport: Viewport, frames: u64) -> Self {
        Self {
            viewport,
            frames,
            fps: Fps { num: 60, den: 1 },
            label_font: None,
        }
    }
}

/// Counters collected over a headless run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames drawn and pushed to the sink.
    pub frames_drawn: u64,
    /// Reshuffles started.
    pub reshuffles: u64,
    /// Point-edge contacts during free-drift.
    pub bounces: u64,
}

impl RenderStats {
    fn record(&mut self, event: StepEvent) {
        self.frames_drawn += 1;
        match event {
            StepEvent::Drifted { bounces } => self.bounces += bounces as u64,
            StepEvent::ReshuffleStarted => self.reshuffles += 1,
            StepEvent::Eased { .. } | StepEvent::Settled => {}
        }
    }
}

fn surface_for(opts: &HeadlessOpts) -> CurveResult<CpuSurface> {
    opts.viewport.validate()?;
    let width = opts.viewport.width.ceil() as u32;
    let height = opts.viewport.height.ceil() as u32;
    let surface = CpuSurface::new(width, height)?;
    match &opts.label_font {
        Some(font) => surface.with_label_font(font),
        None => Ok(surface),
    }
}

/// Deliver the next due frame to `anim`; anything but a drawn frame is an error.
fn tick_next<R: RandomSource>(
    anim: &mut CurveAnimation<R, ManualScheduler>,
    host: &mut dyn FrameHost,
    idx: u64,
) -> CurveResult<StepEvent> {
    let handle = anim
        .scheduler_mut()
        .next_due()
        .ok_or_else(|| CurveError::render("animation stopped requesting frames"))?;
    match anim.tick(handle, host) {
        FrameOutcome::Drawn(event) => Ok(event),
        other => Err(CurveError::render(format!(
            "frame {idx} was not drawn: {other:?}"
        ))),
    }
}

/// Draw `opts.frames` frames and push each one to `sink`.
#[tracing::instrument(skip(config, opts, rng, sink), fields(frames = opts.frames))]
pub fn render_to_sink<R: RandomSource>(
    config: &EffectConfig,
    opts: &HeadlessOpts,
    rng: R,
    sink: &mut dyn FrameSink,
) -> CurveResult<RenderStats> {
    let surface = surface_for(opts)?;
    let (width, height) = (surface.width(), surface.height());
    let mut anim =
        CurveAnimation::mount(config.clone(), opts.viewport, rng, ManualScheduler::new())?;
    let mut host = StaticHost::new(opts.viewport, surface);

    sink.begin(SinkConfig {
        width,
        height,
        fps: opts.fps,
    })?;

    let mut stats = RenderStats::default();
    for idx in 0..opts.frames {
        stats.record(tick_next(&mut anim, &mut host, idx)?);
        let frame = host
            .surface
            .as_mut()
            .ok_or_else(|| CurveError::render("surface detached"))?
            .readback();
        sink.push_frame(FrameIndex(idx), &frame)?;
    }
    sink.end()?;
    anim.unmount();

    tracing::info!(
        frames = stats.frames_drawn,
        reshuffles = stats.reshuffles,
        bounces = stats.bounces,
        width,
        height,
        "headless render finished"
    );
    Ok(stats)
}

/// Render only frame `frame`, stepping the simulation through the earlier frames undrawn.
pub fn render_frame_at<R: RandomSource>(
    config: &EffectConfig,
    opts: &HeadlessOpts,
    rng: R,
    frame: FrameIndex,
) -> CurveResult<FrameRGBA> {
    let surface = surface_for(opts)?;
    let mut anim =
        CurveAnimation::mount(config.clone(), opts.viewport, rng, ManualScheduler::new())?;

    let mut skip_host = StaticHost::new(opts.viewport, NullSurface);
    for idx in 0..frame.0 {
        tick_next(&mut anim, &mut skip_host, idx)?;
    }

    let mut host = StaticHost::new(opts.viewport, surface);
    tick_next(&mut anim, &mut host, frame.0)?;
    anim.unmount();

    let surface = host
        .surface
        .as_mut()
        .ok_or_else(|| CurveError::render("surface detached"))?;
    Ok(surface.readback())
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
