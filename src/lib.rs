//! curvedrift is a generative drifting-curve animation.
//!
//! An even number of control points drift across a viewport, bouncing off its edges, and a
//! smoothed closed curve is drawn through them every frame. Every so often all points pick new
//! random targets and ease toward them before drifting again.
//!
//! - Resolve an [`EffectConfig`] for a [`DeviceClass`] (or load one from JSON)
//! - Mount a [`CurveAnimation`] with a [`RandomSource`] and a [`FrameScheduler`]
//! - Deliver frame callbacks through [`CurveAnimation::tick`] with a [`FrameHost`]
//! - Or render headlessly into a [`FrameSink`] with [`render_to_sink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod encode;
mod foundation;
mod pipeline;
mod random;
mod render;
mod runtime;
mod sim;
mod trace;

pub use crate::foundation::core::{
    CanvasSize, Fps, FrameIndex, Point, Rect, Rgba8, Vec2, Viewport,
};
pub use crate::foundation::error::{CurveError, CurveResult};
pub use crate::foundation::math::wrap_degrees;

pub use crate::config::preset::{
    DeviceClass, EffectConfig, MAX_EXTRA_POINTS, MIN_POINTS, MotionParams, Palette,
    StrokeWidths,
};
pub use crate::random::source::{RandomSource, SequenceRandom, seeded};

pub use crate::sim::motion::{
    Bounce, damp_speed_y, drift_step, ease_step, reflect_off_x_bound, reflect_off_y_bound,
    retarget,
};
pub use crate::sim::point::DriftPoint;
pub use crate::sim::state::{CurveState, Motion, StepEvent, draw_point_count};

pub use crate::render::cpu::CpuSurface;
pub use crate::render::curve::{coordinate_label, draw_curve_frame, smoothed_segment};
pub use crate::render::frame::FrameRGBA;
pub use crate::render::surface::{
    DrawCmd, LineCap, NullSurface, RecordingSurface, StrokeStyle, Surface,
};
pub use crate::render::text::LabelFont;

pub use crate::runtime::animation::{CurveAnimation, FrameOutcome};
pub use crate::runtime::host::{FrameHost, StaticHost};
pub use crate::runtime::scheduler::{FrameHandle, FrameScheduler, ManualScheduler};

pub use crate::trace::{Trace, TraceFrame, TracePoint, record_trace};

pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::png::{PngSequenceSink, write_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};

pub use crate::pipeline::{HeadlessOpts, RenderStats, render_frame_at, render_to_sink};
