//! Per-frame position traces.
//!
//! A trace lists, for every frame, the positions that frame draws. Traces serialize to JSON so
//! a run can be recorded once and compared against later as a golden file.

use std::path::Path;

use anyhow::Context as _;

use crate::{
    config::preset::{DeviceClass, EffectConfig},
    foundation::{
        core::{FrameIndex, Viewport},
        error::{CurveError, CurveResult},
    },
    random::source::RandomSource,
    render::surface::NullSurface,
    runtime::{animation::CurveAnimation, host::StaticHost, scheduler::ManualScheduler},
    sim::state::{CurveState, Motion},
};

/// One point as drawn in a frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TracePoint {
    /// Point id.
    pub id: usize,
    /// Drawn x.
    pub x: f64,
    /// Drawn y.
    pub y: f64,
}

/// Positions drawn in one frame and the mode the frame was in.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TraceFrame {
    /// Frame index, starting at 0 for the first drawn frame.
    pub frame: FrameIndex,
    /// Motion mode while the frame was drawn.
    pub motion: Motion,
    /// Points in curve order.
    pub points: Vec<TracePoint>,
}

impl TraceFrame {
    fn capture(frame: FrameIndex, state: &CurveState) -> Self {
        Self {
            frame,
            motion: state.motion(),
            points: state
                .points()
                .iter()
                .map(|p| TracePoint {
                    id: p.id,
                    x: p.x,
                    y: p.y,
                })
                .collect(),
        }
    }
}

/// A recorded run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Trace {
    /// Device class of the config used.
    pub device: DeviceClass,
    /// Viewport the run used.
    pub viewport: Viewport,
    /// Frames in order.
    pub frames: Vec<TraceFrame>,
}

impl Trace {
    /// Load a trace from a JSON file.
    pub fn from_json_path(path: &Path) -> CurveResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read trace '{}'", path.display()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Pretty JSON encoding.
    pub fn to_json_pretty(&self) -> CurveResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Largest per-coordinate difference to `other`.
    ///
    /// Errors when the traces differ in frame count, point count, ids or motion modes.
    pub fn max_deviation(&self, other: &Trace) -> CurveResult<f64> {
        if self.frames.len() != other.frames.len() {
            return Err(CurveError::validation(format!(
                "trace length differs: {} vs {}",
                self.frames.len(),
                other.frames.len()
            )));
        }
        let mut worst = 0.0f64;
        for (a, b) in self.frames.iter().zip(&other.frames) {
            if a.motion != b.motion {
                return Err(CurveError::validation(format!(
                    "frame {}: motion {:?} vs {:?}",
                    a.frame.0, a.motion, b.motion
                )));
            }
            if a.points.len() != b.points.len() {
                return Err(CurveError::validation(format!(
                    "frame {}: point count differs",
                    a.frame.0
                )));
            }
            for (pa, pb) in a.points.iter().zip(&b.points) {
                if pa.id != pb.id {
                    return Err(CurveError::validation(format!(
                        "frame {}: point id {} vs {}",
                        a.frame.0, pa.id, pb.id
                    )));
                }
                worst = worst.max((pa.x - pb.x).abs()).max((pa.y - pb.y).abs());
            }
        }
        Ok(worst)
    }
}

/// Mount the effect, run `frames` frames and record what each one draws.
pub fn record_trace<R: RandomSource>(
    config: &EffectConfig,
    viewport: Viewport,
    rng: R,
    frames: u64,
) -> CurveResult<Trace> {
    let mut anim = CurveAnimation::mount(config.clone(), viewport, rng, ManualScheduler::new())?;
    let mut host = StaticHost::new(viewport, NullSurface);
    let mut out = Vec::with_capacity(frames as usize);

    for idx in 0..frames {
        let Some(handle) = anim.scheduler_mut().next_due() else {
            break;
        };
        out.push(TraceFrame::capture(FrameIndex(idx), anim.state()));
        anim.tick(handle, &mut host);
    }
    anim.unmount();

    Ok(Trace {
        device: config.device,
        viewport,
        frames: out,
    })
}

#[cfg(test)]
#[path = "../tests/unit/trace.rs"]
mod tests;
