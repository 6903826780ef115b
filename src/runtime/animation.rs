use crate::{
    config::preset::EffectConfig,
    foundation::{core::Viewport, error::CurveResult},
    random::source::RandomSource,
    render::curve::draw_curve_frame,
    runtime::{
        host::FrameHost,
        scheduler::{FrameHandle, FrameScheduler},
    },
    sim::state::{CurveState, StepEvent},
};

/// Result of delivering a frame callback to the animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame was drawn and the simulation advanced.
    Drawn(StepEvent),
    /// No surface this frame; nothing drawn or advanced, next frame still requested.
    SkippedNoSurface,
    /// The handle was stale or cancelled; nothing happened.
    Ignored,
}

/// The mounted effect: point state, randomness and the frame request it is waiting on.
///
/// Every tick draws the current state, advances it by one frame, and requests the next frame
/// from the scheduler. Unmounting (or dropping) cancels the pending request.
pub struct CurveAnimation<R: RandomSource, S: FrameScheduler> {
    config: EffectConfig,
    state: CurveState,
    rng: R,
    scheduler: S,
    pending: Option<FrameHandle>,
    frames_drawn: u64,
}

impl<R: RandomSource, S: FrameScheduler> CurveAnimation<R, S> {
    /// Create the point list inside `viewport` and request the first frame.
    pub fn mount(
        config: EffectConfig,
        viewport: Viewport,
        mut rng: R,
        mut scheduler: S,
    ) -> CurveResult<Self> {
        config.validate()?;
        viewport.validate()?;
        let state = CurveState::spawn(&config, viewport, &mut rng);
        let pending = Some(scheduler.request_frame());
        tracing::debug!(
            points = state.points().len(),
            device = ?config.device,
            "curve animation mounted"
        );
        Ok(Self {
            config,
            state,
            rng,
            scheduler,
            pending,
            frames_drawn: 0,
        })
    }

    /// Deliver a frame callback.
    pub fn tick(&mut self, handle: FrameHandle, host: &mut dyn FrameHost) -> FrameOutcome {
        if self.pending != Some(handle) {
            return FrameOutcome::Ignored;
        }
        self.pending = None;

        let viewport = host.viewport();
        let outcome = match host.surface() {
            Some(surface) => {
                draw_curve_frame(&self.state, &self.config, surface);
                let event = self.state.advance(viewport, &mut self.rng);
                self.frames_drawn += 1;
                FrameOutcome::Drawn(event)
            }
            None => FrameOutcome::SkippedNoSurface,
        };

        self.pending = Some(self.scheduler.request_frame());
        outcome
    }

    /// Cancel the pending frame; later ticks are ignored.
    ///
    /// Returns `false` if the animation was already unmounted.
    pub fn unmount(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                self.scheduler.cancel_frame(handle);
                tracing::debug!(frames = self.frames_drawn, "curve animation unmounted");
                true
            }
            None => false,
        }
    }

    /// Whether a frame is still pending.
    pub fn is_mounted(&self) -> bool {
        self.pending.is_some()
    }

    /// Frame request the animation is waiting on.
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Simulation state.
    pub fn state(&self) -> &CurveState {
        &self.state
    }

    /// Resolved configuration.
    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    /// Frames drawn so far.
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Scheduler in use.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the scheduler, e.g. to pull the next due handle.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

impl<R: RandomSource, S: FrameScheduler> Drop for CurveAnimation<R, S> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/animation.rs"]
mod tests;
