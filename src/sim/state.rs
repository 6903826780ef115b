use crate::{
    config::preset::{EffectConfig, MIN_POINTS, MotionParams},
    foundation::{
        core::{Point, Viewport},
        error::{CurveError, CurveResult},
    },
    random::source::RandomSource,
    sim::{
        motion::{drift_step, ease_step, retarget},
        point::DriftPoint,
    },
};

/// Active motion mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum Motion {
    /// Points move under their own heading and speed, bouncing off the edges.
    FreeDrift {
        /// Free-drift frames since the last reshuffle.
        frames: u64,
    },
    /// Points ease toward their reshuffle targets.
    Reshuffle,
}

/// What a single [`CurveState::advance`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepEvent {
    /// Free-drift frame; `bounces` points touched an edge.
    Drifted {
        /// Number of points that hit a viewport edge.
        bounces: usize,
    },
    /// A reshuffle was triggered; points got new targets.
    ReshuffleStarted,
    /// Reshuffle frame; `settled` points have reached their targets.
    Eased {
        /// Number of points on their target.
        settled: usize,
    },
    /// Last reshuffle frame; all points arrived and free-drift resumes.
    Settled,
}

/// The point list and its motion mode, owned by the animation loop.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveState {
    points: Vec<DriftPoint>,
    motion: Motion,
    motion_params: MotionParams,
}

/// Even point count in `4..=4 + max_extra_points`.
///
/// `floor(u * max_extra_points) + 4`, bumped by one when odd.
pub fn draw_point_count<R: RandomSource + ?Sized>(max_extra_points: u32, rng: &mut R) -> usize {
    let n = rng.next_floor(f64::from(max_extra_points)) as usize + MIN_POINTS;
    if n % 2 == 1 { n + 1 } else { n }
}

impl CurveState {
    /// Fresh state with a random even number of points inside `viewport`.
    pub fn spawn<R: RandomSource + ?Sized>(
        config: &EffectConfig,
        viewport: Viewport,
        rng: &mut R,
    ) -> Self {
        let count = draw_point_count(config.max_extra_points, rng);
        let points = (0..count)
            .map(|id| DriftPoint::spawn(id, viewport, &config.motion, rng))
            .collect();
        Self::free_drift(points, config.motion)
    }

    /// State over explicit points, starting in free-drift.
    ///
    /// The curve pairs points up, so the count must be even and at least two.
    pub fn from_points(
        points: Vec<DriftPoint>,
        motion_params: MotionParams,
    ) -> CurveResult<Self> {
        if points.len() < 2 || !points.len().is_multiple_of(2) {
            return Err(CurveError::validation(format!(
                "curve needs an even number of points (>= 2), got {}",
                points.len()
            )));
        }
        Ok(Self::free_drift(points, motion_params))
    }

    fn free_drift(points: Vec<DriftPoint>, motion_params: MotionParams) -> Self {
        Self {
            points,
            motion: Motion::FreeDrift { frames: 0 },
            motion_params,
        }
    }

    /// Points in curve order.
    pub fn points(&self) -> &[DriftPoint] {
        &self.points
    }

    /// Current positions in curve order.
    pub fn positions(&self) -> Vec<Point> {
        self.points.iter().map(DriftPoint::pos).collect()
    }

    /// Active motion mode.
    pub fn motion(&self) -> Motion {
        self.motion
    }

    /// Whether a reshuffle is in progress.
    pub fn is_reshuffling(&self) -> bool {
        matches!(self.motion, Motion::Reshuffle)
    }

    /// Point `i` together with its circular predecessor and pre-predecessor.
    pub fn neighbours(&self, i: usize) -> (&DriftPoint, &DriftPoint, &DriftPoint) {
        let n = self.points.len();
        let prev = (i + n - 1) % n;
        let prev2 = (i + n - 2) % n;
        (&self.points[prev2], &self.points[prev], &self.points[i])
    }

    /// Advance the simulation by one frame.
    ///
    /// Free-drift frames draw one roll from `rng`; reshuffle frames draw nothing.
    pub fn advance<R: RandomSource + ?Sized>(&mut self, viewport: Viewport, rng: &mut R) -> StepEvent {
        let params = self.motion_params;
        match self.motion {
            Motion::Reshuffle => {
                let settled = self
                    .points
                    .iter_mut()
                    .map(|p| ease_step(p, &params))
                    .filter(|done| *done)
                    .count();
                if settled == self.points.len() {
                    self.motion = Motion::FreeDrift { frames: 0 };
                    tracing::debug!("reshuffle settled, resuming free drift");
                    StepEvent::Settled
                } else {
                    StepEvent::Eased { settled }
                }
            }
            Motion::FreeDrift { frames } => {
                let roll = rng.next_floor(f64::from(params.reshuffle_odds));
                if roll == 1.0 && frames > params.reshuffle_after_frames {
                    self.reshuffle(viewport, rng);
                    StepEvent::ReshuffleStarted
                } else {
                    let bounces = self
                        .points
                        .iter_mut()
                        .map(|p| drift_step(p, viewport, &params))
                        .filter(|b| b.any())
                        .count();
                    self.motion = Motion::FreeDrift { frames: frames + 1 };
                    StepEvent::Drifted { bounces }
                }
            }
        }
    }

    /// Give every point a new target, heading and speed, and enter reshuffle mode.
    pub fn reshuffle<R: RandomSource + ?Sized>(&mut self, viewport: Viewport, rng: &mut R) {
        for p in &mut self.points {
            retarget(p, viewport, &self.motion_params, rng);
        }
        self.motion = Motion::Reshuffle;
        tracing::debug!(points = self.points.len(), "reshuffle started");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/state.rs"]
mod tests;
