use crate::{
    config::preset::MotionParams,
    foundation::core::{Point, Viewport},
    random::source::RandomSource,
};

/// One control point of the curve.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DriftPoint {
    /// Ordinal index, stable for the point's lifetime.
    pub id: usize,
    /// Current x in viewport pixels.
    pub x: f64,
    /// Current y in viewport pixels.
    pub y: f64,
    /// Reshuffle target x; unused while drifting.
    pub new_x: f64,
    /// Reshuffle target y; unused while drifting.
    pub new_y: f64,
    /// Heading in degrees.
    pub angle: f64,
    /// Horizontal drift speed.
    pub speed_x: f64,
    /// Vertical drift speed, damped every free-drift frame.
    pub speed_y: f64,
}

impl DriftPoint {
    /// Random point inside `viewport`, heading and speed drawn from `rng`.
    ///
    /// Draw order: x, y, angle, speed roll, speed magnitude.
    pub fn spawn<R: RandomSource + ?Sized>(
        id: usize,
        viewport: Viewport,
        motion: &MotionParams,
        rng: &mut R,
    ) -> Self {
        let x = rng.next_floor(viewport.width);
        let y = rng.next_floor(viewport.height);
        let angle = rng.next_angle_deg();
        let speed = rng.next_drift_speed(motion);
        Self {
            id,
            x,
            y,
            new_x: 0.0,
            new_y: 0.0,
            angle,
            speed_x: speed,
            speed_y: speed,
        }
    }

    /// Current position.
    pub fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Reshuffle target.
    pub fn target(&self) -> Point {
        Point::new(self.new_x, self.new_y)
    }

    /// Per-axis distance to the reshuffle target.
    pub fn remaining(&self) -> (f64, f64) {
        ((self.new_x - self.x).abs(), (self.new_y - self.y).abs())
    }
}
