//! Per-point kinematics for the two motion modes.
//!
//! Angles are in degrees, screen coordinates (y grows downward), so a heading in (0°, 180°)
//! moves the point down the screen.

use crate::{
    config::preset::MotionParams,
    foundation::{core::Viewport, math::wrap_degrees},
    random::source::RandomSource,
    sim::point::DriftPoint,
};

/// Which viewport edges a drift step ran into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bounce {
    /// Left or right edge.
    pub x: bool,
    /// Top or bottom edge.
    pub y: bool,
}

impl Bounce {
    /// Whether any edge was hit.
    pub fn any(self) -> bool {
        self.x || self.y
    }
}

/// Heading after hitting the left or right edge: `(180 - a) mod 360`.
pub fn reflect_off_x_bound(angle: f64) -> f64 {
    wrap_degrees(180.0 - angle)
}

/// Heading after hitting the top or bottom edge: `(360 - a) mod 360`.
pub fn reflect_off_y_bound(angle: f64) -> f64 {
    wrap_degrees(360.0 - angle)
}

/// Vertical speed after one free-drift frame at heading `angle`.
///
/// Speeds up while heading down, slows while heading up, then floors at `min_speed_y`.
pub fn damp_speed_y(speed_y: f64, angle: f64, motion: &MotionParams) -> f64 {
    let factor = if angle > 10.0 && angle < 170.0 {
        motion.speed_y_gain
    } else if angle > 190.0 && angle < 350.0 {
        motion.speed_y_decay
    } else {
        1.0
    };
    (speed_y * factor).max(motion.min_speed_y)
}

/// Advance one point by one free-drift frame.
pub fn drift_step(p: &mut DriftPoint, viewport: Viewport, motion: &MotionParams) -> Bounce {
    let rad = p.angle.to_radians();
    let x = p.x + rad.cos() * p.speed_x;
    let y = p.y + rad.sin() * p.speed_y;

    let mut bounce = Bounce::default();
    let mut angle = p.angle;
    if x <= 0.0 || x >= viewport.width {
        angle = reflect_off_x_bound(p.angle);
        bounce.x = true;
    }
    // A corner hit takes the top/bottom reflection of the incoming heading.
    if y <= 0.0 || y >= viewport.height {
        angle = reflect_off_y_bound(p.angle);
        bounce.y = true;
    }

    // The viewport may have shrunk since the last frame.
    p.x = x.clamp(0.0, viewport.width.max(0.0));
    p.y = y.clamp(0.0, viewport.height.max(0.0));
    p.angle = angle;
    p.speed_y = damp_speed_y(p.speed_y, angle, motion);
    bounce
}

/// Pick a fresh target, heading and speed for a reshuffle.
///
/// Draw order: target x, target y, angle, speed roll, speed magnitude.
pub fn retarget<R: RandomSource + ?Sized>(
    p: &mut DriftPoint,
    viewport: Viewport,
    motion: &MotionParams,
    rng: &mut R,
) {
    p.new_x = rng.next_floor(viewport.width);
    p.new_y = rng.next_floor(viewport.height);
    p.angle = rng.next_angle_deg();
    let speed = rng.next_drift_speed(motion);
    p.speed_x = speed;
    p.speed_y = speed;
}

/// Move a point `1 / ease_divisor` of the way to its target.
///
/// Returns `true` once the point is within `settle_epsilon_px` on both axes; it is then
/// snapped exactly onto the target.
pub fn ease_step(p: &mut DriftPoint, motion: &MotionParams) -> bool {
    p.x += (p.new_x - p.x) / motion.ease_divisor;
    p.y += (p.new_y - p.y) / motion.ease_divisor;

    let (dx, dy) = p.remaining();
    if dx < motion.settle_epsilon_px && dy < motion.settle_epsilon_px {
        p.x = p.new_x;
        p.y = p.new_y;
        true
    } else {
        false
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/motion.rs"]
mod tests;
