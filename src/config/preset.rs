use std::{fs::File, io::BufReader, ops::RangeInclusive, path::Path};

use anyhow::Context as _;

use crate::foundation::{
    core::{CanvasSize, Rgba8},
    error::{CurveError, CurveResult},
};

/// Smallest number of control points on the curve.
pub const MIN_POINTS: usize = 4;

/// Largest accepted [`EffectConfig::max_extra_points`].
pub const MAX_EXTRA_POINTS: u32 = 1024;

/// Device class signal supplied by the host, read once at start-up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    /// Large viewport.
    #[default]
    Desktop,
    /// Constrained/mobile device.
    Mobile,
}

impl DeviceClass {
    /// Map the host's "is mobile" boolean to a device class.
    pub fn from_is_mobile(is_mobile: bool) -> Self {
        if is_mobile { Self::Mobile } else { Self::Desktop }
    }
}

/// Line widths used by the rendering contract.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokeWidths {
    /// Outline circle around each point.
    pub ring: f64,
    /// Straight guide line between neighbours.
    pub guide: f64,
    /// Smoothed curve.
    pub curve: f64,
}

/// Colors used by the rendering contract.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Palette {
    /// Solid curve color.
    pub primary: Rgba8,
    /// Translucent color for markers, labels and guide lines.
    pub secondary: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Rgba8::rgb(68, 68, 68),
            secondary: Rgba8::rgba(68, 68, 68, 0.4),
        }
    }
}

/// Tunables of the two-mode motion model.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MotionParams {
    /// Free-drift frames that must elapse before a reshuffle can trigger.
    pub reshuffle_after_frames: u64,
    /// A reshuffle triggers when `floor(roll * reshuffle_odds) == 1`.
    pub reshuffle_odds: u32,
    /// Each reshuffle frame closes `1 / ease_divisor` of the remaining distance.
    pub ease_divisor: f64,
    /// Distance (per axis) under which a point snaps onto its target.
    pub settle_epsilon_px: f64,
    /// Floor for the vertical drift speed.
    pub min_speed_y: f64,
    /// `speed_y` multiplier while heading down (10°, 170°).
    pub speed_y_gain: f64,
    /// `speed_y` multiplier while heading up (190°, 350°).
    pub speed_y_decay: f64,
    /// Probability of drawing from the fast speed band.
    pub fast_speed_probability: f64,
    /// Upper bound of the slow speed band.
    pub slow_speed_max: f64,
    /// Upper bound of the fast speed band.
    pub fast_speed_max: f64,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            reshuffle_after_frames: 180,
            reshuffle_odds: 1000,
            ease_divisor: 5.0,
            settle_epsilon_px: 1.0,
            min_speed_y: 0.3,
            speed_y_gain: 1.01,
            speed_y_decay: 0.99,
            fast_speed_probability: 0.1,
            slow_speed_max: 2.0,
            fast_speed_max: 10.0,
        }
    }
}

impl MotionParams {
    /// Reject parameters that would break convergence or produce non-finite motion.
    pub fn validate(&self) -> CurveResult<()> {
        let floats = [
            ("ease_divisor", self.ease_divisor),
            ("settle_epsilon_px", self.settle_epsilon_px),
            ("min_speed_y", self.min_speed_y),
            ("speed_y_gain", self.speed_y_gain),
            ("speed_y_decay", self.speed_y_decay),
            ("fast_speed_probability", self.fast_speed_probability),
            ("slow_speed_max", self.slow_speed_max),
            ("fast_speed_max", self.fast_speed_max),
        ];
        for (name, v) in floats {
            if !v.is_finite() {
                return Err(CurveError::validation(format!("motion.{name} must be finite")));
            }
        }
        if self.ease_divisor <= 1.0 {
            return Err(CurveError::validation("motion.ease_divisor must be > 1"));
        }
        if self.settle_epsilon_px <= 0.0 {
            return Err(CurveError::validation(
                "motion.settle_epsilon_px must be > 0",
            ));
        }
        if self.reshuffle_odds < 2 {
            return Err(CurveError::validation("motion.reshuffle_odds must be >= 2"));
        }
        if self.min_speed_y < 0.0 || self.speed_y_gain <= 0.0 || self.speed_y_decay <= 0.0 {
            return Err(CurveError::validation(
                "motion speed_y floor/gain/decay must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.fast_speed_probability) {
            return Err(CurveError::validation(
                "motion.fast_speed_probability must be within [0, 1]",
            ));
        }
        if self.slow_speed_max < 0.0 || self.fast_speed_max < 0.0 {
            return Err(CurveError::validation("motion speed bands must be >= 0"));
        }
        Ok(())
    }
}

/// Everything the effect needs that depends on the device class, resolved once.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EffectConfig {
    /// Device class this config was resolved for.
    pub device: DeviceClass,
    /// Extra points on top of [`MIN_POINTS`]; the point count range is `4..=4 + max_extra_points`.
    pub max_extra_points: u32,
    /// Canvas pixel dimensions.
    pub canvas: CanvasSize,
    /// Radius of the filled marker.
    pub point_radius: f64,
    /// Radius of the outline ring.
    pub ring_radius: f64,
    /// Stroke widths.
    pub strokes: StrokeWidths,
    /// Coordinate label size in pixels.
    pub font_size_px: f32,
    /// Colors.
    #[serde(default)]
    pub palette: Palette,
    /// Motion tunables.
    #[serde(default)]
    pub motion: MotionParams,
}

impl EffectConfig {
    /// Preset for the given device class.
    pub fn for_device(device: DeviceClass) -> Self {
        match device {
            DeviceClass::Desktop => Self {
                device,
                max_extra_points: 16,
                canvas: CanvasSize {
                    width: 6000,
                    height: 5000,
                },
                point_radius: 1.8,
                ring_radius: 5.4,
                strokes: StrokeWidths {
                    ring: 0.4,
                    guide: 0.4,
                    curve: 2.8,
                },
                font_size_px: 10.0,
                palette: Palette::default(),
                motion: MotionParams::default(),
            },
            // 4000x4000 stays under mobile canvas pixel limits.
            DeviceClass::Mobile => Self {
                device,
                max_extra_points: 10,
                canvas: CanvasSize {
                    width: 4000,
                    height: 4000,
                },
                point_radius: 1.2,
                ring_radius: 3.8,
                strokes: StrokeWidths {
                    ring: 0.4,
                    guide: 0.4,
                    curve: 2.2,
                },
                font_size_px: 8.0,
                palette: Palette::default(),
                motion: MotionParams::default(),
            },
        }
    }

    /// Inclusive range the point count is drawn from.
    pub fn point_count_range(&self) -> RangeInclusive<usize> {
        MIN_POINTS..=MIN_POINTS + self.max_extra_points as usize
    }

    /// Load and validate a config from a JSON file.
    pub fn from_json_path(path: &Path) -> CurveResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check sizes and motion parameters.
    pub fn validate(&self) -> CurveResult<()> {
        if self.max_extra_points == 0 {
            return Err(CurveError::validation("max_extra_points must be > 0"));
        }
        if self.max_extra_points > MAX_EXTRA_POINTS {
            return Err(CurveError::validation(format!(
                "max_extra_points must be <= {MAX_EXTRA_POINTS}, got {}",
                self.max_extra_points
            )));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(CurveError::validation("canvas size must be non-zero"));
        }
        let lengths = [
            ("point_radius", self.point_radius),
            ("ring_radius", self.ring_radius),
            ("strokes.ring", self.strokes.ring),
            ("strokes.guide", self.strokes.guide),
            ("strokes.curve", self.strokes.curve),
        ];
        for (name, v) in lengths {
            if !v.is_finite() || v <= 0.0 {
                return Err(CurveError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(CurveError::validation(
                "font_size_px must be finite and > 0",
            ));
        }
        self.motion.validate()
    }
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self::for_device(DeviceClass::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/preset.rs"]
mod tests;
