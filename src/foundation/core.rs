use crate::foundation::error::{CurveError, CurveResult};

pub use kurbo::{Point, Rect, Vec2};

/// Zero-based index of a rendered frame.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Rational frames-per-second, used when frames are encoded to video.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator (must be > 0).
    pub den: u32,
}

impl Fps {
    /// Build a validated frame rate.
    pub fn new(num: u32, den: u32) -> CurveResult<Self> {
        if den == 0 {
            return Err(CurveError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(CurveError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }
}

/// Visible area of the host, in CSS/viewport pixels.
///
/// Read fresh on every frame; points bounce off its edges and reshuffle targets are drawn
/// inside it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Build a viewport from a width and height.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Reject empty or non-finite viewports.
    pub fn validate(self) -> CurveResult<()> {
        if !self.width.is_finite() || !self.height.is_finite() {
            return Err(CurveError::validation("viewport size must be finite"));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(CurveError::validation("viewport size must be > 0"));
        }
        Ok(())
    }

    /// Whether `p` lies inside `[0, width] x [0, height]`.
    pub fn contains(self, p: Point) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}

/// Fixed pixel dimensions of the drawing canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl CanvasSize {
    /// Full canvas rectangle in pixel space.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from RGB channels and a `0.0..=1.0` opacity, rounded to 8 bits.
    pub fn rgba(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { r, g, b, a }
    }
}
