use crate::foundation::core::{Point, Rect, Rgba8};

/// Line end style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    /// Square end flush with the endpoint (canvas default).
    #[default]
    Butt,
    /// Rounded ends and joins.
    Round,
}

/// How a path is stroked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Line width in pixels.
    pub width: f64,
    /// Line color.
    pub color: Rgba8,
    /// Cap and join style.
    pub cap: LineCap,
}

impl StrokeStyle {
    /// Butt-capped stroke.
    pub fn new(width: f64, color: Rgba8) -> Self {
        Self {
            width,
            color,
            cap: LineCap::Butt,
        }
    }

    /// Same stroke with round caps and joins.
    pub fn rounded(self) -> Self {
        Self {
            cap: LineCap::Round,
            ..self
        }
    }
}

/// A 2D raster target the curve is drawn onto.
///
/// Mirrors the small subset of an immediate-mode canvas the effect needs.
pub trait Surface {
    /// Clear `rect` to fully transparent.
    fn clear_rect(&mut self, rect: Rect);

    /// Filled circle.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8);

    /// Circle outline.
    fn stroke_circle(&mut self, center: Point, radius: f64, style: &StrokeStyle);

    /// Straight segment.
    fn stroke_line(&mut self, from: Point, to: Point, style: &StrokeStyle);

    /// Quadratic curve from `from` to `to` bent toward `ctrl`.
    fn stroke_quad(&mut self, from: Point, ctrl: Point, to: Point, style: &StrokeStyle);

    /// Left-aligned text with its alphabetic baseline starting at `origin`.
    fn fill_text(&mut self, text: &str, origin: Point, size_px: f32, color: Rgba8);
}

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    /// [`Surface::clear_rect`].
    ClearRect(Rect),
    /// [`Surface::fill_circle`].
    FillCircle {
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
        /// Fill color.
        color: Rgba8,
    },
    /// [`Surface::stroke_circle`].
    StrokeCircle {
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
        /// Stroke.
        style: StrokeStyle,
    },
    /// [`Surface::stroke_line`].
    StrokeLine {
        /// Start.
        from: Point,
        /// End.
        to: Point,
        /// Stroke.
        style: StrokeStyle,
    },
    /// [`Surface::stroke_quad`].
    StrokeQuad {
        /// Start anchor.
        from: Point,
        /// Control point.
        ctrl: Point,
        /// End anchor.
        to: Point,
        /// Stroke.
        style: StrokeStyle,
    },
    /// [`Surface::fill_text`].
    FillText {
        /// Text content.
        text: String,
        /// Baseline origin.
        origin: Point,
        /// Font size.
        size_px: f32,
        /// Fill color.
        color: Rgba8,
    },
}

/// Surface that records calls instead of rasterizing them.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    cmds: Vec<DrawCmd>,
}

impl RecordingSurface {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands in call order.
    pub fn commands(&self) -> &[DrawCmd] {
        &self.cmds
    }

    /// Take everything recorded so far, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<DrawCmd> {
        std::mem::take(&mut self.cmds)
    }
}

impl Surface for RecordingSurface {
    fn clear_rect(&mut self, rect: Rect) {
        self.cmds.push(DrawCmd::ClearRect(rect));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        self.cmds.push(DrawCmd::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, style: &StrokeStyle) {
        self.cmds.push(DrawCmd::StrokeCircle {
            center,
            radius,
            style: *style,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        self.cmds.push(DrawCmd::StrokeLine {
            from,
            to,
            style: *style,
        });
    }

    fn stroke_quad(&mut self, from: Point, ctrl: Point, to: Point, style: &StrokeStyle) {
        self.cmds.push(DrawCmd::StrokeQuad {
            from,
            ctrl,
            to,
            style: *style,
        });
    }

    fn fill_text(&mut self, text: &str, origin: Point, size_px: f32, color: Rgba8) {
        self.cmds.push(DrawCmd::FillText {
            text: text.to_string(),
            origin,
            size_px,
            color,
        });
    }
}

/// Surface that discards every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn clear_rect(&mut self, _rect: Rect) {}

    fn fill_circle(&mut self, _center: Point, _radius: f64, _color: Rgba8) {}

    fn stroke_circle(&mut self, _center: Point, _radius: f64, _style: &StrokeStyle) {}

    fn stroke_line(&mut self, _from: Point, _to: Point, _style: &StrokeStyle) {}

    fn stroke_quad(&mut self, _from: Point, _ctrl: Point, _to: Point, _style: &StrokeStyle) {}

    fn fill_text(&mut self, _text: &str, _origin: Point, _size_px: f32, _color: Rgba8) {}
}
