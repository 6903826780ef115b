use crate::{
    config::preset::EffectConfig,
    foundation::core::{Point, Vec2},
    render::surface::{StrokeStyle, Surface},
    sim::{point::DriftPoint, state::CurveState},
};

/// Label text offset from the point, up and to the left.
const LABEL_OFFSET: Vec2 = Vec2::new(-3.0, -5.0);

/// Coordinate label for a point, two decimals per axis.
pub fn coordinate_label(p: &DriftPoint) -> String {
    format!("{:.2}, {:.2}", p.x, p.y)
}

/// Smoothed segment ending at point `i`: `(start, control, end)`.
///
/// Anchors are the midpoints of `prev2 -> prev` and `prev -> point`, with `prev` as the control
/// point, so consecutive segments join tangentially.
pub fn smoothed_segment(state: &CurveState, i: usize) -> (Point, Point, Point) {
    let (prev2, prev, cur) = state.neighbours(i);
    let start = prev2.pos().midpoint(prev.pos());
    let end = prev.pos().midpoint(cur.pos());
    (start, prev.pos(), end)
}

/// Draw one full frame of the effect.
///
/// Clears the whole canvas, then for every point in order: marker dot, ring, coordinate label,
/// guide line from its predecessor, and the smoothed curve segment.
pub fn draw_curve_frame(state: &CurveState, config: &EffectConfig, surface: &mut dyn Surface) {
    surface.clear_rect(config.canvas.rect());

    let palette = config.palette;
    let ring = StrokeStyle::new(config.strokes.ring, palette.secondary);
    let guide = StrokeStyle::new(config.strokes.guide, palette.secondary);
    let curve = StrokeStyle::new(config.strokes.curve, palette.primary).rounded();

    for (i, p) in state.points().iter().enumerate() {
        let pos = p.pos();
        surface.fill_circle(pos, config.point_radius, palette.secondary);
        surface.stroke_circle(pos, config.ring_radius, &ring);
        surface.fill_text(
            &coordinate_label(p),
            pos + LABEL_OFFSET,
            config.font_size_px,
            palette.secondary,
        );

        let (_, prev, _) = state.neighbours(i);
        surface.stroke_line(prev.pos(), pos, &guide);

        let (start, ctrl, end) = smoothed_segment(state, i);
        surface.stroke_quad(start, ctrl, end, &curve);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/curve.rs"]
mod tests;
