use kurbo::Shape as _;

use crate::{
    foundation::{
        core::{Point, Rect, Rgba8},
        error::{CurveError, CurveResult},
    },
    render::{
        frame::FrameRGBA,
        surface::{LineCap, StrokeStyle, Surface},
        text::{LabelFont, TextLayoutEngine},
    },
};

/// Flattening tolerance for circle outlines, in pixels.
const CIRCLE_TOLERANCE: f64 = 0.05;

/// Raster surface backed by `vello_cpu`.
///
/// Draw calls are recorded into a render context and rasterized into the pixmap on
/// [`CpuSurface::readback`] or before a clear.
pub struct CpuSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    pending: bool,
    labels: Option<LabelRenderer>,
}

struct LabelRenderer {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

impl CpuSurface {
    /// Allocate a transparent surface.
    pub fn new(width: u32, height: u32) -> CurveResult<Self> {
        if width == 0 || height == 0 {
            return Err(CurveError::render("surface size must be non-zero"));
        }
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| CurveError::render("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| CurveError::render("surface height exceeds u16"))?;
        Ok(Self {
            width: width_u16,
            height: height_u16,
            ctx: vello_cpu::RenderContext::new(width_u16, height_u16),
            pixmap: vello_cpu::Pixmap::new(width_u16, height_u16),
            pending: false,
            labels: None,
        })
    }

    /// Enable coordinate labels using `font`.
    pub fn with_label_font(mut self, font: &LabelFont) -> CurveResult<Self> {
        let mut engine = TextLayoutEngine::new();
        engine.register(font.bytes())?;
        let font_data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.bytes().as_ref().clone()),
            0,
        );
        self.labels = Some(LabelRenderer {
            engine,
            font: font_data,
        });
        Ok(self)
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Rasterize pending draws and copy the pixels out.
    pub fn readback(&mut self) -> FrameRGBA {
        self.commit();
        FrameRGBA {
            width: self.width(),
            height: self.height(),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn commit(&mut self) {
        if !self.pending {
            return;
        }
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        self.ctx.reset();
        self.pending = false;
    }

    fn stroke(&mut self, path: &kurbo::BezPath, style: &StrokeStyle) {
        let mut stroke = vello_cpu::kurbo::Stroke::new(style.width);
        if style.cap == LineCap::Round {
            stroke = stroke
                .with_caps(vello_cpu::kurbo::Cap::Round)
                .with_join(vello_cpu::kurbo::Join::Round);
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_stroke(stroke);
        self.ctx.set_paint(color_to_cpu(style.color));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
        self.pending = true;
    }
}

impl Surface for CpuSurface {
    fn clear_rect(&mut self, rect: Rect) {
        self.commit();
        let (w, h) = (usize::from(self.width), usize::from(self.height));
        let clip = rect.intersect(Rect::new(0.0, 0.0, w as f64, h as f64));
        if clip.width() <= 0.0 || clip.height() <= 0.0 {
            return;
        }
        let x0 = clip.x0.floor() as usize;
        let x1 = (clip.x1.ceil() as usize).min(w);
        let y0 = clip.y0.floor() as usize;
        let y1 = (clip.y1.ceil() as usize).min(h);
        let data = self.pixmap.data_as_u8_slice_mut();
        for y in y0..y1 {
            let row = y * w * 4;
            data[row + x0 * 4..row + x1 * 4].fill(0);
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        let path = kurbo::Circle::new(center, radius).to_path(CIRCLE_TOLERANCE);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_path(&bezpath_to_cpu(&path));
        self.pending = true;
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, style: &StrokeStyle) {
        let path = kurbo::Circle::new(center, radius).to_path(CIRCLE_TOLERANCE);
        self.stroke(&path, style);
    }

    fn stroke_line(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        let mut path = kurbo::BezPath::new();
        path.move_to(from);
        path.line_to(to);
        self.stroke(&path, style);
    }

    fn stroke_quad(&mut self, from: Point, ctrl: Point, to: Point, style: &StrokeStyle) {
        let mut path = kurbo::BezPath::new();
        path.move_to(from);
        path.quad_to(ctrl, to);
        self.stroke(&path, style);
    }

    fn fill_text(&mut self, text: &str, origin: Point, size_px: f32, color: Rgba8) {
        let Some(labels) = self.labels.as_mut() else {
            return;
        };
        let layout = match labels.engine.layout_line(text, size_px, color) {
            Ok(layout) => layout,
            Err(err) => {
                tracing::warn!(%err, "label layout failed");
                return;
            }
        };
        let baseline = layout
            .lines()
            .next()
            .map(|line| f64::from(line.metrics().baseline))
            .unwrap_or(0.0);

        self.ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            origin.x,
            origin.y - baseline,
        )));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx.set_paint(color_to_cpu(brush));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&labels.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        self.pending = true;
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
