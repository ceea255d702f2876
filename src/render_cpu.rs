//! CPU rasterization of a resolved frame, powered by `vello_cpu`.
//! Text leaves render as Parley glyph runs once a font is loaded; with
//! no font loaded they are skipped with a debug log.

use crate::{
    core::{BezPath, Rgba8, Viewport},
    error::{GardenError, GardenResult},
    eval::{ResolvedElement, SceneFrame},
    model::Shape,
    text::{TextBrush, TextEngine},
};
use kurbo::Shape as _;

/// Output pixels, RGBA8 premultiplied alpha.
#[derive(Clone, Debug)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRgba {
    /// Straight-alpha copy, for PNG export.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            for px in out.chunks_exact_mut(4) {
                let a = px[3] as u16;
                if a == 0 || a == 255 {
                    continue;
                }
                px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
                px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
                px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    pub clear_rgba: Option<[u8; 4]>,
}

/// Rasterizer with a cached render context, recreated on size change and
/// reset between frames.
#[derive(Default)]
pub struct CpuRenderer {
    ctx: Option<(u16, u16, vello_cpu::RenderContext)>,
    text: TextEngine,
    font: Option<vello_cpu::peniko::FontData>,
}

impl CpuRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the font used for every text element (TTF/OTF bytes).
    pub fn load_font(&mut self, bytes: Vec<u8>) -> GardenResult<()> {
        self.text.register_font(&bytes)?;
        self.font = Some(vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(bytes),
            0,
        ));
        Ok(())
    }

    #[tracing::instrument(skip(self, frame))]
    pub fn render(
        &mut self,
        frame: &SceneFrame,
        viewport: Viewport,
        settings: &RenderSettings,
    ) -> GardenResult<FrameRgba> {
        let width = viewport.width.ceil() as u32;
        let height = viewport.height.ceil() as u32;
        let w: u16 = width
            .try_into()
            .map_err(|_| GardenError::render("viewport width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| GardenError::render("viewport height exceeds u16"))?;

        let mut ctx = match self.ctx.take() {
            Some((cw, ch, ctx)) if cw == w && ch == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();

        if let Some(c) = settings.clear_rgba {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c[0], c[1], c[2], c[3]));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(width),
                f64::from(height),
            ));
        }

        for el in &frame.elements {
            if let Shape::Text { content, size_px } = &el.shape {
                self.draw_text(&mut ctx, el, content, *size_px)?;
                continue;
            }

            let Some(path) = shape_to_path(&el.shape) else {
                continue;
            };
            let path = bezpath_to_cpu(&path);

            ctx.set_transform(affine_to_cpu(el.transform));
            let layered = el.opacity < 1.0;
            if layered {
                ctx.push_opacity_layer(el.opacity as f32);
            }
            if let Some(fill) = el.fill {
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    fill.r, fill.g, fill.b, fill.a,
                ));
                ctx.fill_path(&path);
            }
            if let Some(stroke) = el.stroke {
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(stroke.width));
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    stroke.color.r,
                    stroke.color.g,
                    stroke.color.b,
                    stroke.color.a,
                ));
                ctx.stroke_path(&path);
            }
            if layered {
                ctx.pop_layer();
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        let data = pixmap.data_as_u8_slice().to_vec();
        self.ctx = Some((w, h, ctx));

        Ok(FrameRgba {
            width,
            height,
            data,
            premultiplied: true,
        })
    }

    /// Lay out and draw one text element, centered on its origin.
    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        el: &ResolvedElement,
        content: &str,
        size_px: f64,
    ) -> GardenResult<()> {
        let Some(font) = self.font.clone() else {
            tracing::debug!(id = %el.id, "no font loaded, skipping text element");
            return Ok(());
        };

        let fill = el.fill.unwrap_or(Rgba8::rgb(0, 0, 0));
        let brush = TextBrush {
            r: fill.r,
            g: fill.g,
            b: fill.b,
            a: fill.a,
        };
        let layout = self.text.layout(content, size_px as f32, brush)?;

        let centered = el.transform
            * kurbo::Affine::translate((
                -f64::from(layout.width()) / 2.0,
                -f64::from(layout.height()) / 2.0,
            ));
        ctx.set_transform(affine_to_cpu(centered));

        let layered = el.opacity < 1.0;
        if layered {
            ctx.push_opacity_layer(el.opacity as f32);
        }
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let b = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(b.r, b.g, b.b, b.a));
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        if layered {
            ctx.pop_layer();
        }
        Ok(())
    }
}

fn shape_to_path(shape: &Shape) -> Option<BezPath> {
    match shape {
        Shape::Path(path) => Some(path.clone()),
        Shape::Circle { radius } => {
            Some(kurbo::Circle::new(kurbo::Point::ORIGIN, *radius).to_path(0.1))
        }
        Shape::Line { from, to } => {
            let mut path = BezPath::new();
            path.move_to(*from);
            path.line_to(*to);
            Some(path)
        }
        Shape::Rect {
            width,
            height,
            radius,
        } => Some(kurbo::RoundedRect::new(0.0, 0.0, *width, *height, *radius).to_path(0.1)),
        Shape::Text { .. } => None,
    }
}

fn affine_to_cpu(a: kurbo::Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
